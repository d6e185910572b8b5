use crate::common::defs::*;
use crate::envs::grid_world::GridModel;
use ndarray::Array2;

/// Probability of moving in the intended direction.
pub const P_INTENDED: f64 = 0.8;
/// Probability of drifting to each of the two adjacent directions.
pub const P_DRIFT: f64 = 0.1;

/// Value of the cell the agent ends up in when moving `a` from `s`.
/// Off-grid and wall targets bounce back to `s`.
pub fn landing_value(model: &GridModel, v: &ValueTable, s: Coordinate, a: Action) -> f64 {
    v[model.step(s, a)]
}

/// One-step Bellman backup of taking `a` in `s` against `v`:
/// `r(s) + gamma * (0.8 v(s, a) + 0.1 v(s, a-1) + 0.1 v(s, a+1))`.
///
/// `s` must lie on the grid and `v` must have the model's shape.
pub fn q_value(model: &GridModel, v: &ValueTable, s: Coordinate, a: Action) -> f64 {
    let (prev, next) = model.adjacent(a);
    let expected = P_INTENDED * landing_value(model, v, s, a)
        + P_DRIFT * landing_value(model, v, s, prev)
        + P_DRIFT * landing_value(model, v, s, next);

    model.reward_at(s) + model.gamma() * expected
}

/// Greedy action at `s` and its value. Only a strictly greater value
/// displaces an earlier action in the model's order.
pub fn best_action(model: &GridModel, v: &ValueTable, s: Coordinate) -> (Action, f64) {
    let actions = model.actions();
    let first = (actions[0], q_value(model, v, s, actions[0]));

    actions[1..].iter().fold(first, |best, &a| {
        let q = q_value(model, v, s, a);
        if q > best.1 {
            (a, q)
        } else {
            best
        }
    })
}

/// Greedy policy for every cell, walls included.
pub fn extract_policy(model: &GridModel, v: &ValueTable) -> PolicyTable {
    Array2::from_shape_fn((model.rows(), model.cols()), |s| best_action(model, v, s).0)
}

/// Largest absolute per-cell change. Any non-finite change (overflow to
/// `inf`, or a NaN from `inf - inf`) reports as `f64::INFINITY`.
pub fn max_abs_diff(old: &ValueTable, new: &ValueTable) -> f64 {
    old.iter()
        .zip(new.iter())
        .map(|(a, b)| {
            let d = (a - b).abs();
            if d.is_finite() {
                d
            } else {
                f64::INFINITY
            }
        })
        .fold(0., f64::max)
}
