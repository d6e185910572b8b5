use super::{common::*, MdpSolver};
use crate::common::{defs::*, errors::*};
use crate::envs::grid_world::GridModel;
use ndarray::Array2;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Value iteration with synchronous sweeps. Every sweep builds a fresh
/// table from the previous one; the greedy policy is extracted once the
/// largest per-cell change drops below the model's convergence threshold.
pub struct ValueIteration {
    model: Rc<GridModel>,
    v: ValueTable,
    pi: Option<PolicyTable>,
    observer: Option<Observer>,
}

impl ValueIteration {
    pub fn new(model: Rc<GridModel>) -> Self {
        let v = model.initial_values();

        Self {
            model,
            v,
            pi: None,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// One Bellman optimality backup over all cells. Returns the new table
    /// and its largest absolute change, leaving the solver untouched.
    pub fn sweep(&self) -> (ValueTable, f64) {
        let m = &*self.model;
        let v = &self.v;
        let next = Array2::from_shape_fn(v.dim(), |s| best_action(m, v, s).1);
        let max_delta = max_abs_diff(v, &next);

        (next, max_delta)
    }
}

impl MdpSolver<f64> for ValueIteration {
    fn v_star(&self, s: Coordinate) -> Option<f64> {
        self.v.get(s).copied()
    }

    fn q_star(&self, s: Coordinate, a: Action) -> Option<f64> {
        self.model
            .in_bounds(s)
            .then(|| q_value(&self.model, &self.v, s, a))
    }

    fn pi_star(&self, s: Coordinate) -> Option<Action> {
        self.pi.as_ref().and_then(|pi| pi.get(s).copied())
    }

    fn values(&self) -> &ValueTable {
        &self.v
    }

    fn policy(&self) -> Option<&PolicyTable> {
        self.pi.as_ref()
    }

    /// Returns the last sweep's max delta and the number of sweeps.
    fn exec(&mut self, num_iterations: Option<usize>) -> Result<(f64, usize)> {
        let max_iterations = num_iterations.unwrap_or(self.model.max_iterations());
        let threshold = self.model.convergence_threshold();

        let mut max_delta = f64::INFINITY;
        for iteration in 1..=max_iterations {
            let (next, delta) = self.sweep();
            self.v = next;
            max_delta = delta;
            debug!(iteration, max_delta, "value iteration sweep");

            if let Some(observer) = self.observer.as_mut() {
                observer(&Snapshot::Values {
                    iteration,
                    values: &self.v,
                    max_delta,
                });
            }

            if !max_delta.is_finite() {
                warn!(iteration, "value iteration overflowed");
                return Err(MazeError::NonConvergence {
                    solver: "value iteration",
                    iterations: iteration,
                    max_delta,
                });
            }

            if max_delta < threshold {
                self.pi = Some(extract_policy(&self.model, &self.v));
                info!(iterations = iteration, max_delta, "value iteration converged");
                return Ok((max_delta, iteration));
            }
        }

        warn!(max_iterations, max_delta, "value iteration hit its iteration cap");
        Err(MazeError::NonConvergence {
            solver: "value iteration",
            iterations: max_iterations,
            max_delta,
        })
    }
}
