use super::{common::*, MdpSolver};
use crate::common::{defs::*, errors::*};
use crate::envs::grid_world::GridModel;
use ndarray::Array2;
use rand::prelude::*;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Policy iteration: full policy evaluation to convergence, then a greedy
/// improvement pass, until a pass changes no cell.
pub struct PolicyIteration {
    model: Rc<GridModel>,
    v: ValueTable,
    pi: PolicyTable,
    observer: Option<Observer>,
}

impl PolicyIteration {
    /// Every cell starts with an independent, uniformly drawn action.
    pub fn new(model: Rc<GridModel>, mut rng: StdRng) -> Self {
        let actions = *model.actions();
        let pi = Array2::from_shape_fn((model.rows(), model.cols()), |_| {
            actions[rng.gen_range(0..actions.len())]
        });
        let v = model.initial_values();

        Self {
            model,
            v,
            pi,
            observer: None,
        }
    }

    pub fn from_seed(model: Rc<GridModel>) -> Self {
        let rng = StdRng::seed_from_u64(model.seed());
        Self::new(model, rng)
    }

    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Solves for the value of the current policy with synchronous sweeps.
    /// Returns the number of sweeps used.
    pub fn evaluate_policy(&mut self, num_iterations: Option<usize>) -> Result<usize> {
        let max_iterations = num_iterations.unwrap_or(self.model.max_iterations());
        let threshold = self.model.convergence_threshold();
        let m = &*self.model;

        let mut max_delta = f64::INFINITY;
        for sweep in 1..=max_iterations {
            let (v, pi) = (&self.v, &self.pi);
            let next = Array2::from_shape_fn(v.dim(), |s| q_value(m, v, s, pi[s]));
            max_delta = max_abs_diff(v, &next);
            self.v = next;

            if !max_delta.is_finite() {
                warn!(sweeps = sweep, "policy evaluation overflowed");
                return Err(MazeError::NonConvergence {
                    solver: "policy evaluation",
                    iterations: sweep,
                    max_delta,
                });
            }

            if max_delta < threshold {
                debug!(sweeps = sweep, max_delta, "policy evaluated");
                return Ok(sweep);
            }
        }

        warn!(max_iterations, max_delta, "policy evaluation hit its iteration cap");
        Err(MazeError::NonConvergence {
            solver: "policy evaluation",
            iterations: max_iterations,
            max_delta,
        })
    }

    /// Switches every cell whose greedy action is strictly better than its
    /// current one. Returns the number of cells changed.
    pub fn improve(&mut self) -> usize {
        let m = &*self.model;
        let mut changed = 0;
        for s in m.cells() {
            let (best, best_q) = best_action(m, &self.v, s);
            if best_q > q_value(m, &self.v, s, self.pi[s]) {
                self.pi[s] = best;
                changed += 1;
            }
        }

        changed
    }
}

impl MdpSolver<bool> for PolicyIteration {
    fn v_star(&self, s: Coordinate) -> Option<f64> {
        self.v.get(s).copied()
    }

    fn q_star(&self, s: Coordinate, a: Action) -> Option<f64> {
        self.model
            .in_bounds(s)
            .then(|| q_value(&self.model, &self.v, s, a))
    }

    fn pi_star(&self, s: Coordinate) -> Option<Action> {
        self.pi.get(s).copied()
    }

    fn values(&self) -> &ValueTable {
        &self.v
    }

    fn policy(&self) -> Option<&PolicyTable> {
        Some(&self.pi)
    }

    /// Returns whether the policy is stable and the number of rounds.
    /// `num_iterations` caps the improvement rounds; each evaluation keeps
    /// the model's cap.
    fn exec(&mut self, num_iterations: Option<usize>) -> Result<(bool, usize)> {
        let max_iterations = num_iterations.unwrap_or(self.model.max_iterations());

        let mut round_delta = f64::INFINITY;
        for round in 1..=max_iterations {
            let before = self.v.clone();
            let sweeps = self.evaluate_policy(None)?;
            round_delta = max_abs_diff(&before, &self.v);

            let changed = self.improve();
            debug!(round, sweeps, changed, "policy iteration round");

            if let Some(observer) = self.observer.as_mut() {
                observer(&Snapshot::Policy {
                    iteration: round,
                    policy: &self.pi,
                    changed,
                });
            }

            if changed == 0 {
                info!(rounds = round, "policy iteration reached a stable policy");
                return Ok((true, round));
            }
        }

        warn!(max_iterations, "policy iteration hit its round cap");
        Err(MazeError::NonConvergence {
            solver: "policy iteration",
            iterations: max_iterations,
            max_delta: round_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::{grid_world::*, scenarios};
    use float_eq::*;
    use rstest::rstest;

    fn model(config: GridConfig) -> Rc<GridModel> {
        Rc::new(GridModel::new(config).unwrap())
    }

    #[test]
    fn same_seed_same_initial_policy() {
        let m = model(scenarios::maze_world());
        let a = PolicyIteration::from_seed(Rc::clone(&m));
        let b = PolicyIteration::new(Rc::clone(&m), StdRng::seed_from_u64(m.seed()));
        assert_eq!(a.policy(), b.policy());
    }

    #[test]
    fn different_seeds_draw_different_policies() {
        let m = model(scenarios::maze_world());
        let a = PolicyIteration::new(Rc::clone(&m), StdRng::seed_from_u64(1));
        let b = PolicyIteration::new(Rc::clone(&m), StdRng::seed_from_u64(2));
        assert_eq!(a.policy().unwrap().dim(), (6, 6));
        assert_ne!(a.policy(), b.policy());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2718)]
    fn toy_grid_is_stable_and_points_towards_the_goal(#[case] seed: u64) {
        let rng = StdRng::seed_from_u64(seed);
        let pi = &mut PolicyIteration::new(model(scenarios::toy_2x2()), rng);
        let (stable, rounds) = pi.exec(None).unwrap();

        assert!(stable);
        assert!(rounds >= 1);
        assert_eq!(pi.pi_star((0, 1)), Some(Action::Left));
        assert_eq!(pi.pi_star((1, 0)), Some(Action::Up));
        assert_float_eq!(pi.v_star((0, 0)).unwrap(), 89.21703643, abs <= 1e-5);
        assert_float_eq!(pi.v_star((1, 1)).unwrap(), 67.64959677, abs <= 1e-5);
    }

    #[test]
    fn another_improvement_pass_changes_nothing() {
        let pi = &mut PolicyIteration::from_seed(model(scenarios::bonus_maze()));
        pi.exec(None).unwrap();
        let policy = pi.policy().cloned();

        assert_eq!(pi.improve(), 0);
        assert_eq!(pi.policy().cloned(), policy);
    }

    #[test]
    fn evaluation_reaches_the_policy_fixed_point() {
        let m = model(scenarios::toy_2x2());
        let pi = &mut PolicyIteration::new(Rc::clone(&m), StdRng::seed_from_u64(3));
        let sweeps = pi.evaluate_policy(None).unwrap();
        assert!(sweeps > 1);

        for s in m.cells() {
            let a = pi.pi_star(s).unwrap();
            assert_float_eq!(
                pi.q_star(s, a).unwrap(),
                pi.v_star(s).unwrap(),
                abs <= 1e-6
            );
        }
    }

    #[test]
    fn observer_sees_every_round() {
        use std::cell::RefCell;

        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let observer: Observer = Box::new(move |snap: &Snapshot<'_>| {
            if let Snapshot::Policy { changed, .. } = snap {
                sink.borrow_mut().push(*changed);
            }
        });
        let pi =
            &mut PolicyIteration::from_seed(model(scenarios::maze_world())).with_observer(observer);
        let (_, rounds) = pi.exec(None).unwrap();

        let changes = changes.borrow();
        assert_eq!(changes.len(), rounds);
        assert_eq!(changes.last(), Some(&0));
        assert!(changes[..rounds - 1].iter().all(|&c| c > 0));
    }

    #[test]
    fn evaluation_cap_surfaces_non_convergence() {
        let mut c = scenarios::bonus_maze();
        c.max_iterations = 10;
        let pi = &mut PolicyIteration::from_seed(model(c));
        assert!(matches!(
            pi.exec(None),
            Err(MazeError::NonConvergence {
                solver: "policy evaluation",
                iterations: 10,
                ..
            })
        ));
    }

    #[test]
    fn round_cap_surfaces_non_convergence() {
        let pi = &mut PolicyIteration::from_seed(model(scenarios::bonus_maze()));

        match pi.exec(Some(1)) {
            Err(MazeError::NonConvergence {
                solver: "policy iteration",
                iterations: 1,
                max_delta,
            }) => assert!(max_delta > 0.),
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }

    #[test]
    fn round_cap_leaves_room_for_a_stable_policy() {
        let pi = &mut PolicyIteration::from_seed(model(scenarios::bonus_maze()));
        let (stable, rounds) = pi.exec(Some(50)).unwrap();
        assert!(stable);
        assert!(rounds > 1);
    }

    #[test]
    fn overflowing_rewards_do_not_count_as_converged() {
        let mut c = scenarios::toy_2x2();
        c.good_states = vec![((0, 0), 1e308)];
        let pi = &mut PolicyIteration::from_seed(model(c));

        assert!(matches!(
            pi.exec(None),
            Err(MazeError::NonConvergence {
                solver: "policy evaluation",
                ..
            })
        ));
    }
}
