pub mod common;
pub mod pi;
pub mod vi;

use crate::common::{defs::*, errors::Result};

/// Planner over a fully known grid MDP - Sutton & Barto 2018.
pub trait MdpSolver<T> {
    fn v_star(&self, s: Coordinate) -> Option<f64>;

    fn q_star(&self, s: Coordinate, a: Action) -> Option<f64>;

    fn pi_star(&self, s: Coordinate) -> Option<Action>;

    fn values(&self) -> &ValueTable;

    fn policy(&self) -> Option<&PolicyTable>;

    /// Runs to convergence. `num_iterations` overrides the model's cap on
    /// the solver's outer loop. Overflowing values surface as non-convergence.
    fn exec(&mut self, num_iterations: Option<usize>) -> Result<(T, usize)>;
}
