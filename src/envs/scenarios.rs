//! Compiled-in mazes.

use super::grid_world::*;
use crate::common::defs::Action;

const GAMMA: f64 = 0.99;
const EPSILON: f64 = 1e-6;
const STEP_REWARD: f64 = -0.04;

/// 6x6 maze with several +1 cells, solved by policy iteration in the CLI.
pub fn maze_world() -> GridConfig {
    GridConfig {
        rows: 6,
        cols: 6,
        good_states: [(0, 0), (0, 2), (0, 5), (1, 3), (2, 4), (3, 4)]
            .into_iter()
            .map(|s| (s, 1.))
            .collect(),
        bad_states: [(1, 1), (2, 2), (3, 3), (4, 4), (1, 5)]
            .into_iter()
            .map(|s| (s, -1.))
            .collect(),
        walls: vec![(0, 1), (1, 4), (4, 1), (4, 2), (4, 3)],
        start: (3, 2),
        gamma: GAMMA,
        epsilon: EPSILON,
        step_reward: STEP_REWARD,
        action_order: Action::ALL,
        max_iterations: DEFAULT_MAX_ITERATIONS,
        seed: DEFAULT_SEED,
    }
}

/// 6x6 maze with a single +10 goal and a -15 pit, solved by value iteration in the CLI.
pub fn bonus_maze() -> GridConfig {
    let mut bad_states: Vec<_> = [(1, 1), (2, 2), (3, 3), (4, 4), (1, 5), (2, 4), (5, 2)]
        .into_iter()
        .map(|s| (s, -1.))
        .collect();
    bad_states.push(((4, 1), -15.));

    GridConfig {
        rows: 6,
        cols: 6,
        good_states: vec![((1, 3), 10.)],
        bad_states,
        walls: vec![(0, 1), (1, 4), (4, 2), (4, 3)],
        start: (3, 2),
        gamma: GAMMA,
        epsilon: EPSILON,
        step_reward: STEP_REWARD,
        action_order: Action::ALL,
        max_iterations: DEFAULT_MAX_ITERATIONS,
        seed: DEFAULT_SEED,
    }
}

/// Smallest useful maze: goal top-left, pit bottom-right.
pub fn toy_2x2() -> GridConfig {
    GridConfig {
        rows: 2,
        cols: 2,
        good_states: vec![((0, 0), 10.)],
        bad_states: vec![((1, 1), -1.)],
        walls: vec![],
        start: (1, 0),
        gamma: 0.9,
        epsilon: 1e-6,
        step_reward: STEP_REWARD,
        action_order: Action::ALL,
        max_iterations: DEFAULT_MAX_ITERATIONS,
        seed: DEFAULT_SEED,
    }
}
