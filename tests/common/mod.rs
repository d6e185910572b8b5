use maze_mdp::*;
use std::rc::Rc;

#[allow(dead_code)]
pub fn model(config: GridConfig) -> Rc<GridModel> {
    Rc::new(GridModel::new(config).expect("valid grid configuration"))
}

#[allow(dead_code)]
pub fn solve_vi(config: GridConfig) -> ValueIteration {
    let mut vi = ValueIteration::new(model(config));
    vi.exec(None).expect("value iteration converges");
    vi
}

#[allow(dead_code)]
pub fn solve_pi(config: GridConfig) -> PolicyIteration {
    let mut pi = PolicyIteration::from_seed(model(config));
    let (stable, _) = pi.exec(None).expect("policy iteration converges");
    assert!(stable);
    pi
}

/// 3x3 grid whose centre is boxed in by walls on every side but the bottom.
#[allow(dead_code)]
pub fn walled_in(goal_reward: f64) -> GridConfig {
    GridConfig {
        rows: 3,
        cols: 3,
        good_states: vec![((2, 1), goal_reward)],
        bad_states: vec![],
        walls: vec![(0, 1), (1, 0), (1, 2)],
        start: (1, 1),
        gamma: 0.9,
        epsilon: 1e-6,
        step_reward: -0.04,
        action_order: Action::ALL,
        max_iterations: 10_000,
        seed: 2718,
    }
}
