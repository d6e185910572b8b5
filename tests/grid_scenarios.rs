extern crate maze_mdp;
extern crate rstest;
mod common;

use common::*;
use maze_mdp::{envs::scenarios, *};
use rstest::rstest;

#[test]
fn toy_grid_avoids_the_bad_cell() {
    let vi = solve_vi(scenarios::toy_2x2());

    assert_eq!(vi.pi_star((0, 1)), Some(Action::Left));
    assert_eq!(vi.pi_star((1, 0)), Some(Action::Up));
}

#[rstest]
#[case(10.)]
#[case(1.)]
#[case(0.5)]
fn boxed_in_cell_takes_the_only_open_direction(#[case] goal: f64) {
    let vi = solve_vi(walled_in(goal));
    let pi = solve_pi(walled_in(goal));

    assert_eq!(vi.pi_star((1, 1)), Some(Action::Down));
    assert_eq!(pi.pi_star((1, 1)), Some(Action::Down));
    assert!(vi.v_star((2, 1)).unwrap() > vi.v_star((1, 1)).unwrap());
}

#[test]
fn json_configuration_solves_like_the_builtin() {
    let json = r#"{
        "rows": 2, "cols": 2,
        "good_states": [[[0, 0], 10.0]],
        "bad_states": [[[1, 1], -1.0]],
        "start": [1, 0],
        "gamma": 0.9, "epsilon": 1e-6, "step_reward": -0.04
    }"#;
    let config = GridConfig::from_json(json).unwrap();
    let from_json = solve_vi(config);
    let builtin = solve_vi(scenarios::toy_2x2());

    assert_eq!(from_json.values(), builtin.values());
    assert_eq!(from_json.policy(), builtin.policy());
}

#[test]
fn invalid_configuration_fails_fast() {
    let mut config = scenarios::maze_world();
    config.good_states.push(((0, 1), 1.));

    let e = GridModel::new(config).unwrap_err();
    assert_eq!(
        e,
        ConfigError::Conflict {
            coord: (0, 1),
            first: "good",
            second: "wall"
        }
    );
    assert_eq!(e.to_string(), "Cell (0, 1) is listed as both good and wall");
}

#[test]
fn tiny_cap_reports_non_convergence() {
    let mut config = scenarios::maze_world();
    config.max_iterations = 2;
    let mut vi = ValueIteration::new(model(config));

    match vi.exec(None) {
        Err(MazeError::NonConvergence { iterations, max_delta, .. }) => {
            assert_eq!(iterations, 2);
            assert!(max_delta > 0.);
        }
        other => panic!("expected non-convergence, got {other:?}"),
    }
}

#[test]
fn overflowing_values_are_reported_not_returned() {
    let mut config = scenarios::toy_2x2();
    config.good_states = vec![((0, 0), 1e308)];

    let mut vi = ValueIteration::new(model(config.clone()));
    assert!(matches!(
        vi.exec(None),
        Err(MazeError::NonConvergence { .. })
    ));

    let mut pi = PolicyIteration::from_seed(model(config));
    assert!(matches!(
        pi.exec(None),
        Err(MazeError::NonConvergence { .. })
    ));
}
