use maze_mdp::{envs::scenarios, ui::*, *};
use std::process::ExitCode;
use std::rc::Rc;
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match solve_maze_world().and_then(|_| solve_bonus_maze()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "solver failed");
            ExitCode::FAILURE
        }
    }
}

fn solve_maze_world() -> Result<()> {
    let model = Rc::new(GridModel::new(scenarios::maze_world())?);
    print_map(&model);

    let m = Rc::clone(&model);
    let observer: Observer = Box::new(move |snap: &Snapshot<'_>| {
        if let Snapshot::Policy {
            iteration, policy, ..
        } = snap
        {
            println!("Iteration {iteration}");
            println!("{}", render_policy(&m, policy));
        }
    });
    let pi = &mut PolicyIteration::from_seed(Rc::clone(&model)).with_observer(observer);
    let (stable, rounds) = pi.exec(None)?;
    println!("Policy stable: {stable}, Number of iterations: {rounds}\n");

    print_solution(&model, &*pi);
    Ok(())
}

fn solve_bonus_maze() -> Result<()> {
    let model = Rc::new(GridModel::new(scenarios::bonus_maze())?);
    print_map(&model);

    let m = Rc::clone(&model);
    let observer: Observer = Box::new(move |snap: &Snapshot<'_>| {
        if let Snapshot::Values {
            iteration, values, ..
        } = snap
        {
            println!("Iteration {iteration}");
            println!("{}", render_values(&m, values));
        }
    });
    let vi = &mut ValueIteration::new(Rc::clone(&model)).with_observer(observer);
    let (max_delta, sweeps) = vi.exec(None)?;
    println!("Max delta: {max_delta:e}, Number of iterations: {sweeps}\n");

    print_solution(&model, &*vi);
    Ok(())
}

fn print_map(model: &GridModel) {
    println!("Displaying the Map\n");
    println!("{}", render_rewards(model));
}

fn print_solution<T>(model: &GridModel, solver: &dyn MdpSolver<T>) {
    println!("{}", render_values(model, solver.values()));
    if let Some(policy) = solver.policy() {
        println!("***************Best Policy*********************\n");
        println!("{}", render_policy(model, policy));
    }
}
