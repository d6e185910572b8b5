//! Plain-text grids for the console.

use crate::common::defs::*;
use crate::envs::grid_world::{Cell, GridModel};

const WALL: &str = "WALL";

/// Lays out one label per cell, padded to a common width.
fn render_grid<F>(model: &GridModel, label: F) -> String
where
    F: Fn(Coordinate, Cell) -> String,
{
    let labels = (0..model.rows())
        .map(|r| {
            (0..model.cols())
                .map(|c| label((r, c), model.cell((r, c))))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let width = labels.iter().flatten().map(|l| l.len()).max().unwrap_or(0);

    labels
        .iter()
        .map(|row| {
            let cells = row
                .iter()
                .map(|l| format!("{l:^width$}"))
                .collect::<Vec<_>>();
            format!("| {} |\n", cells.join(" | "))
        })
        .collect()
}

/// Reward collected in each cell; walls are marked.
pub fn render_rewards(model: &GridModel) -> String {
    render_grid(model, |_, cell| match cell {
        Cell::Good(r) | Cell::Bad(r) => format!("{r:+}"),
        Cell::Wall => WALL.to_string(),
        Cell::Plain => format!("{}", model.step_reward()),
    })
}

pub fn render_values(model: &GridModel, values: &ValueTable) -> String {
    render_grid(model, |s, cell| match cell {
        Cell::Wall => WALL.to_string(),
        _ => format!("{:.3}", values[s]),
    })
}

/// Reward cells show their reward and the action's initial, other cells
/// the action's full name.
pub fn render_policy(model: &GridModel, policy: &PolicyTable) -> String {
    render_grid(model, |s, cell| match cell {
        Cell::Good(r) | Cell::Bad(r) => format!("{r:+} ({})", policy[s].abbrev()),
        Cell::Wall => WALL.to_string(),
        Cell::Plain => policy[s].name().to_string(),
    })
}
