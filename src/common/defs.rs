use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// (row, col) of a grid cell.
pub type Coordinate = (usize, usize);

/// One value per cell, walls included.
pub type ValueTable = Array2<f64>;

/// One decision per cell, walls included.
pub type PolicyTable = Array2<Action>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Left,
    Down,
    Right,
}

impl Action {
    /// Default ordering. Drift directions are the cyclic neighbours in this order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Left, Action::Down, Action::Right];

    pub fn delta(&self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Left => (0, -1),
            Action::Down => (1, 0),
            Action::Right => (0, 1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Up => "Up",
            Action::Left => "Left",
            Action::Down => "Down",
            Action::Right => "Right",
        }
    }

    pub fn abbrev(&self) -> char {
        match self {
            Action::Up => 'U',
            Action::Left => 'L',
            Action::Down => 'D',
            Action::Right => 'R',
        }
    }
}

/// Per-iteration view handed to solver observers.
#[derive(Debug)]
pub enum Snapshot<'a> {
    Values {
        iteration: usize,
        values: &'a ValueTable,
        max_delta: f64,
    },
    Policy {
        iteration: usize,
        policy: &'a PolicyTable,
        changed: usize,
    },
}

pub type Observer = Box<dyn FnMut(&Snapshot<'_>)>;
