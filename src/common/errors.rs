use super::defs::Coordinate;

/// Grid configuration rejected at model construction.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Cell {coord:?} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        coord: Coordinate,
        rows: usize,
        cols: usize,
    },
    #[error("Cell {coord:?} is listed as both {first} and {second}")]
    Conflict {
        coord: Coordinate,
        first: &'static str,
        second: &'static str,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Action order must list each of Up, Left, Down, Right exactly once")]
    InvalidActionOrder,
    #[error("Unable to parse grid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse errors compare by message; `serde_json::Error` has no `PartialEq`.
impl PartialEq for ConfigError {
    fn eq(&self, other: &Self) -> bool {
        use ConfigError::*;

        match (self, other) {
            (
                OutOfBounds { coord, rows, cols },
                OutOfBounds {
                    coord: c2,
                    rows: r2,
                    cols: k2,
                },
            ) => coord == c2 && rows == r2 && cols == k2,
            (
                Conflict {
                    coord,
                    first,
                    second,
                },
                Conflict {
                    coord: c2,
                    first: f2,
                    second: s2,
                },
            ) => coord == c2 && first == f2 && second == s2,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (InvalidActionOrder, InvalidActionOrder) => true,
            (Parse(a), Parse(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MazeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{solver} did not converge within {iterations} iterations (last max delta {max_delta:e})")]
    NonConvergence {
        solver: &'static str,
        iterations: usize,
        max_delta: f64,
    },
}

pub type Result<T> = std::result::Result<T, MazeError>;
