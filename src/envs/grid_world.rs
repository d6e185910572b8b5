use crate::common::{defs::*, errors::ConfigError};
use itertools::iproduct;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static description of a maze. Every field maps to one recognised option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub good_states: Vec<(Coordinate, f64)>,
    #[serde(default)]
    pub bad_states: Vec<(Coordinate, f64)>,
    #[serde(default)]
    pub walls: Vec<Coordinate>,
    pub start: Coordinate,
    pub gamma: f64,
    pub epsilon: f64,
    pub step_reward: f64,
    #[serde(default = "default_action_order")]
    pub action_order: [Action; 4],
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Seed for the random initial policy of policy iteration.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_SEED: u64 = 2718;

fn default_action_order() -> [Action; 4] {
    Action::ALL
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl GridConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Good(f64),
    Bad(f64),
    Wall,
    Plain,
}

impl Cell {
    fn kind(&self) -> &'static str {
        match self {
            Cell::Good(_) => "good",
            Cell::Bad(_) => "bad",
            Cell::Wall => "wall",
            Cell::Plain => "plain",
        }
    }
}

/// Immutable grid MDP. Reward cells are not absorbing: the agent keeps
/// moving from them like from any other cell.
#[derive(Debug, Clone)]
pub struct GridModel {
    config: GridConfig,
    cells: HashMap<Coordinate, Cell>,
    /// Position of each action (by discriminant) within `config.action_order`.
    positions: [usize; 4],
}

impl GridModel {
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        if config.rows == 0 || config.cols == 0 {
            return Err(ConfigError::InvalidParameter(format!(
                "grid must have at least one row and column, got {}x{}",
                config.rows, config.cols
            )));
        }
        if !(config.gamma > 0. && config.gamma < 1.) {
            return Err(ConfigError::InvalidParameter(format!(
                "gamma must lie in (0, 1), got {}",
                config.gamma
            )));
        }
        if !(config.epsilon > 0. && config.epsilon.is_finite()) {
            return Err(ConfigError::InvalidParameter(format!(
                "epsilon must be positive, got {}",
                config.epsilon
            )));
        }
        if !config.step_reward.is_finite() {
            return Err(ConfigError::InvalidParameter(
                "step reward must be finite".to_string(),
            ));
        }
        if config.max_iterations == 0 {
            return Err(ConfigError::InvalidParameter(
                "max iterations must be at least 1".to_string(),
            ));
        }

        let mut positions = [usize::MAX; 4];
        for (i, a) in config.action_order.iter().enumerate() {
            if positions[*a as usize] != usize::MAX {
                return Err(ConfigError::InvalidActionOrder);
            }
            positions[*a as usize] = i;
        }

        let in_bounds = |coord: Coordinate| {
            if coord.0 < config.rows && coord.1 < config.cols {
                Ok(coord)
            } else {
                Err(ConfigError::OutOfBounds {
                    coord,
                    rows: config.rows,
                    cols: config.cols,
                })
            }
        };

        let listed = config
            .good_states
            .iter()
            .map(|&(s, r)| (s, Cell::Good(r)))
            .chain(config.bad_states.iter().map(|&(s, r)| (s, Cell::Bad(r))))
            .chain(config.walls.iter().map(|&s| (s, Cell::Wall)));

        let mut cells = HashMap::new();
        for (s, cell) in listed {
            let s = in_bounds(s)?;
            if let Cell::Good(r) | Cell::Bad(r) = cell {
                if !r.is_finite() {
                    return Err(ConfigError::InvalidParameter(format!(
                        "reward at {s:?} must be finite"
                    )));
                }
            }
            if let Some(prev) = cells.insert(s, cell) {
                return Err(ConfigError::Conflict {
                    coord: s,
                    first: prev.kind(),
                    second: cell.kind(),
                });
            }
        }

        let start = in_bounds(config.start)?;
        if cells.get(&start) == Some(&Cell::Wall) {
            return Err(ConfigError::Conflict {
                coord: start,
                first: "wall",
                second: "start",
            });
        }

        Ok(Self {
            config,
            cells,
            positions,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn gamma(&self) -> f64 {
        self.config.gamma
    }

    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    pub fn step_reward(&self) -> f64 {
        self.config.step_reward
    }

    pub fn start(&self) -> Coordinate {
        self.config.start
    }

    pub fn max_iterations(&self) -> usize {
        self.config.max_iterations
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Actions in the configured order; ties resolve to the earliest one.
    pub fn actions(&self) -> &[Action; 4] {
        &self.config.action_order
    }

    /// The two drift directions of `a`: its predecessor and successor in
    /// the cyclic action order.
    pub fn adjacent(&self, a: Action) -> (Action, Action) {
        let i = self.positions[a as usize];
        let order = &self.config.action_order;
        (order[(i + 3) % 4], order[(i + 1) % 4])
    }

    pub fn in_bounds(&self, s: Coordinate) -> bool {
        s.0 < self.config.rows && s.1 < self.config.cols
    }

    pub fn is_wall(&self, s: Coordinate) -> bool {
        matches!(self.cells.get(&s), Some(Cell::Wall))
    }

    pub fn cell(&self, s: Coordinate) -> Cell {
        self.cells.get(&s).copied().unwrap_or(Cell::Plain)
    }

    pub fn reward_at(&self, s: Coordinate) -> f64 {
        match self.cell(s) {
            Cell::Good(r) | Cell::Bad(r) => r,
            Cell::Wall | Cell::Plain => self.config.step_reward,
        }
    }

    /// Deterministic successor of `s` under `a`; bounces back to `s` when
    /// the target is off the grid or a wall.
    pub fn step(&self, s: Coordinate, a: Action) -> Coordinate {
        let (dr, dc) = a.delta();
        match (s.0.checked_add_signed(dr), s.1.checked_add_signed(dc)) {
            (Some(r), Some(c)) if self.in_bounds((r, c)) && !self.is_wall((r, c)) => (r, c),
            _ => s,
        }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        iproduct!(0..self.config.rows, 0..self.config.cols)
    }

    /// Bound on the largest per-cell change below which a sweep counts as converged.
    pub fn convergence_threshold(&self) -> f64 {
        self.config.epsilon * (1. - self.config.gamma) / self.config.gamma
    }

    /// Starting table: reward cells hold their reward, everything else 0.
    pub fn initial_values(&self) -> ValueTable {
        Array2::from_shape_fn((self.rows(), self.cols()), |s| match self.cell(s) {
            Cell::Good(r) | Cell::Bad(r) => r,
            Cell::Wall | Cell::Plain => 0.,
        })
    }
}
