extern crate itertools;
extern crate ndarray;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod algos;
pub mod common;
pub mod envs;
pub mod ui;

pub use algos::model_based::mdp::{pi::PolicyIteration, vi::ValueIteration, MdpSolver};
pub use common::{defs::*, errors::*};
pub use envs::grid_world::{Cell, GridConfig, GridModel};
