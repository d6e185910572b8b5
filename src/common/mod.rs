pub mod defs;
pub mod errors;
