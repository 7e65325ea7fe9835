pub mod error;
pub mod fleet;
pub mod generate;
pub mod grid;
pub mod level;
pub mod model;
pub mod schedule;
pub mod solver;
