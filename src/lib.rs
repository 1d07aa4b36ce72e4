pub mod algorithms;
pub mod config;
pub mod environment;
pub mod error;
pub mod grid;
pub mod path;
pub mod render;
pub mod session;
pub mod statistics;

pub use algorithms::{run_a_star, run_dijkstra, Algorithm};
pub use grid::{neighbors, CellState, Coordinate, Grid};
pub use path::Path;
