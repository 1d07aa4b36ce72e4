pub mod a_star;
pub mod common;
pub mod dijkstra;

pub use a_star::{run_a_star, AStar};
pub use common::{Algorithm, PathfindingAlgorithm, SearchReport};
pub use dijkstra::{run_dijkstra, Dijkstra};
