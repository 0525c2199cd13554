pub mod traits;
pub mod dijkstra;
pub mod sidetrack;
pub mod eppstein;
pub mod brute_force;

pub use traits::{ShortestPathAlgorithm, ShortestPathResult};
