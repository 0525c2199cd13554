//! Eppstein KSP - K shortest paths between a source and a destination
//!
//! This library implements Eppstein's algorithm for the K shortest paths problem
//! on directed graphs with non-negative edge weights. A single backward Dijkstra
//! run from the destination yields a shortest-path tree; every non-tree edge
//! ("sidetrack") is then priced by the extra cost it adds over staying on the
//! tree and stored in a persistent leftist heap shared along the tree. The K best
//! paths are read off that heap of heaps in O(K log K) after preprocessing.
//!
//! Paths are walks: they may revisit vertices, including the destination.

pub mod algorithm;
pub mod data_structures;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod graph;
#[cfg(feature = "python")]
mod python;

pub use algorithm::{
    dijkstra::Dijkstra,
    eppstein::{CostPolicy, Eppstein, KShortestPaths, KspEngine, KspQuery, RankedPath},
    sidetrack::{Sidetrack, SidetrackHeaps},
    ShortestPathAlgorithm, ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(String),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Graph with {0} vertices cannot be allocated")]
    TooManyVertices(usize),

    #[error("Path cost overflows the weight type")]
    CostOverflow,

    #[error("Algorithm execution error: {0}")]
    AlgorithmError(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
