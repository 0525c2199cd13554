pub mod traits;
pub mod directed;
pub mod generators;
pub mod labeled;
pub mod parse;

pub use traits::{Graph, Weight};
pub use directed::DirectedGraph;
