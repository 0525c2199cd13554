use std::fmt::Debug;
use std::ops::Sub;
use num_traits::{CheckedAdd, Zero};
use ordered_float::OrderedFloat;

use crate::{Error, Result};

/// Edge weight usable by the shortest-path and k-shortest-path algorithms.
///
/// Weights must be totally ordered and closed under subtraction. Addition is
/// checked: path costs that do not fit the weight type are reported as
/// [`Error::CostOverflow`] instead of wrapping. Integers work directly;
/// floating point weights go through `OrderedFloat`.
pub trait Weight: Copy + Ord + Debug + Zero + Sub<Output = Self> {
    /// Sum of two weights, or `None` if it is not representable
    fn checked_sum(self, rhs: Self) -> Option<Self>;

    /// Like [`Weight::checked_sum`] but as an error
    fn try_add(self, rhs: Self) -> Result<Self> {
        self.checked_sum(rhs).ok_or(Error::CostOverflow)
    }
}

macro_rules! integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn checked_sum(self, rhs: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &rhs)
                }
            }
        )*
    };
}

integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// Finite inputs whose sum rounds to infinity count as overflow.
impl Weight for OrderedFloat<f32> {
    fn checked_sum(self, rhs: Self) -> Option<Self> {
        let sum = self + rhs;
        (sum.0.is_finite() || !self.0.is_finite() || !rhs.0.is_finite()).then_some(sum)
    }
}

impl Weight for OrderedFloat<f64> {
    fn checked_sum(self, rhs: Self) -> Option<Self> {
        let sum = self + rhs;
        (sum.0.is_finite() || !self.0.is_finite() || !rhs.0.is_finite()).then_some(sum)
    }
}

/// Trait representing a weighted directed graph
pub trait Graph<W>: Debug
where
    W: Weight,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the outgoing edges from a vertex, in insertion order
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.outgoing_edges(from).any(|(target, _)| target == to)
    }

    /// Gets the weight of the first edge between two vertices, if any
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing_edges(from)
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| weight)
    }
}
