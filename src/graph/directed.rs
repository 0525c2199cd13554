use crate::graph::traits::{Graph, Weight};
use crate::{Error, Result};

/// A directed graph implementation using dense adjacency lists.
///
/// Parallel edges and self loops are kept: every stored edge is a distinct
/// way to move between its endpoints.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Weight,
{
    /// Outgoing edges for each vertex: vertex_id -> [(target_vertex, weight)]
    outgoing_edges: Vec<Vec<(usize, W)>>,

    /// Total number of stored edges
    edge_count: usize,
}

impl<W> DirectedGraph<W>
where
    W: Weight,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            outgoing_edges: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates a new directed graph with the specified number of vertices and no edges
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            outgoing_edges: vec![Vec::new(); vertices],
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list.
    ///
    /// Every edge is validated before anything is stored, so a malformed list
    /// never yields a partially built graph.
    pub fn from_edges(vertices: usize, edges: &[(usize, usize, W)]) -> Result<Self> {
        for &(from, to, weight) in edges {
            Self::check_edge(vertices, from, to, weight)?;
        }

        let mut outgoing_edges = Vec::new();
        outgoing_edges
            .try_reserve_exact(vertices)
            .map_err(|_| Error::TooManyVertices(vertices))?;
        outgoing_edges.resize_with(vertices, Vec::new);

        for &(from, to, weight) in edges {
            outgoing_edges[from].push((to, weight));
        }
        Ok(DirectedGraph {
            outgoing_edges,
            edge_count: edges.len(),
        })
    }

    /// Adds a vertex to the graph and returns its ID
    pub fn add_vertex(&mut self) -> usize {
        self.outgoing_edges.push(Vec::new());
        self.outgoing_edges.len() - 1
    }

    /// Appends a directed edge. Existing edges between the same endpoints are kept.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()> {
        Self::check_edge(self.outgoing_edges.len(), from, to, weight)?;
        self.outgoing_edges[from].push((to, weight));
        self.edge_count += 1;
        Ok(())
    }

    /// Builds the reverse graph: every edge u -> v of weight w becomes v -> u of weight w.
    pub fn reversed(&self) -> Self {
        let mut reverse = Self::with_capacity(self.outgoing_edges.len());
        for (from, edges) in self.outgoing_edges.iter().enumerate() {
            for &(to, weight) in edges {
                reverse.outgoing_edges[to].push((from, weight));
            }
        }
        reverse.edge_count = self.edge_count;
        reverse
    }

    /// Iterates every edge as (from, to, weight)
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        self.outgoing_edges
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |&(to, weight)| (from, to, weight)))
    }

    fn check_edge(vertices: usize, from: usize, to: usize, weight: W) -> Result<()> {
        if from >= vertices || to >= vertices {
            return Err(Error::InvalidEdge(from, to));
        }
        if weight < W::zero() {
            return Err(Error::NegativeWeight(format!("{:?}", weight)));
        }
        Ok(())
    }
}

impl<W> Default for DirectedGraph<W>
where
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Weight,
{
    fn vertex_count(&self) -> usize {
        self.outgoing_edges.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.outgoing_edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_rejects_out_of_range() {
        let err = DirectedGraph::<u64>::from_edges(2, &[(0, 1, 1), (1, 2, 1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidEdge(1, 2)));
    }

    #[test]
    fn test_from_edges_rejects_negative_weight() {
        let err = DirectedGraph::<i64>::from_edges(2, &[(0, 1, -3)]).unwrap_err();
        assert!(matches!(err, Error::NegativeWeight(_)));
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let edges = [(0, 1, 4), (0, 1, 4), (0, 1, 7)];
        let graph = DirectedGraph::<u64>::from_edges(2, &edges).unwrap();
        assert_eq!(graph.edge_count(), 3);
        let weights: Vec<u64> = graph.outgoing_edges(0).map(|(_, w)| w).collect();
        assert_eq!(weights, vec![4, 4, 7]);
    }

    #[test]
    fn test_reversed_inverts_every_edge() {
        let edges = [(0, 1, 2), (1, 2, 5), (0, 2, 9)];
        let graph = DirectedGraph::<u64>::from_edges(3, &edges).unwrap();
        let reverse = graph.reversed();

        assert_eq!(reverse.edge_count(), 3);
        assert_eq!(reverse.get_edge_weight(1, 0), Some(2));
        assert_eq!(reverse.get_edge_weight(2, 1), Some(5));
        assert_eq!(reverse.get_edge_weight(2, 0), Some(9));
        assert!(!reverse.has_edge(0, 1));
    }

    #[test]
    fn test_add_edge_validates() {
        let mut graph = DirectedGraph::<u64>::with_capacity(1);
        let v = graph.add_vertex();
        assert_eq!(v, 1);
        assert!(graph.add_edge(0, 1, 3).is_ok());
        assert!(graph.add_edge(0, 5, 3).is_err());
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1, 3)]);
    }
}
