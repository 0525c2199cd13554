use std::collections::HashMap;

use crate::graph::parse::Tokens;
use crate::graph::{DirectedGraph, Weight};
use crate::Result;

/// Builds a graph from string-labelled edges. Labels get dense ids in the
/// order they are first seen.
#[derive(Debug, Clone)]
pub struct LabeledGraphBuilder<W>
where
    W: Weight,
{
    ids: HashMap<String, usize>,
    labels: Vec<String>,
    edges: Vec<(usize, usize, W)>,
}

impl<W> Default for LabeledGraphBuilder<W>
where
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> LabeledGraphBuilder<W>
where
    W: Weight,
{
    pub fn new() -> Self {
        LabeledGraphBuilder {
            ids: HashMap::new(),
            labels: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the id of `label`, assigning the next free one if it is new
    pub fn vertex(&mut self, label: &str) -> usize {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.ids.insert(label.to_string(), id);
        self.labels.push(label.to_string());
        id
    }

    pub fn add_edge(&mut self, from: &str, to: &str, weight: W) -> &mut Self {
        let from = self.vertex(from);
        let to = self.vertex(to);
        self.edges.push((from, to, weight));
        self
    }

    /// Validates the collected edges and builds the graph
    pub fn build(self) -> Result<LabeledGraph<W>> {
        let graph = DirectedGraph::from_edges(self.labels.len(), &self.edges)?;
        Ok(LabeledGraph {
            graph,
            ids: self.ids,
            labels: self.labels,
        })
    }
}

/// A graph together with the labels of its vertices
#[derive(Debug, Clone)]
pub struct LabeledGraph<W>
where
    W: Weight,
{
    pub graph: DirectedGraph<W>,
    ids: HashMap<String, usize>,
    labels: Vec<String>,
}

impl<W> LabeledGraph<W>
where
    W: Weight,
{
    pub fn id(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Translates a vertex sequence back to labels
    pub fn labels_of(&self, vertices: &[usize]) -> Vec<&str> {
        vertices.iter().filter_map(|&v| self.label(v)).collect()
    }
}

/// A labelled graph plus the requested endpoints, which may name unknown vertices
#[derive(Debug, Clone)]
pub struct LabeledProblem {
    pub graph: LabeledGraph<i64>,
    pub source: String,
    pub destination: String,
    pub k: usize,
}

/// Parses an edge count, that many `from to weight` lines, then `source destination k`.
pub fn parse_labeled(input: &str) -> Result<LabeledProblem> {
    let mut tokens = Tokens::new(input);
    let count: usize = tokens.next("edge count")?;

    let mut builder = LabeledGraphBuilder::new();
    for _ in 0..count {
        let (_, from) = tokens.next_str("edge source")?;
        let (_, to) = tokens.next_str("edge target")?;
        let weight: i64 = tokens.next("edge weight")?;
        builder.add_edge(from, to, weight);
    }

    let (_, source) = tokens.next_str("source")?;
    let (_, destination) = tokens.next_str("destination")?;
    let k: usize = tokens.next("k")?;
    tokens.finish()?;

    Ok(LabeledProblem {
        graph: builder.build()?,
        source: source.to_string(),
        destination: destination.to_string(),
        k,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::Error;

    #[test]
    fn test_ids_follow_first_appearance() {
        let mut builder = LabeledGraphBuilder::new();
        builder.add_edge("B", "A", 3u64).add_edge("A", "C", 1).add_edge("B", "C", 9);
        let labeled = builder.build().unwrap();

        assert_eq!(labeled.id("B"), Some(0));
        assert_eq!(labeled.id("A"), Some(1));
        assert_eq!(labeled.id("C"), Some(2));
        assert_eq!(labeled.id("D"), None);
        assert_eq!(labeled.graph.get_edge_weight(0, 2), Some(9));
        assert_eq!(labeled.labels_of(&[0, 1, 2]), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_parse_labeled_problem() {
        let input = "3\nA B 3\nB C 4\nA C 10\nA C 2\n";
        let problem = parse_labeled(input).unwrap();
        assert_eq!(problem.source, "A");
        assert_eq!(problem.destination, "C");
        assert_eq!(problem.k, 2);
        assert_eq!(problem.graph.graph.edge_count(), 3);
    }

    #[test]
    fn test_parse_labeled_rejects_negative_weights() {
        let input = "1\nA B -1\nA B 1\n";
        assert!(matches!(parse_labeled(input), Err(Error::NegativeWeight(_))));
    }
}
