//! Plain-text problem format.
//!
//! ```text
//! n m s t k
//! u v w        (m lines)
//! ```
//!
//! Tokens may be split across lines arbitrarily; line numbers in errors point
//! at the line the offending token came from.

use std::str::FromStr;

use crate::algorithm::eppstein::KspQuery;
use crate::graph::DirectedGraph;
use crate::{Error, Result};

/// A parsed graph and the query to run on it
#[derive(Debug, Clone)]
pub struct Problem {
    pub graph: DirectedGraph<i64>,
    pub query: KspQuery,
}

/// Whitespace tokenizer that remembers line numbers (1-based)
pub(crate) struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        let tokens = input
            .lines()
            .enumerate()
            .flat_map(|(index, line)| line.split_whitespace().map(move |token| (index + 1, token)))
            .collect();
        Tokens { tokens, position: 0 }
    }

    pub(crate) fn next_str(&mut self, what: &str) -> Result<(usize, &'a str)> {
        let line = self.tokens.last().map_or(1, |(line, _)| *line);
        let token = self.tokens.get(self.position).copied().ok_or_else(|| Error::Parse {
            line,
            message: format!("unexpected end of input, expected {}", what),
        })?;
        self.position += 1;
        Ok(token)
    }

    pub(crate) fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let (line, token) = self.next_str(what)?;
        token.parse().map_err(|_| Error::Parse {
            line,
            message: format!("invalid {}: {:?}", what, token),
        })
    }

    pub(crate) fn finish(&self) -> Result<()> {
        match self.tokens.get(self.position) {
            Some((line, token)) => Err(Error::Parse {
                line: *line,
                message: format!("unexpected trailing token {:?}", token),
            }),
            None => Ok(()),
        }
    }
}

/// Parses the `n m s t k` + edge list format. Indices and weights are
/// validated as the graph is built.
pub fn parse_problem(input: &str) -> Result<Problem> {
    let mut tokens = Tokens::new(input);
    let n: usize = tokens.next("vertex count")?;
    let m: usize = tokens.next("edge count")?;
    let source: usize = tokens.next("source")?;
    let destination: usize = tokens.next("destination")?;
    let k: usize = tokens.next("k")?;

    // `m` is untrusted, so the list grows with the edges actually present.
    let mut edges = Vec::new();
    for _ in 0..m {
        let u: usize = tokens.next("edge source")?;
        let v: usize = tokens.next("edge target")?;
        let w: i64 = tokens.next("edge weight")?;
        edges.push((u, v, w));
    }
    tokens.finish()?;

    for vertex in [source, destination] {
        if vertex >= n {
            return Err(Error::InvalidVertex(vertex));
        }
    }

    let graph = DirectedGraph::from_edges(n, &edges)?;
    log::debug!("parsed problem with {} vertices and {} edges", n, m);

    Ok(Problem {
        graph,
        query: KspQuery::new(source, destination, k),
    })
}
