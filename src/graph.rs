use std::fmt;

use crate::error::{GraphError, Result};
use crate::weight::Weight;

/// Outgoing `(neighbor, weight)` pairs of a single vertex, in edge
/// insertion order.
pub type AdjacencyList<W> = Vec<(usize, W)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub from: usize,
    pub to: usize,
    pub weight: W,
}

impl<W> Edge<W> {
    pub fn new(from: usize, to: usize, weight: W) -> Self {
        Edge { from, to, weight }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl<W> From<(usize, usize, W)> for Edge<W> {
    fn from((from, to, weight): (usize, usize, W)) -> Self {
        Edge { from, to, weight }
    }
}

/// An immutable weighted graph over the dense vertex range
/// `0..vertex_count`, holding both an edge list and an adjacency list
/// representation.
///
/// An undirected edge is stored once in the edge list and populates
/// the adjacency lists of both endpoints (a self-loop only once).
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<W> {
    vertex_count: usize,
    directed: bool,
    edges: Vec<Edge<W>>,
    adjacency: Vec<AdjacencyList<W>>,
}

impl<W: Weight> Graph<W> {
    /// Constructs a graph from the given edges, failing if an endpoint
    /// is outside `[0, vertex_count)` or a weight is not comparable.
    pub fn build<I, E>(vertex_count: usize, edges: I, directed: bool) -> Result<Graph<W>>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<W>>,
    {
        let mut adjacency: Vec<AdjacencyList<W>> = vec![Vec::new(); vertex_count];
        let mut edge_list = Vec::new();

        for edge in edges {
            let edge = edge.into();

            for &index in &[edge.from, edge.to] {
                if index >= vertex_count {
                    return Err(GraphError::InvalidVertexIndex {
                        index,
                        vertex_count,
                    });
                }
            }

            if !edge.weight.is_comparable() {
                return Err(GraphError::InvalidWeight {
                    from: edge.from,
                    to: edge.to,
                });
            }

            adjacency[edge.from].push((edge.to, edge.weight));
            if !directed && !edge.is_self_loop() {
                adjacency[edge.to].push((edge.from, edge.weight));
            }

            edge_list.push(edge);
        }

        tracing::debug!(
            vertices = vertex_count,
            edges = edge_list.len(),
            directed,
            "built graph"
        );

        Ok(Graph {
            vertex_count,
            directed,
            edges: edge_list,
            adjacency,
        })
    }

    pub fn directed<I, E>(vertex_count: usize, edges: I) -> Result<Graph<W>>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<W>>,
    {
        Self::build(vertex_count, edges, true)
    }

    pub fn undirected<I, E>(vertex_count: usize, edges: I) -> Result<Graph<W>>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<W>>,
    {
        Self::build(vertex_count, edges, false)
    }

    /// Returns the first edge with a negative weight, if any.
    pub(crate) fn find_negative_edge(&self) -> Option<&Edge<W>> {
        self.edges.iter().find(|edge| edge.weight.is_negative())
    }

    /// Rejects graphs containing a negative edge, for engines whose
    /// correctness depends on non-negative weights.
    pub(crate) fn require_non_negative(&self, algorithm: &'static str) -> Result<()> {
        match self.find_negative_edge() {
            Some(edge) => Err(GraphError::NegativeWeight {
                algorithm,
                from: edge.from,
                to: edge.to,
                weight: edge.weight.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<W> Graph<W> {
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn contains_vertex(&self, v: usize) -> bool {
        v < self.vertex_count
    }

    pub(crate) fn check_vertex(&self, v: usize) -> Result<()> {
        if self.contains_vertex(v) {
            Ok(())
        } else {
            Err(GraphError::InvalidVertexIndex {
                index: v,
                vertex_count: self.vertex_count,
            })
        }
    }
}

impl<W: Copy> Graph<W> {
    /// Outgoing `(neighbor, weight)` pairs of `v`; every call returns a
    /// fresh iterator. Empty if `v` is not a vertex of the graph.
    pub fn neighbors(&self, v: usize) -> impl DoubleEndedIterator<Item = (usize, W)> + '_ {
        self.adjacency
            .get(v)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<W>> + '_ {
        self.edges.iter().copied()
    }

    /// Every traversable arc: each edge once for directed graphs, in
    /// both directions for undirected ones.
    pub fn arcs(&self) -> impl Iterator<Item = Edge<W>> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(from, list)| {
            list.iter()
                .map(move |&(to, weight)| Edge::new(from, to, weight))
        })
    }
}

impl<W: fmt::Display> fmt::Display for Graph<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        for (v, list) in self.adjacency.iter().enumerate() {
            write!(f, "{}:", v)?;
            for (to, weight) in list {
                write!(f, " {} {} ({})", arrow, to, weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
