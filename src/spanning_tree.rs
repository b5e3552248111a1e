//! Minimum spanning trees (Prim) and forests (Kruskal).
//!
//! Both engines treat every edge as undirected, whatever the graph's
//! direction flag, and ignore self-loops since they can never lower
//! the cost of a spanning tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::error::Result;
use crate::graph::{AdjacencyList, Edge, Graph};
use crate::state::{DisjointSet, FrontierEntry};
use crate::weight::{self, Weight};

#[derive(Debug, Clone, PartialEq)]
pub struct MSTResult<W> {
    /// Selected edges, in the order they were accepted.
    pub edges: Vec<Edge<W>>,
    /// Sum of the selected weights, clamped at the bounds of `W`.
    pub total_weight: W,
    /// Number of trees the selected edges form.
    pub trees: usize,
    /// Set when some vertex is left out of a single spanning tree;
    /// the result is then a forest (Kruskal) or only the start
    /// vertex's component (Prim).
    pub disconnected: bool,
}

impl<W: Weight> MSTResult<W> {
    fn new(edges: Vec<Edge<W>>, trees: usize, disconnected: bool) -> Self {
        let total_weight = weight::total(edges.iter().map(|edge| edge.weight));
        MSTResult {
            edges,
            total_weight,
            trees,
            disconnected,
        }
    }

    pub fn is_spanning_tree(&self) -> bool {
        !self.disconnected
    }
}

/// Prim's algorithm grown from `start`.
///
/// Each round adds the vertex outside the tree with the cheapest
/// connecting edge, lowest index first on ties. Vertices not reachable
/// from `start` are never added: the result spans only the start
/// vertex's component and `disconnected` is set. Negative weights are
/// rejected before the search starts.
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn prim_mst<W: Weight>(graph: &Graph<W>, start: usize) -> Result<MSTResult<W>> {
    graph.check_vertex(start)?;
    graph.require_non_negative("prim")?;

    let n = graph.vertex_count();
    let mut adjacency: Vec<AdjacencyList<W>> = vec![Vec::new(); n];
    for edge in graph.edges().filter(|edge| !edge.is_self_loop()) {
        adjacency[edge.from].push((edge.to, edge.weight));
        adjacency[edge.to].push((edge.from, edge.weight));
    }

    let mut key: Vec<Option<W>> = vec![None; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut in_tree = vec![false; n];
    let mut frontier = BinaryHeap::new();
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    key[start] = Some(W::zero());
    frontier.push(FrontierEntry {
        key: W::zero(),
        tie: start,
        vertex: start,
    });

    while let Some(FrontierEntry { key: cost, vertex, .. }) = frontier.pop() {
        if in_tree[vertex] {
            continue;
        }
        in_tree[vertex] = true;

        if let Some(from) = parent[vertex] {
            trace!(from, to = vertex, "prim accepted edge");
            edges.push(Edge::new(from, vertex, cost));
        }

        for &(to, weight) in &adjacency[vertex] {
            if in_tree[to] {
                continue;
            }
            if key[to].map_or(true, |current| weight < current) {
                key[to] = Some(weight);
                parent[to] = Some(vertex);
                frontier.push(FrontierEntry {
                    key: weight,
                    tie: to,
                    vertex: to,
                });
            }
        }
    }

    let spanned = in_tree.iter().filter(|&&v| v).count();
    debug!(spanned, selected = edges.len(), "prim finished");

    Ok(MSTResult::new(edges, 1, spanned < n))
}

/// Kruskal's algorithm over the whole edge list.
///
/// Edges are stable-sorted by weight, so ties keep edge-list order,
/// and an edge is accepted iff its endpoints are still in different
/// components. For a disconnected graph the result is a minimum
/// spanning forest with one tree per component.
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn kruskal_mst<W: Weight>(graph: &Graph<W>) -> MSTResult<W> {
    let n = graph.vertex_count();

    let mut candidates: Vec<Edge<W>> = graph.edges().filter(|edge| !edge.is_self_loop()).collect();
    candidates.sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(Ordering::Equal));

    let wanted = n.saturating_sub(1);
    let mut components = DisjointSet::new(n);
    let mut edges = Vec::with_capacity(wanted);

    for edge in candidates {
        if edges.len() == wanted {
            break;
        }

        if components.union(edge.from, edge.to) {
            trace!(from = edge.from, to = edge.to, "kruskal accepted edge");
            edges.push(edge);
        }
    }

    let trees = components.set_count();
    debug!(trees, selected = edges.len(), "kruskal finished");

    MSTResult::new(edges, trees, trees > 1)
}
