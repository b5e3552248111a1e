//! Single-source (Dijkstra, Bellman-Ford) and all-pairs
//! (Floyd-Warshall) shortest paths.
//!
//! Unreachable vertices are reported as `None` distances, never as a
//! zero or a magic large number.

use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::graph::{Edge, Graph};
use crate::state::FrontierEntry;
use crate::weight::Weight;

/// Distances and predecessors from a single source vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceResult<W> {
    source: usize,
    distance: Vec<Option<W>>,
    predecessor: Vec<Option<usize>>,
}

impl<W: Weight> DistanceResult<W> {
    fn new(vertex_count: usize, source: usize) -> Self {
        let mut distance = vec![None; vertex_count];
        distance[source] = Some(W::zero());
        DistanceResult {
            source,
            distance,
            predecessor: vec![None; vertex_count],
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// One entry per vertex, `None` for vertices not reachable from
    /// the source.
    pub fn distances(&self) -> &[Option<W>] {
        &self.distance
    }

    pub fn distance(&self, v: usize) -> Option<W> {
        self.distance.get(v).copied().flatten()
    }

    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessor
    }

    pub fn predecessor(&self, v: usize) -> Option<usize> {
        self.predecessor.get(v).copied().flatten()
    }

    pub fn is_reachable(&self, v: usize) -> bool {
        self.distance(v).is_some()
    }

    /// Reconstructs the vertex sequence from the source to `target` by
    /// following the predecessor array backwards.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distance(target)?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current);
            if path.len() > self.distance.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

/// A single source-to-target route.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<W> {
    pub distance: W,
    pub vertices: Vec<usize>,
}

/// Lazily-deleted Dijkstra frontier. Every vertex is finalized at
/// most once: an entry whose vertex is already finalized when it pops
/// is stale and gets skipped, and a finalized distance is never
/// revised.
struct DijkstraSearch<'a, W> {
    graph: &'a Graph<W>,
    result: DistanceResult<W>,
    finalized: Vec<bool>,
    frontier: BinaryHeap<FrontierEntry<W>>,
    pushed: usize,
}

impl<'a, W: Weight> DijkstraSearch<'a, W> {
    fn new(graph: &'a Graph<W>, source: usize) -> Self {
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            key: W::zero(),
            tie: 0,
            vertex: source,
        });

        DijkstraSearch {
            graph,
            result: DistanceResult::new(graph.vertex_count(), source),
            finalized: vec![false; graph.vertex_count()],
            frontier,
            pushed: 1,
        }
    }

    /// Finalizes the next closest vertex and relaxes its outgoing
    /// edges. Returns `Ok(None)` once the frontier is exhausted.
    fn step(&mut self) -> Result<Option<usize>> {
        let FrontierEntry { key, vertex, .. } = loop {
            let entry = match self.frontier.pop() {
                Some(entry) => entry,
                None => return Ok(None),
            };
            if !self.finalized[entry.vertex] {
                break entry;
            }
            trace!(vertex = entry.vertex, "skipping stale frontier entry");
        };

        self.finalized[vertex] = true;

        for (to, weight) in self.graph.neighbors(vertex) {
            if self.finalized[to] {
                continue;
            }

            let candidate = key
                .checked_add(weight)
                .ok_or(GraphError::WeightOverflow { from: vertex, to })?;
            let improves = self.result.distance[to].map_or(true, |current| candidate < current);
            if improves {
                self.result.distance[to] = Some(candidate);
                self.result.predecessor[to] = Some(vertex);
                self.frontier.push(FrontierEntry {
                    key: candidate,
                    tie: self.pushed,
                    vertex: to,
                });
                self.pushed += 1;
            }
        }

        Ok(Some(vertex))
    }
}

/// Single-source shortest paths for graphs without negative weights.
///
/// Fails with [`GraphError::NegativeWeight`] if any edge is negative,
/// checked over the whole edge list before the search starts. Equal
/// tentative distances are finalized in the order they were pushed.
/// A distance too long for `W` fails with
/// [`GraphError::WeightOverflow`].
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn dijkstra<W: Weight>(graph: &Graph<W>, source: usize) -> Result<DistanceResult<W>> {
    graph.check_vertex(source)?;
    graph.require_non_negative("dijkstra")?;

    let mut search = DijkstraSearch::new(graph, source);
    let mut finalized = 0;
    while search.step()?.is_some() {
        finalized += 1;
    }

    debug!(finalized, pushed = search.pushed, "dijkstra finished");
    Ok(search.result)
}

/// Shortest route from `source` to `target`, stopping the Dijkstra
/// search as soon as `target` is finalized. `Ok(None)` if `target`
/// is unreachable.
#[tracing::instrument(level = "debug", skip(graph))]
pub fn shortest_path<W: Weight>(
    graph: &Graph<W>,
    source: usize,
    target: usize,
) -> Result<Option<Path<W>>> {
    graph.check_vertex(source)?;
    graph.check_vertex(target)?;
    graph.require_non_negative("dijkstra")?;

    let mut search = DijkstraSearch::new(graph, source);
    while let Some(vertex) = search.step()? {
        if vertex == target {
            break;
        }
    }

    let path = search.result.path_to(target).and_then(|vertices| {
        search
            .result
            .distance(target)
            .map(|distance| Path { distance, vertices })
    });
    Ok(path)
}

/// Single-source shortest paths tolerating negative weights.
///
/// Relaxes every arc for `V - 1` passes (stopping early once a pass
/// changes nothing), then runs one more pass; if anything can still be
/// relaxed, a negative cycle is reachable from `source` and the call
/// fails with [`GraphError::NegativeCycle`]. In an undirected graph
/// every edge is traversable both ways, so a single negative edge is
/// already such a cycle. A tentative distance outside the range of
/// `W` fails with [`GraphError::WeightOverflow`].
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn bellman_ford<W: Weight>(graph: &Graph<W>, source: usize) -> Result<DistanceResult<W>> {
    graph.check_vertex(source)?;

    let arcs: Vec<Edge<W>> = graph.arcs().collect();
    let mut result = DistanceResult::new(graph.vertex_count(), source);

    let relaxation = |result: &DistanceResult<W>, arc: &Edge<W>| -> Result<Option<W>> {
        let reached = match result.distance[arc.from] {
            Some(d) => d,
            None => return Ok(None),
        };
        let candidate = reached.checked_add(arc.weight).ok_or(GraphError::WeightOverflow {
            from: arc.from,
            to: arc.to,
        })?;
        match result.distance[arc.to] {
            Some(current) if current <= candidate => Ok(None),
            _ => Ok(Some(candidate)),
        }
    };

    for pass in 1..graph.vertex_count() {
        let mut changed = false;
        for arc in &arcs {
            if let Some(candidate) = relaxation(&result, arc)? {
                result.distance[arc.to] = Some(candidate);
                result.predecessor[arc.to] = Some(arc.from);
                changed = true;
            }
        }

        trace!(pass, changed, "bellman-ford pass");
        if !changed {
            break;
        }
    }

    for arc in &arcs {
        if relaxation(&result, arc)?.is_some() {
            debug!(from = arc.from, to = arc.to, "edge still relaxable after V - 1 passes");
            return Err(GraphError::NegativeCycle { origin: source });
        }
    }

    Ok(result)
}

/// Dense all-pairs distances with a next-hop table for path
/// reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<W> {
    vertex_count: usize,
    distance: Vec<Option<W>>,
    next: Vec<Option<usize>>,
}

impl<W: Weight> DistanceMatrix<W> {
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn index(&self, from: usize, to: usize) -> Option<usize> {
        if from < self.vertex_count && to < self.vertex_count {
            Some(from * self.vertex_count + to)
        } else {
            None
        }
    }

    /// Distance from `from` to `to`, `None` if unreachable or if
    /// either index is out of range.
    pub fn get(&self, from: usize, to: usize) -> Option<W> {
        self.index(from, to).and_then(|ix| self.distance[ix])
    }

    /// Distances from `from` to every vertex.
    pub fn row(&self, from: usize) -> Option<&[Option<W>]> {
        if from >= self.vertex_count {
            return None;
        }
        let start = from * self.vertex_count;
        Some(&self.distance[start..start + self.vertex_count])
    }

    /// True if some vertex has a negative distance to itself, i.e.
    /// lies on a negative cycle. Distances are not meaningful then.
    pub fn has_negative_cycle(&self) -> bool {
        (0..self.vertex_count).any(|v| self.get(v, v).map_or(false, |d| d.is_negative()))
    }

    /// Reconstructs the route from `from` to `to` via the next-hop
    /// table. `None` if unreachable, or if the walk does not terminate
    /// because of a negative cycle.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        self.get(from, to)?;

        let mut path = vec![from];
        let mut current = from;
        while current != to {
            current = self.next[self.index(current, to)?]?;
            path.push(current);
            if path.len() > self.vertex_count {
                return None;
            }
        }

        Some(path)
    }
}

/// All-pairs shortest paths by the standard triple loop.
///
/// Starts from `0` on the diagonal and the cheapest direct edge for
/// each pair. Negative cycles are not an error here: the matrix is
/// still returned and [`DistanceMatrix::has_negative_cycle`] reports
/// them. Relaxation stops after the first round that leaves a negative
/// diagonal entry. Distances past the range of `W` clamp at its
/// bounds.
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn floyd_warshall<W: Weight>(graph: &Graph<W>) -> DistanceMatrix<W> {
    let n = graph.vertex_count();
    let mut distance = vec![None; n * n];
    let mut next = vec![None; n * n];

    for v in 0..n {
        distance[v * n + v] = Some(W::zero());
        next[v * n + v] = Some(v);
    }

    for arc in graph.arcs() {
        let ix = arc.from * n + arc.to;
        if distance[ix].map_or(true, |current| arc.weight < current) {
            distance[ix] = Some(arc.weight);
            next[ix] = Some(arc.to);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let through = match distance[i * n + k] {
                Some(d) => d,
                None => continue,
            };

            for j in 0..n {
                let candidate = match distance[k * n + j] {
                    Some(rest) => through.saturating_add(rest),
                    None => continue,
                };
                let ix = i * n + j;
                if distance[ix].map_or(true, |current| candidate < current) {
                    distance[ix] = Some(candidate);
                    next[ix] = next[i * n + k];
                }
            }
        }

        if (0..n).any(|v| distance[v * n + v].map_or(false, |d| d.is_negative())) {
            debug!(round = k, "negative cycle found, stopping relaxation");
            break;
        }
    }

    let matrix = DistanceMatrix {
        vertex_count: n,
        distance,
        next,
    };
    debug!(negative_cycle = matrix.has_negative_cycle(), "floyd-warshall finished");
    matrix
}
