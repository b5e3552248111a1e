//! Breadth-first and depth-first traversal, and connected components.

use std::collections::VecDeque;

use fxhash::FxHashMap;
use tracing::debug;

use crate::error::Result;
use crate::graph::Graph;
use crate::state::DisjointSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalResult {
    pub start: usize,
    /// Vertices in the order they were visited.
    pub order: Vec<usize>,
    pub visited: Vec<bool>,
    /// The vertex each visited vertex was discovered from.
    pub parent: Vec<Option<usize>>,
}

impl TraversalResult {
    fn new(vertex_count: usize, start: usize) -> Self {
        TraversalResult {
            start,
            order: Vec::new(),
            visited: vec![false; vertex_count],
            parent: vec![None; vertex_count],
        }
    }

    pub fn is_visited(&self, v: usize) -> bool {
        self.visited.get(v).copied().unwrap_or(false)
    }

    /// Walks the traversal tree from `target` back to the start. For a
    /// breadth-first result this is a path with the fewest edges.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_visited(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.start {
            current = self.parent[current]?;
            path.push(current);
        }

        path.reverse();
        Some(path)
    }
}

/// Breadth-first traversal from `start`. Every vertex is enqueued at
/// most once; `order` is the dequeue order.
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count()))]
pub fn bfs<W: Copy>(graph: &Graph<W>, start: usize) -> Result<TraversalResult> {
    graph.check_vertex(start)?;

    let mut result = TraversalResult::new(graph.vertex_count(), start);
    let mut queue = VecDeque::new();

    result.visited[start] = true;
    queue.push_back(start);

    while let Some(v) = queue.pop_front() {
        result.order.push(v);

        for (to, _) in graph.neighbors(v) {
            if !result.visited[to] {
                result.visited[to] = true;
                result.parent[to] = Some(v);
                queue.push_back(to);
            }
        }
    }

    debug!(visited = result.order.len(), "bfs finished");
    Ok(result)
}

/// Depth-first traversal from `start`, reporting vertices in
/// pre-order discovery.
///
/// Uses an explicit stack instead of recursion, so the depth of the
/// graph is not bounded by the call stack. Neighbors are pushed in
/// reverse and a vertex is only marked when popped, which yields the
/// same order as the recursive formulation.
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count()))]
pub fn dfs<W: Copy>(graph: &Graph<W>, start: usize) -> Result<TraversalResult> {
    graph.check_vertex(start)?;

    let mut result = TraversalResult::new(graph.vertex_count(), start);
    let mut stack: Vec<(usize, Option<usize>)> = vec![(start, None)];

    while let Some((v, parent)) = stack.pop() {
        if result.visited[v] {
            continue;
        }

        result.visited[v] = true;
        result.parent[v] = parent;
        result.order.push(v);

        graph
            .neighbors(v)
            .rev()
            .filter(|&(to, _)| !result.visited[to])
            .for_each(|(to, _)| stack.push((to, Some(v))));
    }

    debug!(visited = result.order.len(), "dfs finished");
    Ok(result)
}

/// Partitions the vertices into connected components, ignoring edge
/// direction. Components are listed by their smallest vertex, and
/// each component's vertices are ascending.
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn connected_components<W: Copy>(graph: &Graph<W>) -> Vec<Vec<usize>> {
    let mut set = DisjointSet::new(graph.vertex_count());
    for edge in graph.edges() {
        set.union(edge.from, edge.to);
    }

    let mut index_of_root: FxHashMap<usize, usize> = FxHashMap::default();
    let mut components: Vec<Vec<usize>> = Vec::with_capacity(set.set_count());

    for v in 0..graph.vertex_count() {
        let root = set.find(v);
        let ix = *index_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[ix].push(v);
    }

    debug!(components = components.len(), "connected components");
    components
}
