//! Per-invocation working state shared by the engines. Nothing here
//! outlives a single algorithm call.

use std::cmp::Ordering;

use crate::weight::Weight;

/// Union-find over `0..len` with path compression and union by rank.
///
/// Elements are plain indices and must lie in `0..len`; use
/// [`DisjointSet::contains`] to check one coming from outside.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<usize>,
    sets: usize,
}

impl DisjointSet {
    pub fn new(len: usize) -> DisjointSet {
        DisjointSet {
            parent: (0..len).collect(),
            rank: vec![0; len],
            sets: len,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn contains(&self, x: usize) -> bool {
        x < self.parent.len()
    }

    /// Number of disjoint sets currently in the partition.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Returns the representative of `x`'s set, repointing every node
    /// on the way directly at the root.
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.len()`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merges the sets containing `a` and `b`. Returns false, leaving
    /// the partition untouched, if they already share a set.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= self.len()`.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => self.parent[root_a] = root_b,
            Ordering::Greater => self.parent[root_b] = root_a,
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }

        self.sets -= 1;
        true
    }

    /// # Panics
    ///
    /// Panics if either index is `>= self.len()`.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

/// A tentative entry in a lazily-deleted priority frontier.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed: the entry
/// with the smallest `key` pops first, and among equal keys the one
/// with the smallest `tie`. Entries are never removed or updated in
/// place; a vertex that is already finalized when one of its entries
/// pops is skipped.
#[derive(Debug, Clone, Copy)]
pub struct FrontierEntry<W> {
    pub key: W,
    pub tie: usize,
    pub vertex: usize,
}

impl<W: Weight> PartialEq for FrontierEntry<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for FrontierEntry<W> {}

impl<W: Weight> PartialOrd for FrontierEntry<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for FrontierEntry<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // weights stored in a graph are never NaN
        other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.tie.cmp(&self.tie))
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}
