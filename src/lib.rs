pub mod error;
pub mod graph;
pub mod input;
pub mod shortest_path;
pub mod spanning_tree;
pub mod state;
pub mod traversal;
pub mod weight;

pub use error::{GraphError, LoadError, Result};
pub use graph::{Edge, Graph};
pub use shortest_path::{
    bellman_ford, dijkstra, floyd_warshall, shortest_path, DistanceMatrix, DistanceResult, Path,
};
pub use spanning_tree::{kruskal_mst, prim_mst, MSTResult};
pub use state::DisjointSet;
pub use traversal::{bfs, connected_components, dfs, TraversalResult};
pub use weight::Weight;
