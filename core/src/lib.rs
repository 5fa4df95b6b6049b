//! digraph-metrics-core: In-memory directed graph analysis.
//!
//! A pure Rust library that stores a directed graph as ordered outgoing
//! adjacency lists and computes BFS shortest paths plus four centrality
//! measures: betweenness (Brandes), closeness, degree and load.
//!
//! The algorithms are free functions over the [`GraphStore`] trait, so an
//! alternative storage backend can be analysed without changes. [`Graph`] is
//! the bundled backend. Enable the `parallel` feature to spread the
//! per-source loops over rayon's thread pool.

mod centrality;
mod error;
mod graph;
mod load;
mod traversal;

pub use centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, load_centrality, top_n,
    Scores,
};
pub use error::{GraphError, Result};
pub use graph::{DegreeCounts, Graph, GraphStore};
pub use traversal::{shortest_path, shortest_path_lengths, shortest_paths, ShortestPaths};
