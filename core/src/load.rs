//! Bulk construction from adjacency and edge-list descriptions.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::graph::{Graph, GraphStore};

impl<V> Graph<V>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
{
    /// Load an adjacency description verbatim.
    ///
    /// A repeated key replaces the earlier list (no merging) but keeps its
    /// original position. Destinations that never appear as keys still
    /// become vertices.
    pub fn from_adjacency<I>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (V, Vec<V>)>,
    {
        let mut graph = Graph::new();
        for (source, dests) in adjacency {
            graph.replace_outgoing(source, dests);
        }
        debug!(
            vertices = graph.order(),
            edges = graph.edge_count(),
            "loaded adjacency description"
        );
        graph
    }

    /// Fold an edge list into a graph, preserving first-seen source order.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let graph: Graph<V> = edges.into_iter().collect();
        debug!(
            vertices = graph.order(),
            edges = graph.edge_count(),
            "loaded edge list"
        );
        graph
    }
}

impl<V> Graph<V>
where
    V: Clone + Eq + Hash + Debug + Send + Sync + DeserializeOwned,
{
    /// Parse `[[source, dest], ...]`.
    pub fn from_edge_list_json(json: &str) -> Result<Self> {
        let edges: Vec<(V, V)> = serde_json::from_str(json)?;
        Ok(Self::from_edges(edges))
    }
}

impl Graph<String> {
    /// Parse `{"a": ["b", "c"], ...}`.
    ///
    /// JSON objects carry no reliable key order, so keys are loaded sorted;
    /// use [`Graph::from_adjacency`] when key order matters.
    pub fn from_adjacency_json(json: &str) -> Result<Self> {
        let adjacency: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut entries: Vec<(String, Vec<String>)> = adjacency.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Self::from_adjacency(entries))
    }
}
