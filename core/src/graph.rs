use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Storage capability the traversal and centrality algorithms are written
/// against. Any backend that can enumerate vertices and hand out ordered
/// outgoing lists can be analysed without touching the algorithms.
pub trait GraphStore: Sync {
    type Vertex: Clone + Eq + Hash + Debug + Send + Sync;

    /// Every vertex in the graph: keys plus destinations, deduplicated.
    fn vertices(&self) -> &[Self::Vertex];

    /// Outgoing destinations of `vertex` in insertion order.
    ///
    /// Returns `None` for a vertex outside the vertex set. A vertex that only
    /// ever appeared as a destination yields an empty slice.
    fn neighbors_of(&self, vertex: &Self::Vertex) -> Option<&[Self::Vertex]>;

    /// Insert `vertex` with no outgoing edges unless it already has a list.
    fn add_vertex(&mut self, vertex: Self::Vertex) -> &[Self::Vertex];

    /// Append `dest` to the outgoing list of `source`, creating both
    /// endpoints as needed. Parallel edges are kept.
    fn add_edge(&mut self, source: Self::Vertex, dest: Self::Vertex);

    /// Length of the vertex's own outgoing list, parallel edges included.
    fn out_degree(&self, vertex: &Self::Vertex) -> usize;

    /// Number of distinct vertices whose outgoing list contains `vertex`.
    fn in_degree(&self, vertex: &Self::Vertex) -> usize;

    fn degree(&self, vertex: &Self::Vertex) -> usize {
        self.out_degree(vertex) + self.in_degree(vertex)
    }

    /// Number of vertices.
    fn order(&self) -> usize {
        self.vertices().len()
    }

    /// Number of adjacency entries, parallel edges included.
    fn edge_count(&self) -> usize {
        self.vertices()
            .iter()
            .map(|v| self.neighbors_of(v).map_or(0, |dests| dests.len()))
            .sum()
    }

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool {
        self.neighbors_of(vertex).is_some()
    }

    /// Every `(source, dest)` adjacency entry.
    fn edges(&self) -> Vec<(Self::Vertex, Self::Vertex)> {
        self.vertices()
            .iter()
            .flat_map(|v| {
                self.neighbors_of(v)
                    .unwrap_or(&[])
                    .iter()
                    .map(move |d| (v.clone(), d.clone()))
            })
            .collect()
    }
}

/// Degree breakdown for a single vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeCounts {
    pub out_degree: usize,
    pub in_degree: usize,
    pub total_degree: usize,
}

/// In-memory adjacency store.
///
/// Outgoing lists are keyed by source and kept in key insertion order. The
/// vertex registry is updated on every mutation so `vertices()` never has to
/// rescan the adjacency lists, and a reverse index (destination -> distinct
/// sources) keeps `in_degree` O(1).
#[derive(Debug, Clone)]
pub struct Graph<V> {
    vertices: Vec<V>,
    registered: HashSet<V>,
    outgoing: HashMap<V, Vec<V>>,
    keys: Vec<V>,
    sources: HashMap<V, HashSet<V>>,
}

impl<V> Graph<V>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            registered: HashSet::new(),
            outgoing: HashMap::new(),
            keys: Vec::new(),
            sources: HashMap::new(),
        }
    }

    /// Pre-allocate for a known number of vertices.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            registered: HashSet::with_capacity(vertex_count),
            outgoing: HashMap::with_capacity(vertex_count),
            keys: Vec::with_capacity(vertex_count),
            sources: HashMap::with_capacity(vertex_count),
        }
    }

    pub fn degree_counts(&self, vertex: &V) -> Option<DegreeCounts> {
        if !self.registered.contains(vertex) {
            return None;
        }
        let out_degree = self.out_degree(vertex);
        let in_degree = self.in_degree(vertex);
        Some(DegreeCounts {
            out_degree,
            in_degree,
            total_degree: out_degree + in_degree,
        })
    }

    /// Add `vertex` to the registry if it has not been seen before.
    pub(crate) fn register(&mut self, vertex: &V) {
        if self.registered.insert(vertex.clone()) {
            self.vertices.push(vertex.clone());
        }
    }

    /// Overwrite the outgoing list of `source` wholesale. The key keeps its
    /// original position if it already existed.
    ///
    /// Old destinations that are neither keys nor referenced by any list
    /// afterwards leave the vertex set.
    pub(crate) fn replace_outgoing(&mut self, source: V, dests: Vec<V>) {
        self.register(&source);
        for dest in &dests {
            self.register(dest);
        }

        let old = self.outgoing.remove(&source);
        match &old {
            Some(old) => {
                for dest in old {
                    if let Some(srcs) = self.sources.get_mut(dest) {
                        srcs.remove(&source);
                    }
                }
            }
            None => self.keys.push(source.clone()),
        }

        for dest in &dests {
            self.sources
                .entry(dest.clone())
                .or_default()
                .insert(source.clone());
        }
        self.outgoing.insert(source, dests);

        for dest in old.iter().flatten() {
            self.unregister_if_orphaned(dest);
        }
    }

    fn unregister_if_orphaned(&mut self, vertex: &V) {
        if self.outgoing.contains_key(vertex) {
            return;
        }
        if self.sources.get(vertex).is_some_and(|srcs| !srcs.is_empty()) {
            return;
        }
        self.sources.remove(vertex);
        if self.registered.remove(vertex) {
            self.vertices.retain(|v| v != vertex);
        }
    }
}

impl<V> Default for Graph<V>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> GraphStore for Graph<V>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
{
    type Vertex = V;

    fn vertices(&self) -> &[V] {
        &self.vertices
    }

    fn neighbors_of(&self, vertex: &V) -> Option<&[V]> {
        match self.outgoing.get(vertex) {
            Some(dests) => Some(dests.as_slice()),
            None if self.registered.contains(vertex) => Some(Default::default()),
            None => None,
        }
    }

    fn add_vertex(&mut self, vertex: V) -> &[V] {
        self.register(&vertex);
        let keys = &mut self.keys;
        self.outgoing
            .entry(vertex)
            .or_insert_with_key(|v| {
                keys.push(v.clone());
                Vec::new()
            })
            .as_slice()
    }

    fn add_edge(&mut self, source: V, dest: V) {
        self.add_vertex(source.clone());
        self.add_vertex(dest.clone());
        self.sources
            .entry(dest.clone())
            .or_default()
            .insert(source.clone());
        self.outgoing.entry(source).or_default().push(dest);
    }

    fn out_degree(&self, vertex: &V) -> usize {
        self.outgoing.get(vertex).map_or(0, Vec::len)
    }

    fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    fn in_degree(&self, vertex: &V) -> usize {
        self.sources.get(vertex).map_or(0, HashSet::len)
    }

    /// Edges in key insertion order.
    fn edges(&self) -> Vec<(V, V)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for source in &self.keys {
            if let Some(dests) = self.outgoing.get(source) {
                edges.extend(dests.iter().map(|d| (source.clone(), d.clone())));
            }
        }
        edges
    }
}

impl<V> Extend<(V, V)> for Graph<V>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
{
    fn extend<I: IntoIterator<Item = (V, V)>>(&mut self, iter: I) {
        for (source, dest) in iter {
            self.add_edge(source, dest);
        }
    }
}

impl<V> FromIterator<(V, V)> for Graph<V>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
{
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}
