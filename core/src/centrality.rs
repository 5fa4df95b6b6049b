use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::Instant;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::GraphStore;
use crate::traversal::{levels_from, predecessors_from};

/// Per-vertex centrality scores. Every vertex of the graph has an entry.
pub type Scores<V> = HashMap<V, f64>;

fn value_or_zero<V: Eq + Hash>(map: &HashMap<V, f64>, key: &V) -> f64 {
    map.get(key).copied().unwrap_or(0.0)
}

fn zeroed<G: GraphStore>(graph: &G) -> Scores<G::Vertex> {
    graph.vertices().iter().map(|v| (v.clone(), 0.0)).collect()
}

fn merge_into<V: Eq + Hash>(total: &mut Scores<V>, part: Scores<V>) {
    for (v, score) in part {
        *total.entry(v).or_insert(0.0) += score;
    }
}

/// Run `per_source` from every vertex and add the contributions per vertex.
///
/// With the `parallel` feature the sources are spread over rayon's pool; the
/// reduction is plain addition so the result only moves by rounding.
fn sum_over_sources<G, F>(graph: &G, per_source: F) -> Scores<G::Vertex>
where
    G: GraphStore,
    F: Fn(&G::Vertex) -> Scores<G::Vertex> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        graph
            .vertices()
            .par_iter()
            .map(|s| per_source(s))
            .reduce(
                || zeroed(graph),
                |mut acc, part| {
                    merge_into(&mut acc, part);
                    acc
                },
            )
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut total = zeroed(graph);
        for s in graph.vertices() {
            merge_into(&mut total, per_source(s));
        }
        total
    }
}

fn score_each_vertex<G, F>(graph: &G, score: F) -> Scores<G::Vertex>
where
    G: GraphStore,
    F: Fn(&G::Vertex) -> f64 + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        graph
            .vertices()
            .par_iter()
            .map(|v| (v.clone(), score(v)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        graph
            .vertices()
            .iter()
            .map(|v| (v.clone(), score(v)))
            .collect()
    }
}

/// `degree(v) / (order - 1)` for every vertex.
///
/// Fails with `DegenerateGraph` when the graph has fewer than two vertices;
/// unlike closeness there is no zero fallback.
pub fn degree_centrality<G: GraphStore>(graph: &G) -> Result<Scores<G::Vertex>> {
    let order = graph.order();
    if order <= 1 {
        return Err(GraphError::DegenerateGraph { order });
    }

    debug!(order, edges = graph.edge_count(), "degree centrality");
    let scale = 1.0 / (order - 1) as f64;
    Ok(graph
        .vertices()
        .iter()
        .map(|v| (v.clone(), graph.degree(v) as f64 * scale))
        .collect())
}

/// Closeness with the Wasserman-Faust correction: a vertex that reaches only
/// a few others is scaled down by the fraction of the graph it reaches.
/// Vertices that reach nothing score 0.
pub fn closeness_centrality<G: GraphStore>(graph: &G) -> Scores<G::Vertex> {
    let t = Instant::now();
    let order = graph.order();
    debug!(order, edges = graph.edge_count(), "closeness centrality: start");

    let scores = score_each_vertex(graph, |v| {
        let levels = levels_from(graph, v);
        let total: usize = levels.values().sum();
        if total > 0 && order > 1 {
            let others = (levels.len() - 1) as f64;
            (others / total as f64) * (others / (order - 1) as f64)
        } else {
            0.0
        }
    });

    debug!(
        order,
        edges = graph.edge_count(),
        elapsed_ms = t.elapsed().as_secs_f64() * 1000.0,
        "closeness centrality: done"
    );
    scores
}

/// Brandes' betweenness for directed graphs, unnormalized.
pub fn betweenness_centrality<G: GraphStore>(graph: &G) -> Scores<G::Vertex> {
    let t = Instant::now();
    debug!(order = graph.order(), edges = graph.edge_count(), "betweenness centrality: start");
    let scores = sum_over_sources(graph, |s| brandes_dependencies(graph, s));
    debug!(
        order = graph.order(),
        edges = graph.edge_count(),
        elapsed_ms = t.elapsed().as_secs_f64() * 1000.0,
        "betweenness centrality: done"
    );
    scores
}

/// Dependency of `source` on every other vertex it reaches.
fn brandes_dependencies<G: GraphStore>(graph: &G, source: &G::Vertex) -> Scores<G::Vertex> {
    let mut stack: Vec<G::Vertex> = Vec::new();
    let mut preds: HashMap<G::Vertex, Vec<G::Vertex>> = HashMap::new();
    let mut sigma: HashMap<G::Vertex, f64> = HashMap::new();
    let mut dist: HashMap<G::Vertex, usize> = HashMap::new();
    let mut queue: VecDeque<G::Vertex> = VecDeque::new();

    sigma.insert(source.clone(), 1.0);
    dist.insert(source.clone(), 0);
    queue.push_back(source.clone());

    while let Some(v) = queue.pop_front() {
        let next = dist[&v] + 1;
        let sigma_v = value_or_zero(&sigma, &v);

        for w in graph.neighbors_of(&v).unwrap_or(&[]) {
            if !dist.contains_key(w) {
                dist.insert(w.clone(), next);
                queue.push_back(w.clone());
            }
            if dist[w] == next {
                *sigma.entry(w.clone()).or_insert(0.0) += sigma_v;
                preds.entry(w.clone()).or_default().push(v.clone());
            }
        }
        stack.push(v);
    }

    // Pop in reverse discovery order: a vertex's dependency is final once
    // every vertex farther from the source has been popped.
    let mut delta: HashMap<G::Vertex, f64> = HashMap::new();
    let mut dependencies: Scores<G::Vertex> = HashMap::with_capacity(stack.len());
    while let Some(w) = stack.pop() {
        let delta_w = value_or_zero(&delta, &w);
        let coeff = (1.0 + delta_w) / value_or_zero(&sigma, &w);
        if let Some(ps) = preds.get(&w) {
            for v in ps {
                *delta.entry(v.clone()).or_insert(0.0) += value_or_zero(&sigma, v) * coeff;
            }
        }
        if w != *source {
            dependencies.insert(w, delta_w);
        }
    }
    dependencies
}

/// Load centrality: each reachable vertex pushes one unit of flow back
/// towards the source, split evenly across its shortest-path predecessors.
pub fn load_centrality<G: GraphStore>(graph: &G) -> Scores<G::Vertex> {
    let t = Instant::now();
    debug!(order = graph.order(), edges = graph.edge_count(), "load centrality: start");
    let scores = sum_over_sources(graph, |s| load_contributions(graph, s));
    debug!(
        order = graph.order(),
        edges = graph.edge_count(),
        elapsed_ms = t.elapsed().as_secs_f64() * 1000.0,
        "load centrality: done"
    );
    scores
}

fn load_contributions<G: GraphStore>(graph: &G, source: &G::Vertex) -> Scores<G::Vertex> {
    let sp = predecessors_from(graph, source);
    let mut between: Scores<G::Vertex> = sp.distances.keys().map(|v| (v.clone(), 1.0)).collect();

    // `discovered` is already in ascending distance order; walk it backwards.
    for v in sp.discovered.iter().rev() {
        let Some(preds) = sp.predecessors.get(v) else {
            continue;
        };
        let share = value_or_zero(&between, v) / preds.len() as f64;
        for x in preds {
            // Meeting the source ends the whole list, not just this entry.
            if x == source {
                break;
            }
            if let Some(b) = between.get_mut(x) {
                *b += share;
            }
        }
    }

    for b in between.values_mut() {
        *b -= 1.0;
    }
    between
}

/// Highest-scoring vertices first, ties broken by ascending vertex.
/// `n == 0` returns every vertex.
pub fn top_n<V: Clone + Ord>(scores: &Scores<V>, n: usize) -> Vec<(V, f64)> {
    let mut ranked: Vec<(V, f64)> = scores.iter().map(|(v, &s)| (v.clone(), s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if n > 0 && n < ranked.len() {
        ranked.truncate(n);
    }
    ranked
}
