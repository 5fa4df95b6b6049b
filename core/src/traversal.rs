use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::error::{GraphError, Result};
use crate::graph::GraphStore;

/// Shortest-path tree from a single source with every shortest-path parent
/// recorded per vertex.
#[derive(Debug, Clone)]
pub struct ShortestPaths<V> {
    /// All vertices one level closer to the source with an edge into the
    /// key, once per edge. The source maps to an empty list.
    pub predecessors: HashMap<V, Vec<V>>,
    /// Hop distance of every reachable vertex. Unreachable vertices are absent.
    pub distances: HashMap<V, usize>,
    /// Reachable vertices in discovery order (non-decreasing distance).
    pub discovered: Vec<V>,
}

impl<V> ShortestPaths<V> {
    pub fn into_parts(self) -> (HashMap<V, Vec<V>>, HashMap<V, usize>) {
        (self.predecessors, self.distances)
    }
}

fn ensure_known<G: GraphStore>(graph: &G, vertex: &G::Vertex) -> Result<()> {
    if graph.contains_vertex(vertex) {
        Ok(())
    } else {
        Err(GraphError::unknown(vertex))
    }
}

/// Hop distance from `source` to every vertex it can reach, itself included
/// at distance 0.
pub fn shortest_path_lengths<G: GraphStore>(
    graph: &G,
    source: &G::Vertex,
) -> Result<HashMap<G::Vertex, usize>> {
    ensure_known(graph, source)?;
    Ok(levels_from(graph, source))
}

/// Multi-predecessor BFS from `source`.
pub fn shortest_paths<G: GraphStore>(
    graph: &G,
    source: &G::Vertex,
) -> Result<ShortestPaths<G::Vertex>> {
    ensure_known(graph, source)?;
    Ok(predecessors_from(graph, source))
}

/// One shortest path from `source` to `target`, both endpoints included.
///
/// Follows the first parent that discovered each vertex. Returns `Ok(None)`
/// when `target` is unreachable.
pub fn shortest_path<G: GraphStore>(
    graph: &G,
    source: &G::Vertex,
    target: &G::Vertex,
) -> Result<Option<Vec<G::Vertex>>> {
    ensure_known(graph, source)?;
    ensure_known(graph, target)?;

    if source == target {
        return Ok(Some(vec![source.clone()]));
    }

    // Sentinel: the source is its own parent
    let mut parent: HashMap<G::Vertex, G::Vertex> = HashMap::new();
    let mut queue: VecDeque<G::Vertex> = VecDeque::new();
    parent.insert(source.clone(), source.clone());
    queue.push_back(source.clone());

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbors_of(&current).unwrap_or(&[]) {
            if parent.contains_key(next) {
                continue;
            }
            parent.insert(next.clone(), current.clone());
            if next == target {
                return Ok(Some(reconstruct_path(&parent, source, target)));
            }
            queue.push_back(next.clone());
        }
    }

    Ok(None)
}

fn reconstruct_path<V: Clone + Eq + std::hash::Hash>(
    parent: &HashMap<V, V>,
    source: &V,
    target: &V,
) -> Vec<V> {
    let mut path = vec![target.clone()];
    let mut current = target;
    while current != source {
        match parent.get(current) {
            Some(p) => {
                path.push(p.clone());
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Level-synchronous BFS. A vertex gets its level the first time it is seen.
pub(crate) fn levels_from<G: GraphStore>(
    graph: &G,
    source: &G::Vertex,
) -> HashMap<G::Vertex, usize> {
    let mut seen: HashMap<G::Vertex, usize> = HashMap::new();
    seen.insert(source.clone(), 0);

    let mut level = 0;
    let mut frontier = vec![source.clone()];
    while !frontier.is_empty() {
        level += 1;
        let mut next_level = Vec::new();
        for v in &frontier {
            for w in graph.neighbors_of(v).unwrap_or(&[]) {
                if !seen.contains_key(w) {
                    seen.insert(w.clone(), level);
                    next_level.push(w.clone());
                }
            }
        }
        frontier = next_level;
    }

    trace!(source = ?source, reached = seen.len(), "bfs levels");
    seen
}

/// Level-synchronous BFS that keeps every same-level parent, not just the
/// first one. Later discoveries at the same level only extend the
/// predecessor list; the vertex is expanded once.
pub(crate) fn predecessors_from<G: GraphStore>(
    graph: &G,
    source: &G::Vertex,
) -> ShortestPaths<G::Vertex> {
    let mut distances: HashMap<G::Vertex, usize> = HashMap::new();
    let mut predecessors: HashMap<G::Vertex, Vec<G::Vertex>> = HashMap::new();
    let mut discovered = vec![source.clone()];
    distances.insert(source.clone(), 0);
    predecessors.insert(source.clone(), Vec::new());

    let mut level = 0;
    let mut frontier = vec![source.clone()];
    while !frontier.is_empty() {
        level += 1;
        let mut next_level = Vec::new();
        for v in &frontier {
            for w in graph.neighbors_of(v).unwrap_or(&[]) {
                match distances.get(w) {
                    None => {
                        distances.insert(w.clone(), level);
                        predecessors.insert(w.clone(), vec![v.clone()]);
                        discovered.push(w.clone());
                        next_level.push(w.clone());
                    }
                    Some(&d) if d == level => {
                        predecessors.entry(w.clone()).or_default().push(v.clone());
                    }
                    Some(_) => {}
                }
            }
        }
        frontier = next_level;
    }

    trace!(source = ?source, reached = distances.len(), "bfs predecessors");
    ShortestPaths {
        predecessors,
        distances,
        discovered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn make_chain(n: u64) -> Graph<u64> {
        (0..n - 1).map(|i| (i, i + 1)).collect()
    }

    fn make_cycle(n: u64) -> Graph<u64> {
        (0..n).map(|i| (i, (i + 1) % n)).collect()
    }

    fn make_diamond() -> Graph<u64> {
        // 0→1→3, 0→2→3, 3→4
        vec![(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)].into_iter().collect()
    }

    // --- shortest_path_lengths ---

    #[test]
    fn test_lengths_chain() {
        let g = make_chain(6);
        let levels = shortest_path_lengths(&g, &0).unwrap();
        assert_eq!(levels.len(), 6);
        assert_eq!(levels[&0], 0);
        assert_eq!(levels[&5], 5);
    }

    #[test]
    fn test_lengths_directed_only() {
        let g = make_chain(4);
        let levels = shortest_path_lengths(&g, &2).unwrap();
        // 0 and 1 are upstream and unreachable
        assert_eq!(levels.len(), 2);
        assert!(!levels.contains_key(&0));
        assert_eq!(levels[&3], 1);
    }

    #[test]
    fn test_lengths_cycle_no_infinite_loop() {
        let g = make_cycle(5);
        let levels = shortest_path_lengths(&g, &0).unwrap();
        assert_eq!(levels.len(), 5);
        assert_eq!(levels[&4], 4);
    }

    #[test]
    fn test_lengths_self_loop() {
        let g: Graph<u64> = vec![(0, 0)].into_iter().collect();
        let levels = shortest_path_lengths(&g, &0).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[&0], 0);
    }

    #[test]
    fn test_lengths_sink_source() {
        let g = make_chain(3);
        let levels = shortest_path_lengths(&g, &2).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[&2], 0);
    }

    #[test]
    fn test_lengths_unknown_source() {
        let g = make_chain(3);
        let err = shortest_path_lengths(&g, &999).unwrap_err();
        assert!(matches!(err, GraphError::UnknownVertex(ref s) if s == "999"));
    }

    // --- shortest_paths ---

    #[test]
    fn test_predecessors_collect_all_parents() {
        let g = make_diamond();
        let sp = shortest_paths(&g, &0).unwrap();
        assert_eq!(sp.distances[&3], 2);
        assert_eq!(sp.predecessors[&3], vec![1, 2]);
        assert_eq!(sp.predecessors[&4], vec![3]);
        assert!(sp.predecessors[&0].is_empty());
    }

    #[test]
    fn test_predecessors_skip_longer_edges() {
        // 0→1→2 and 0→2: 2 sits at level 1, 1 is not its predecessor
        let g: Graph<u64> = vec![(0, 1), (1, 2), (0, 2)].into_iter().collect();
        let sp = shortest_paths(&g, &0).unwrap();
        assert_eq!(sp.distances[&2], 1);
        assert_eq!(sp.predecessors[&2], vec![0]);
    }

    #[test]
    fn test_predecessors_parallel_edges() {
        let g: Graph<u64> = vec![(0, 1), (0, 1)].into_iter().collect();
        let sp = shortest_paths(&g, &0).unwrap();
        assert_eq!(sp.predecessors[&1], vec![0, 0]);
    }

    #[test]
    fn test_discovered_is_level_ordered() {
        let g = make_diamond();
        let sp = shortest_paths(&g, &0).unwrap();
        assert_eq!(sp.discovered, vec![0, 1, 2, 3, 4]);
        for w in sp.discovered.windows(2) {
            assert!(sp.distances[&w[0]] <= sp.distances[&w[1]]);
        }
    }

    #[test]
    fn test_into_parts() {
        let g = make_chain(3);
        let (pred, dist) = shortest_paths(&g, &0).unwrap().into_parts();
        assert_eq!(pred[&2], vec![1]);
        assert_eq!(dist[&2], 2);
    }

    #[test]
    fn test_shortest_paths_unknown_source() {
        let g = make_chain(3);
        assert!(shortest_paths(&g, &42).is_err());
    }

    // --- shortest_path ---

    #[test]
    fn test_shortest_path_chain() {
        let g = make_chain(6);
        let path = shortest_path(&g, &0, &5).unwrap().unwrap();
        assert_eq!(path, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shortest_path_self() {
        let g = make_chain(3);
        assert_eq!(shortest_path(&g, &1, &1).unwrap(), Some(vec![1]));
    }

    #[test]
    fn test_shortest_path_first_parent() {
        let g = make_diamond();
        let path = shortest_path(&g, &0, &4).unwrap().unwrap();
        assert_eq!(path, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_shortest_path_unreachable() {
        let g = make_chain(4);
        assert_eq!(shortest_path(&g, &3, &0).unwrap(), None);
    }

    #[test]
    fn test_shortest_path_unknown_target() {
        let g = make_chain(3);
        assert!(shortest_path(&g, &0, &999).is_err());
    }
}
