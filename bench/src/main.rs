use std::time::Instant;

use digraph_metrics_core::{
    betweenness_centrality, closeness_centrality, degree_centrality, load_centrality,
    shortest_path, shortest_path_lengths, top_n, Graph, GraphStore, Scores,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: digraph-metrics-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run every generator (default)");
        println!("  random      Uniform random arcs, traffic spread evenly");
        println!("  smallworld  Successor ring with occasional random jumps");
        println!("  barbell     Two clusters joined by a one-way chain");
        println!();
        println!("Default node_count: 2000 (centrality is O(V * E))");
        println!("Set RUST_LOG=debug for per-measure timings from the library.");
        return;
    }

    if node_count < 2 {
        warn!(node_count, "need at least 2 nodes");
        return;
    }

    let generators: Vec<(&str, fn(u64) -> Graph<u64>)> = match mode {
        "random" => vec![("random", gen_random)],
        "smallworld" => vec![("small-world", gen_small_world)],
        "barbell" => vec![("barbell", gen_barbell)],
        "all" => vec![
            ("random", gen_random as fn(u64) -> Graph<u64>),
            ("small-world", gen_small_world),
            ("barbell", gen_barbell),
        ],
        _ => {
            warn!(mode, "unknown mode, use --help for options");
            return;
        }
    };

    info!(mode, node_count, "digraph-metrics-bench");
    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph<u64>, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.2}s: {} nodes, {} edges",
        t.elapsed().as_secs_f64(),
        graph.order(),
        graph.edge_count(),
    );

    let t = Instant::now();
    match shortest_path_lengths(&graph, &0) {
        Ok(levels) => println!(
            "BFS from 0: reached {} nodes, max depth {} in {:.1}ms",
            levels.len(),
            levels.values().max().copied().unwrap_or(0),
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Err(e) => warn!(error = %e, "bfs failed"),
    }

    let far_node = graph.order() as u64 - 1;
    let t = Instant::now();
    match shortest_path(&graph, &0, &far_node) {
        Ok(Some(p)) => println!(
            "Shortest path 0 -> {}: {} hops in {:.1}ms",
            far_node,
            p.len() - 1,
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Ok(None) => println!(
            "Shortest path 0 -> {}: no path ({:.1}ms)",
            far_node,
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Err(e) => warn!(error = %e, "shortest path failed"),
    }

    println!();
    println!("{:>12} {:>10}   top 5", "measure", "time");
    println!("{:->12} {:->10}   {:->40}", "", "", "");

    let t = Instant::now();
    match degree_centrality(&graph) {
        Ok(scores) => report("degree", &scores, t),
        Err(e) => warn!(error = %e, "degree centrality failed"),
    }

    let t = Instant::now();
    let scores = closeness_centrality(&graph);
    report("closeness", &scores, t);

    let t = Instant::now();
    let scores = betweenness_centrality(&graph);
    report("betweenness", &scores, t);

    let t = Instant::now();
    let scores = load_centrality(&graph);
    report("load", &scores, t);

    println!();
}

fn report(measure: &str, scores: &Scores<u64>, started: Instant) {
    let elapsed = started.elapsed();
    let top: Vec<String> = top_n(scores, 5)
        .into_iter()
        .map(|(v, s)| format!("{}={:.3}", v, s))
        .collect();
    println!(
        "{:>12} {:>8.1}ms   {}",
        measure,
        elapsed.as_secs_f64() * 1000.0,
        top.join(" ")
    );
}

// ---------------------------------------------------------------------------
// Generators: deterministic, seeded, shaped to spread or concentrate
// shortest-path traffic
// ---------------------------------------------------------------------------

/// xorshift64* stream; reproducible across runs for a fixed seed.
struct XorShift {
    state: u64,
}

impl XorShift {
    fn seeded(seed: u64) -> Self {
        Self { state: seed | 1 }
    }

    fn step(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.step() % bound
    }

    fn chance(&mut self, p: f64) -> bool {
        ((self.step() >> 11) as f64) < p * (1u64 << 53) as f64
    }
}

/// Ids `0..n` registered in order, so the far node used for the path timing
/// is always `n - 1` even when it ends up isolated.
fn isolated(n: u64) -> Graph<u64> {
    (0..n).fold(Graph::with_capacity(n as usize), |mut graph, id| {
        graph.add_vertex(id);
        graph
    })
}

/// Uniform random arcs, four per vertex on average. Traffic spreads out, so
/// no vertex stands far above the rest.
fn gen_random(n: u64) -> Graph<u64> {
    let mut graph = isolated(n);
    let mut rng = XorShift::seeded(0x5eed_0001);
    for _ in 0..n * 4 {
        let (from, to) = (rng.below(n), rng.below(n));
        if from != to {
            graph.add_edge(from, to);
        }
    }
    graph
}

/// Directed ring where each vertex points at its next four successors; one
/// arc in twenty jumps to a random vertex instead.
fn gen_small_world(n: u64) -> Graph<u64> {
    let mut graph = isolated(n);
    let mut rng = XorShift::seeded(0x5eed_0002);
    for id in 0..n {
        for hop in 1..=4 {
            let mut target = (id + hop) % n;
            if rng.chance(0.05) {
                let jump = rng.below(n);
                if jump != id {
                    target = jump;
                }
            }
            graph.add_edge(id, target);
        }
    }
    graph
}

/// Two sparse-but-dense clusters with a one-way chain between them. Every
/// pair split across the clusters routes through the chain.
fn gen_barbell(n: u64) -> Graph<u64> {
    let chain = (n / 2).min(10);
    let cluster = (n - chain) / 2;
    let right = cluster + chain;
    let mut graph = isolated(n);
    let mut rng = XorShift::seeded(0x5eed_0003);

    for offset in [0, right] {
        let fanout = cluster.saturating_sub(1).min(5);
        for local in 0..cluster {
            for _ in 0..fanout {
                let other = rng.below(cluster);
                if other != local {
                    graph.add_edge(offset + local, offset + other);
                }
            }
        }
    }

    if cluster > 0 {
        let path: Vec<u64> = std::iter::once(cluster - 1)
            .chain(cluster..right)
            .chain(std::iter::once(right))
            .collect();
        for pair in path.windows(2) {
            graph.add_edge(pair[0], pair[1]);
        }
    }

    graph
}
