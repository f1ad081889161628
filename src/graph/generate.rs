//! Seeded random problem generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Graph;

/// Generates a connected random graph and random package pairs.
///
/// The graph is a random spanning tree (every vertex `v > 0` links to a
/// random earlier vertex) plus every other vertex pair with probability
/// `edge_probability`. Weights are whole numbers in `1..=100`. Each package
/// gets a source and a distinct destination, so `vertices` must be at least
/// 2 when `packages > 0`.
///
/// The same seed always yields the same problem.
///
/// # Examples
///
/// ```
/// use u_delivery::graph::random_problem;
///
/// let (g, pairs) = random_problem(8, 3, 0.2, 42);
/// assert_eq!(g.vertex_count(), 8);
/// assert_eq!(pairs.len(), 3);
/// assert!(pairs.iter().all(|&(s, d)| s != d && s < 8 && d < 8));
/// assert_eq!(random_problem(8, 3, 0.2, 42), (g, pairs));
/// ```
pub fn random_problem(
    vertices: usize,
    packages: usize,
    edge_probability: f64,
    seed: u64,
) -> (Graph, Vec<(usize, usize)>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new(vertices);
    let p = if edge_probability.is_nan() {
        0.0
    } else {
        edge_probability.clamp(0.0, 1.0)
    };

    for v in 1..vertices {
        let u = rng.random_range(0..v);
        graph.insert_edge(u, v, random_weight(&mut rng));
    }
    for u in 0..vertices {
        for v in (u + 1)..vertices {
            if graph.weight(u, v).is_none() && rng.random_bool(p) {
                graph.insert_edge(u, v, random_weight(&mut rng));
            }
        }
    }

    let pairs = if vertices < 2 {
        Vec::new()
    } else {
        (0..packages)
            .map(|_| {
                let source = rng.random_range(0..vertices);
                // Shift past the source to keep destinations distinct.
                let offset = rng.random_range(1..vertices);
                (source, (source + offset) % vertices)
            })
            .collect()
    };

    (graph, pairs)
}

fn random_weight(rng: &mut StdRng) -> f64 {
    rng.random_range(1..=100u32) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ShortestPaths;

    #[test]
    fn test_deterministic_per_seed() {
        let a = random_problem(12, 4, 0.25, 7);
        let b = random_problem(12, 4, 0.25, 7);
        let c = random_problem(12, 4, 0.25, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_graph_is_connected() {
        for seed in 0..20 {
            let (g, _) = random_problem(10, 2, 0.0, seed);
            assert_eq!(g.edge_count(), 9);
            let sp = ShortestPaths::floyd_warshall(&g);
            assert!((0..10).all(|v| sp.cost(0, v).is_finite()));
        }
    }

    #[test]
    fn test_weights_in_range() {
        let (g, _) = random_problem(15, 0, 0.5, 3);
        assert!(g
            .edges()
            .all(|(_, _, w)| (1.0..=100.0).contains(&w) && w.fract() == 0.0));
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(Graph::from_edges(15, &edges).map(|h| h.edge_count()), Ok(g.edge_count()));
    }

    #[test]
    fn test_degenerate_sizes() {
        let (g, pairs) = random_problem(1, 3, 0.5, 1);
        assert_eq!(g.vertex_count(), 1);
        assert!(pairs.is_empty());
    }
}
