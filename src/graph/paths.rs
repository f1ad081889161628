//! All-pairs shortest paths (Floyd–Warshall) with path reconstruction.
//!
//! # Complexity
//!
//! O(n³) time and O(n²) memory where n = number of vertices. Computed once
//! per problem instance before search begins.

use super::{DistanceMatrix, Graph};

/// All-pairs shortest path costs plus a next-hop table.
///
/// # Examples
///
/// ```
/// use u_delivery::graph::{Graph, ShortestPaths};
///
/// let g = Graph::from_edges(3, &[(0, 1, 10.0), (0, 2, 30.0), (1, 2, 5.0)]).unwrap();
/// let sp = ShortestPaths::floyd_warshall(&g);
/// assert_eq!(sp.cost(0, 2), 15.0);
/// assert_eq!(sp.path(0, 2), Some(vec![0, 1, 2]));
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    costs: DistanceMatrix,
    next: Vec<Option<usize>>,
    size: usize,
}

impl ShortestPaths {
    /// Runs Floyd–Warshall over the graph.
    pub fn floyd_warshall(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let mut costs = DistanceMatrix::filled(n, f64::INFINITY);
        let mut next = vec![None; n * n];

        for v in 0..n {
            next[v * n + v] = Some(v);
        }
        for (u, v, w) in graph.edges() {
            costs.set(u, v, w);
            costs.set(v, u, w);
            next[u * n + v] = Some(v);
            next[v * n + u] = Some(u);
        }

        for k in 0..n {
            for i in 0..n {
                let ik = costs.get(i, k);
                if ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let through = ik + costs.get(k, j);
                    if through < costs.get(i, j) {
                        costs.set(i, j, through);
                        next[i * n + j] = next[i * n + k];
                    }
                }
            }
        }

        Self {
            costs,
            next,
            size: n,
        }
    }

    /// Lowest path cost from `from` to `to`; infinite if unreachable.
    ///
    /// # Panics
    ///
    /// Panics if either vertex is out of range.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs.get(from, to)
    }

    /// The full cost matrix.
    pub fn costs(&self) -> &DistanceMatrix {
        &self.costs
    }

    /// Vertex sequence of a lowest-cost path, both endpoints included.
    ///
    /// Returns `None` if `to` is unreachable from `from` or either vertex is
    /// out of range.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.next[from * self.size + to]?;

        let mut path = vec![from];
        let mut current = from;
        while current != to {
            current = self.next[current * self.size + to]?;
            path.push(current);
        }
        Some(path)
    }

    /// Number of vertices covered.
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;
    use proptest::prelude::*;

    #[test]
    fn test_triangle_costs() {
        let (g, _) = fixtures::triangle();
        let sp = ShortestPaths::floyd_warshall(&g);
        assert_eq!(sp.cost(0, 1), 10.0);
        assert_eq!(sp.cost(1, 2), 20.0);
        // Direct edge 30 ties with 0→1→2 (10 + 20)
        assert_eq!(sp.cost(0, 2), 30.0);
        assert_eq!(sp.cost(2, 2), 0.0);
    }

    #[test]
    fn test_circle_takes_shorter_direction() {
        let (g, _) = fixtures::circle();
        let sp = ShortestPaths::floyd_warshall(&g);
        assert_eq!(sp.cost(0, 5), 25.0);
        assert_eq!(sp.cost(0, 8), 10.0);
        assert_eq!(sp.path(0, 8), Some(vec![0, 9, 8]));
    }

    #[test]
    fn test_unreachable() {
        let g = Graph::from_edges(3, &[(0, 1, 1.0)]).expect("valid");
        let sp = ShortestPaths::floyd_warshall(&g);
        assert!(sp.cost(0, 2).is_infinite());
        assert_eq!(sp.path(0, 2), None);
        assert_eq!(sp.path(2, 2), Some(vec![2]));
        assert_eq!(sp.path(0, 7), None);
    }

    #[test]
    fn test_path_cost_matches() {
        let (g, _) = fixtures::ogg();
        let sp = ShortestPaths::floyd_warshall(&g);
        let path = sp.path(6, 2).expect("connected");
        let walked: f64 = path
            .windows(2)
            .map(|w| g.weight(w[0], w[1]).expect("consecutive vertices are adjacent"))
            .sum();
        assert!((walked - sp.cost(6, 2)).abs() < 1e-10);
    }

    proptest! {
        #[test]
        fn prop_costs_form_a_metric(seed in 0u64..500, n in 2usize..9) {
            let (g, _) = crate::graph::random_problem(n, 1, 0.3, seed);
            let sp = ShortestPaths::floyd_warshall(&g);
            prop_assert!(sp.costs().is_symmetric(1e-9));
            for i in 0..n {
                for j in 0..n {
                    for k in 0..n {
                        prop_assert!(sp.cost(i, j) <= sp.cost(i, k) + sp.cost(k, j) + 1e-9);
                    }
                }
            }
        }
    }
}
