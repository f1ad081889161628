//! Weighted undirected graph.

use crate::error::ConfigError;

/// A weighted undirected graph over vertices `0..vertex_count`.
///
/// Parallel edges collapse to the cheaper weight and self-loops are
/// ignored, so every pair of vertices has at most one edge.
///
/// # Examples
///
/// ```
/// use u_delivery::graph::Graph;
///
/// let g = Graph::from_edges(3, &[(0, 1, 10.0), (1, 2, 20.0)]).unwrap();
/// assert_eq!(g.weight(1, 0), Some(10.0));
/// assert_eq!(g.weight(0, 2), None);
/// assert_eq!(g.neighbors(1).count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    adjacency: Vec<Vec<(usize, f64)>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from `(u, v, weight)` triples.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize, f64)]) -> Result<Self, ConfigError> {
        let mut graph = Self::new(vertex_count);
        for &(u, v, w) in edges {
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    /// Adds an undirected edge, keeping the cheaper weight if one exists.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<(), ConfigError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::InvalidWeight {
                from: u,
                to: v,
                weight,
            });
        }
        self.insert_edge(u, v, weight);
        Ok(())
    }

    /// Inserts an edge whose endpoints are in range and whose weight is
    /// finite and non-negative.
    pub(crate) fn insert_edge(&mut self, u: usize, v: usize, weight: f64) {
        debug_assert!(u < self.vertex_count() && v < self.vertex_count());
        debug_assert!(weight.is_finite() && weight >= 0.0);
        if u == v {
            return;
        }

        match self.adjacency[u].iter().position(|&(n, _)| n == v) {
            Some(pos) => {
                let current = self.adjacency[u][pos].1;
                if weight < current {
                    self.adjacency[u][pos].1 = weight;
                    if let Some(back) = self.adjacency[v].iter_mut().find(|(n, _)| *n == u) {
                        back.1 = weight;
                    }
                }
            }
            None => {
                self.adjacency[u].push((v, weight));
                self.adjacency[v].push((u, weight));
                self.edge_count += 1;
            }
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates over `(neighbor, weight)` pairs adjacent to `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of range.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency[v].iter().copied()
    }

    /// Returns the weight of edge `(u, v)`, or `None` if they are not adjacent.
    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.adjacency
            .get(u)?
            .iter()
            .find(|&&(n, _)| n == v)
            .map(|&(_, w)| w)
    }

    /// Cheapest edge incident to `v`, or `None` for an isolated vertex.
    pub fn min_edge_weight(&self, v: usize) -> Option<f64> {
        self.adjacency
            .get(v)?
            .iter()
            .map(|&(_, w)| w)
            .min_by(f64::total_cmp)
    }

    /// Iterates over every edge once as `(u, v, weight)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, adj)| {
            adj.iter()
                .filter(move |&&(v, _)| u < v)
                .map(move |&(v, w)| (u, v, w))
        })
    }

    fn check_vertex(&self, v: usize) -> Result<(), ConfigError> {
        if v < self.vertex_count() {
            Ok(())
        } else {
            Err(ConfigError::VertexOutOfRange {
                vertex: v,
                vertex_count: self.vertex_count(),
            })
        }
    }
}
