//! Immutable per-problem data shared by every search state.

use std::sync::OnceLock;

use crate::error::{ConfigError, QueryError};
use crate::graph::{DistanceMatrix, Graph, ShortestPaths};

/// One problem instance: map, fleet size, garage and package routes.
///
/// A world is validated at construction and never mutated afterwards. The
/// reduced map (shortest-path costs between important vertices) is computed
/// once, either explicitly with [`World::process_map`] or on the first cost
/// query, and then shared read-only by every state that references this
/// world.
///
/// Important vertices are the package sources and destinations in package
/// order (first appearance wins), followed by the garage if it is not
/// already among them.
///
/// # Examples
///
/// ```
/// use u_delivery::graph::fixtures;
/// use u_delivery::models::World;
///
/// let (graph, pairs) = fixtures::triangle();
/// let world = World::new(1, 2, 3, graph, pairs).unwrap();
/// world.process_map();
///
/// assert_eq!(world.important_vertices(), &[1, 2, 0]);
/// assert_eq!(world.edge_cost(0, 2).unwrap(), 30.0);
/// assert_eq!(world.package_cost(0).unwrap(), 20.0);
/// ```
#[derive(Debug)]
pub struct World {
    vehicle_count: usize,
    vertex_count: usize,
    full_map: Graph,
    packages: Vec<(usize, usize)>,
    garage: usize,
    important: Vec<usize>,
    important_index: Vec<Option<usize>>,
    processed: OnceLock<ProcessedMap>,
}

#[derive(Debug)]
struct ProcessedMap {
    paths: ShortestPaths,
    reduced: DistanceMatrix,
}

impl World {
    /// Creates a world with the garage at vertex 0.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `vehicle_count` is zero, `package_count`
    /// differs from `pairs.len()`, `vertex_count` differs from the graph's
    /// vertex count, or a package endpoint is not a vertex of the graph.
    pub fn new(
        vehicle_count: usize,
        package_count: usize,
        vertex_count: usize,
        full_map: Graph,
        pairs: Vec<(usize, usize)>,
    ) -> Result<Self, ConfigError> {
        Self::with_garage(vehicle_count, package_count, vertex_count, full_map, pairs, 0)
    }

    /// Creates a world with an explicit garage vertex.
    pub fn with_garage(
        vehicle_count: usize,
        package_count: usize,
        vertex_count: usize,
        full_map: Graph,
        pairs: Vec<(usize, usize)>,
        garage: usize,
    ) -> Result<Self, ConfigError> {
        if vehicle_count == 0 {
            return Err(ConfigError::NoVehicles);
        }
        if package_count != pairs.len() {
            return Err(ConfigError::PackageCountMismatch {
                declared: package_count,
                pairs: pairs.len(),
            });
        }
        if vertex_count != full_map.vertex_count() {
            return Err(ConfigError::VertexCountMismatch {
                declared: vertex_count,
                graph: full_map.vertex_count(),
            });
        }

        let check = |vertex: usize| {
            if vertex < vertex_count {
                Ok(())
            } else {
                Err(ConfigError::VertexOutOfRange {
                    vertex,
                    vertex_count,
                })
            }
        };
        check(garage)?;
        for &(source, destination) in &pairs {
            check(source)?;
            check(destination)?;
        }

        let mut important = Vec::new();
        let mut important_index = vec![None; vertex_count];
        let endpoints = pairs.iter().flat_map(|&(s, d)| [s, d]);
        for vertex in endpoints.chain(std::iter::once(garage)) {
            if important_index[vertex].is_none() {
                important_index[vertex] = Some(important.len());
                important.push(vertex);
            }
        }

        Ok(Self {
            vehicle_count,
            vertex_count,
            full_map,
            packages: pairs,
            garage,
            important,
            important_index,
            processed: OnceLock::new(),
        })
    }

    /// Computes all-pairs shortest paths and the reduced map.
    ///
    /// Idempotent: later calls reuse the cached result.
    pub fn process_map(&self) {
        self.processed();
    }

    /// Returns `true` once the reduced map has been computed.
    pub fn is_processed(&self) -> bool {
        self.processed.get().is_some()
    }

    fn processed(&self) -> &ProcessedMap {
        self.processed.get_or_init(|| {
            let paths = ShortestPaths::floyd_warshall(&self.full_map);
            let n = self.important.len();
            let mut reduced = DistanceMatrix::new(n);
            for (i, &u) in self.important.iter().enumerate() {
                for (j, &v) in self.important.iter().enumerate() {
                    reduced.set(i, j, paths.cost(u, v));
                }
            }

            for (k, &(source, destination)) in self.packages.iter().enumerate() {
                if paths.cost(self.garage, source).is_infinite()
                    || paths.cost(source, destination).is_infinite()
                {
                    tracing::warn!(
                        package = k,
                        source,
                        destination,
                        "package route is unreachable from the garage"
                    );
                }
            }
            tracing::debug!(
                vertices = self.vertex_count,
                important = n,
                "reduced map computed"
            );

            ProcessedMap { paths, reduced }
        })
    }

    /// Reduced-map cost between two important vertices.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if either vertex is out of range or is not
    /// an important vertex.
    pub fn edge_cost(&self, from: usize, to: usize) -> Result<f64, QueryError> {
        let i = self.reduced_index(from)?;
        let j = self.reduced_index(to)?;
        Ok(self.processed().reduced.get(i, j))
    }

    /// Reduced-map cost from a package's source to its destination.
    pub fn package_cost(&self, package: usize) -> Result<f64, QueryError> {
        let (source, destination) = self
            .packages
            .get(package)
            .copied()
            .ok_or(QueryError::UnknownPackage { package })?;
        self.edge_cost(source, destination)
    }

    /// Reduced-map cost for movements generated by the transition function.
    ///
    /// Endpoints are always important vertices, since [`State::new`] rejects
    /// any other stop. Infinity means the two are disconnected.
    ///
    /// [`State::new`]: crate::models::State::new
    pub(crate) fn travel_cost(&self, from: usize, to: usize) -> f64 {
        match self.edge_cost(from, to) {
            Ok(cost) => cost,
            Err(e) => {
                tracing::error!(from, to, "illegal reduced-map query: {}", e);
                f64::INFINITY
            }
        }
    }

    /// Lowest-cost full-map path from `from` to `to`, both endpoints included.
    ///
    /// Only used to turn finished solutions into readable routes. Returns
    /// `None` if either vertex is out of range or `to` is unreachable.
    pub fn shortest_path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        self.processed().paths.path(from, to)
    }

    /// Lowest full-map cost between any two vertices.
    pub fn shortest_cost(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.vertex_count || to >= self.vertex_count {
            return None;
        }
        Some(self.processed().paths.cost(from, to))
    }

    /// The reduced map, indexed in [`World::important_vertices`] order.
    pub fn reduced_map(&self) -> &DistanceMatrix {
        &self.processed().reduced
    }

    /// Number of vehicles (N).
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Number of packages (K).
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Number of vertices in the full map (M).
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The garage vertex every vehicle starts from and returns to.
    pub fn garage(&self) -> usize {
        self.garage
    }

    /// The full map.
    pub fn full_map(&self) -> &Graph {
        &self.full_map
    }

    /// Package `(source, destination)` pairs in package order.
    pub fn packages(&self) -> &[(usize, usize)] {
        &self.packages
    }

    /// Source vertex of a package.
    pub fn package_source(&self, package: usize) -> Option<usize> {
        self.packages.get(package).map(|&(s, _)| s)
    }

    /// Destination vertex of a package.
    pub fn package_destination(&self, package: usize) -> Option<usize> {
        self.packages.get(package).map(|&(_, d)| d)
    }

    /// Garage plus every package source and destination.
    pub fn important_vertices(&self) -> &[usize] {
        &self.important
    }

    /// Returns `true` if `vertex` is the garage or a package endpoint.
    pub fn is_important(&self, vertex: usize) -> bool {
        self.reduced_index(vertex).is_ok()
    }

    fn reduced_index(&self, vertex: usize) -> Result<usize, QueryError> {
        match self.important_index.get(vertex) {
            None => Err(QueryError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count,
            }),
            Some(None) => Err(QueryError::NotImportant { vertex }),
            Some(Some(i)) => Ok(*i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    fn triangle_world() -> World {
        let (graph, pairs) = fixtures::triangle();
        World::new(1, 2, 3, graph, pairs).expect("valid world")
    }

    #[test]
    fn test_rejects_package_count_mismatch() {
        let (graph, pairs) = fixtures::triangle();
        let err = World::new(1, 3, 3, graph, pairs).unwrap_err();
        assert_eq!(
            err,
            ConfigError::PackageCountMismatch {
                declared: 3,
                pairs: 2
            }
        );
    }

    #[test]
    fn test_rejects_vertex_count_mismatch() {
        let (graph, pairs) = fixtures::triangle();
        let err = World::new(1, 2, 4, graph, pairs).unwrap_err();
        assert!(matches!(err, ConfigError::VertexCountMismatch { .. }));
    }

    #[test]
    fn test_rejects_no_vehicles() {
        let (graph, pairs) = fixtures::triangle();
        assert_eq!(
            World::new(0, 2, 3, graph, pairs).unwrap_err(),
            ConfigError::NoVehicles
        );
    }

    #[test]
    fn test_rejects_out_of_range_endpoints() {
        let (graph, _) = fixtures::triangle();
        let err = World::new(1, 1, 3, graph.clone(), vec![(0, 7)]).unwrap_err();
        assert!(matches!(err, ConfigError::VertexOutOfRange { vertex: 7, .. }));
        let err = World::with_garage(1, 0, 3, graph, vec![], 3).unwrap_err();
        assert!(matches!(err, ConfigError::VertexOutOfRange { vertex: 3, .. }));
    }

    #[test]
    fn test_lazy_processing() {
        let world = triangle_world();
        assert!(!world.is_processed());
        assert_eq!(world.edge_cost(1, 2), Ok(20.0));
        assert!(world.is_processed());
    }

    #[test]
    fn test_edge_cost_illegal_queries() {
        let (graph, _) = fixtures::ogg();
        let world = World::new(1, 1, 9, graph, vec![(6, 2)]).expect("valid");
        world.process_map();
        assert_eq!(
            world.edge_cost(0, 9),
            Err(QueryError::VertexOutOfRange {
                vertex: 9,
                vertex_count: 9
            })
        );
        assert_eq!(world.edge_cost(3, 0), Err(QueryError::NotImportant { vertex: 3 }));
        assert_eq!(world.package_cost(1), Err(QueryError::UnknownPackage { package: 1 }));
        assert!(world.is_important(6) && world.is_important(0));
        assert!(!world.is_important(3) && !world.is_important(9));
    }

    #[test]
    fn test_circle_reduced_cost() {
        let (graph, pairs) = fixtures::circle();
        let world = World::new(2, 10, 10, graph, pairs).expect("valid");
        assert_eq!(world.edge_cost(0, 5), Ok(25.0));
        assert_eq!(world.edge_cost(5, 0), Ok(25.0));
        assert_eq!(world.edge_cost(2, 9), Ok(15.0));
    }

    #[test]
    fn test_reduced_map_is_complete_over_important() {
        let (graph, pairs) = fixtures::ogg();
        let world = World::new(2, 3, 9, graph, pairs).expect("valid");
        assert_eq!(world.important_vertices(), &[6, 2, 3, 1, 4, 5, 0]);
        let reduced = world.reduced_map();
        assert_eq!(reduced.size(), 7);
        assert!(reduced.is_symmetric(1e-10));
        // 6→2: 6-0 (51) + 0-1 (20) + 1-2 (68) = 139 vs 6-5-4-3-0-1-2 = 30+4+6+14+20+68 = 142
        assert_eq!(world.edge_cost(6, 2), Ok(139.0));
    }

    #[test]
    fn test_shortest_path_reconstruction() {
        let world = triangle_world();
        assert_eq!(world.shortest_path(0, 1), Some(vec![0, 1]));
        assert_eq!(world.shortest_path(2, 2), Some(vec![2]));
        assert_eq!(world.shortest_path(0, 5), None);
        assert_eq!(world.shortest_cost(1, 0), Some(10.0));
    }
}
