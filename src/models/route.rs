//! Concrete vehicle routes reconstructed from finished states.

use serde::Serialize;

use super::World;

/// The vertex-by-vertex route one vehicle drives.
///
/// `stops` are the locations recorded by the search (important vertices in
/// the coarse model, every hop in the fine-grained model); `vertices` is the
/// walk through the full map with consecutive duplicates removed.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Route;
///
/// let route = Route::from_hops(0, &[0, 1, 1, 2, 0]);
/// assert_eq!(route.vertices(), &[0, 1, 2, 0]);
/// assert_eq!(route.vehicle_id(), 0);
/// assert_eq!(route.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<usize>,
    vertices: Vec<usize>,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
            vertices: Vec::new(),
        }
    }

    /// Expands coarse stops into a full-map walk using shortest paths.
    ///
    /// A leg whose endpoints are disconnected is kept as a direct jump.
    pub fn from_stops(world: &World, vehicle_id: usize, stops: &[usize]) -> Self {
        let mut route = Self::new(vehicle_id);
        route.stops = stops.to_vec();
        for &stop in stops {
            match route.vertices.last().copied() {
                None => route.vertices.push(stop),
                Some(last) if last == stop => {}
                Some(last) => match world.shortest_path(last, stop) {
                    Some(leg) => route.vertices.extend_from_slice(&leg[1..]),
                    None => route.vertices.push(stop),
                },
            }
        }
        route
    }

    /// Builds a route from one-hop locations.
    pub fn from_hops(vehicle_id: usize, hops: &[usize]) -> Self {
        let mut route = Self::new(vehicle_id);
        route.stops = hops.to_vec();
        for &hop in hops {
            route.push_vertex(hop);
        }
        route
    }

    /// Appends a vertex unless it repeats the last one.
    pub fn push_vertex(&mut self, vertex: usize) {
        if self.vertices.last() != Some(&vertex) {
            self.vertices.push(vertex);
        }
    }

    /// Returns the vehicle driving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Locations recorded by the search.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Full-map walk.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Number of vertices in the walk.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the walk is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if the vehicle never left its first vertex.
    pub fn is_idle(&self) -> bool {
        self.vertices.len() <= 1
    }

    /// Sums edge weights along the walk; `None` if two consecutive vertices
    /// are not adjacent in the world's map.
    pub fn distance(&self, world: &World) -> Option<f64> {
        self.vertices
            .windows(2)
            .map(|w| world.full_map().weight(w[0], w[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    fn ogg_world() -> World {
        let (graph, pairs) = fixtures::ogg();
        World::new(2, 3, 9, graph, pairs).expect("valid world")
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new(3);
        assert!(r.is_empty());
        assert!(r.is_idle());
        assert_eq!(r.vehicle_id(), 3);
    }

    #[test]
    fn test_from_stops_expands_legs() {
        let world = ogg_world();
        // 0 → 4 runs 0-3-4, 4 → 5 is direct, 5 → 0 runs 5-4-3-0
        let r = Route::from_stops(&world, 0, &[0, 4, 5, 0]);
        assert_eq!(r.vertices(), &[0, 3, 4, 5, 4, 3, 0]);
        assert_eq!(r.stops(), &[0, 4, 5, 0]);
        assert_eq!(r.distance(&world), Some(14.0 + 6.0 + 4.0 + 4.0 + 6.0 + 14.0));
    }

    #[test]
    fn test_from_stops_skips_repeated_stops() {
        let world = ogg_world();
        let r = Route::from_stops(&world, 1, &[0, 3, 3, 1, 0]);
        assert_eq!(r.vertices(), &[0, 3, 0, 1, 0]);
    }

    #[test]
    fn test_distance_rejects_jumps() {
        let world = ogg_world();
        let r = Route::from_hops(0, &[0, 2]);
        assert_eq!(r.distance(&world), None);
    }
}
