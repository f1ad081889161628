//! Search states: the shared capability trait and the coarse variant.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{ConfigError, SearchError};
use crate::heuristics::{self, HeuristicKind};
use crate::transition::CoarseSuccessors;

use super::{Route, World};

/// A point in the delivery search space.
///
/// Search algorithms and heuristics are written against this trait and
/// never branch on the concrete state model. Implementations define state
/// equality for deduplication: path history is never part of identity.
pub trait DeliveryState: Clone + PartialEq + fmt::Debug {
    /// Lazily produced successor states.
    type Successors: Iterator<Item = Self>;

    /// Short model name used in reports and errors.
    const MODEL: &'static str;

    /// The world this state belongs to.
    fn world(&self) -> &World;

    /// Location history of a vehicle, starting at the garage.
    fn vehicle_path(&self, vehicle: usize) -> Option<&[usize]>;

    /// Per-package delivery flags.
    fn delivered(&self) -> &[bool];

    /// Accumulated path cost from the initial state (g).
    fn cost(&self) -> f64;

    /// Every legal successor of this state.
    fn successors(&self) -> Self::Successors;

    /// Concrete vertex-by-vertex routes, one per vehicle.
    fn routes(&self) -> Vec<Route>;

    /// Resolves a heuristic for this state model.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedHeuristic`] if the heuristic needs
    /// information this model does not carry.
    fn heuristic(kind: HeuristicKind) -> Result<fn(&Self) -> f64, SearchError> {
        heuristics::generic(kind).ok_or(SearchError::UnsupportedHeuristic {
            heuristic: kind.name(),
            model: Self::MODEL,
        })
    }

    /// Current location of a vehicle (top of its path).
    fn vehicle_location(&self, vehicle: usize) -> Option<usize> {
        self.vehicle_path(vehicle).and_then(|p| p.last().copied())
    }

    /// Number of vehicles.
    fn vehicle_count(&self) -> usize {
        self.world().vehicle_count()
    }

    /// Number of delivered packages.
    fn num_delivered(&self) -> usize {
        self.delivered().iter().filter(|&&d| d).count()
    }

    /// Number of packages not yet delivered.
    fn num_undelivered(&self) -> usize {
        self.delivered().len() - self.num_delivered()
    }

    /// Returns `true` if every package is delivered.
    fn all_delivered(&self) -> bool {
        self.delivered().iter().all(|&d| d)
    }

    /// Returns `true` if every package is delivered and every vehicle is
    /// back at the garage.
    fn is_goal(&self) -> bool {
        let garage = self.world().garage();
        self.all_delivered()
            && (0..self.vehicle_count()).all(|v| self.vehicle_location(v) == Some(garage))
    }
}

/// Coarse state: one transition delivers whole packages.
///
/// Each vehicle's path records the important vertices it has visited, so
/// movement between them is priced with the reduced map. Two states are
/// equal when every vehicle stands at the same vertex and the same packages
/// are delivered, regardless of history or cost.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_delivery::graph::fixtures;
/// use u_delivery::models::{DeliveryState, State, World};
///
/// let (graph, pairs) = fixtures::triangle();
/// let world = Arc::new(World::new(1, 2, 3, graph, pairs).unwrap());
/// let initial = State::initial(world);
///
/// assert_eq!(initial.vehicle_location(0), Some(0));
/// assert_eq!(initial.num_undelivered(), 2);
/// assert!(!initial.is_goal());
/// assert_eq!(initial.successors().count(), 2);
/// ```
#[derive(Clone)]
pub struct State {
    world: Arc<World>,
    vehicle_paths: Vec<Vec<usize>>,
    delivered: Vec<bool>,
    cost: f64,
}

impl State {
    /// The initial state: every vehicle at the garage, nothing delivered.
    pub fn initial(world: Arc<World>) -> Self {
        let garage = world.garage();
        let vehicle_paths = vec![vec![garage]; world.vehicle_count()];
        let delivered = vec![false; world.package_count()];
        Self {
            world,
            vehicle_paths,
            delivered,
            cost: 0.0,
        }
    }

    /// Creates a state from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the number of paths or flags does not
    /// match the world, a path is empty, a path stops anywhere but the
    /// garage or a package endpoint, or `cost` is negative or not finite.
    pub fn new(
        world: Arc<World>,
        vehicle_paths: Vec<Vec<usize>>,
        delivered: Vec<bool>,
        cost: f64,
    ) -> Result<Self, ConfigError> {
        check_shape(&world, &vehicle_paths, &delivered)?;
        check_cost(cost)?;
        for (vehicle, path) in vehicle_paths.iter().enumerate() {
            if let Some(&vertex) = path.iter().find(|&&v| !world.is_important(v)) {
                return Err(ConfigError::NotImportantStop { vehicle, vertex });
            }
        }
        Ok(Self::from_parts(world, vehicle_paths, delivered, cost))
    }

    pub(crate) fn from_parts(
        world: Arc<World>,
        vehicle_paths: Vec<Vec<usize>>,
        delivered: Vec<bool>,
        cost: f64,
    ) -> Self {
        Self {
            world,
            vehicle_paths,
            delivered,
            cost,
        }
    }

    /// Shared handle to the world.
    pub fn world_handle(&self) -> &Arc<World> {
        &self.world
    }

    /// All vehicle paths.
    pub fn vehicle_paths(&self) -> &[Vec<usize>] {
        &self.vehicle_paths
    }

    fn locations(&self) -> impl Iterator<Item = usize> + '_ {
        self.vehicle_paths.iter().filter_map(|p| p.last().copied())
    }
}

pub(crate) fn check_cost(cost: f64) -> Result<(), ConfigError> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCost(cost))
    }
}

pub(crate) fn check_shape(
    world: &World,
    vehicle_paths: &[Vec<usize>],
    delivered: &[bool],
) -> Result<(), ConfigError> {
    if vehicle_paths.len() != world.vehicle_count() {
        return Err(ConfigError::StateShape {
            what: "vehicle paths",
            expected: world.vehicle_count(),
            actual: vehicle_paths.len(),
        });
    }
    if delivered.len() != world.package_count() {
        return Err(ConfigError::StateShape {
            what: "delivered flags",
            expected: world.package_count(),
            actual: delivered.len(),
        });
    }
    for (vehicle, path) in vehicle_paths.iter().enumerate() {
        if path.is_empty() {
            return Err(ConfigError::EmptyVehiclePath { vehicle });
        }
        if let Some(&vertex) = path.iter().find(|&&v| v >= world.vertex_count()) {
            return Err(ConfigError::VertexOutOfRange {
                vertex,
                vertex_count: world.vertex_count(),
            });
        }
    }
    Ok(())
}

impl DeliveryState for State {
    type Successors = CoarseSuccessors;

    const MODEL: &'static str = "coarse";

    fn world(&self) -> &World {
        &self.world
    }

    fn vehicle_path(&self, vehicle: usize) -> Option<&[usize]> {
        self.vehicle_paths.get(vehicle).map(Vec::as_slice)
    }

    fn delivered(&self) -> &[bool] {
        &self.delivered
    }

    fn cost(&self) -> f64 {
        self.cost
    }

    fn successors(&self) -> CoarseSuccessors {
        CoarseSuccessors::new(self.clone())
    }

    fn routes(&self) -> Vec<Route> {
        self.vehicle_paths
            .iter()
            .enumerate()
            .map(|(v, stops)| Route::from_stops(&self.world, v, stops))
            .collect()
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.delivered == other.delivered && self.locations().eq(other.locations())
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for location in self.locations() {
            location.hash(state);
        }
        self.delivered.hash(state);
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("vehicle_paths", &self.vehicle_paths)
            .field("delivered", &self.delivered)
            .field("cost", &self.cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;
    use std::collections::HashSet;

    fn triangle_world() -> Arc<World> {
        let (graph, pairs) = fixtures::triangle();
        Arc::new(World::new(2, 2, 3, graph, pairs).expect("valid world"))
    }

    #[test]
    fn test_initial_state() {
        let s = State::initial(triangle_world());
        assert_eq!(s.vehicle_count(), 2);
        assert_eq!(s.vehicle_path(1), Some(&[0][..]));
        assert_eq!(s.vehicle_location(2), None);
        assert_eq!(s.delivered(), &[false, false]);
        assert_eq!(s.cost(), 0.0);
        assert!(!s.all_delivered());
    }

    #[test]
    fn test_equality_ignores_history_and_cost() {
        let world = triangle_world();
        let a = State::new(world.clone(), vec![vec![0, 1, 2], vec![0]], vec![true, false], 30.0)
            .expect("valid");
        let b = State::new(world, vec![vec![0, 2], vec![0, 1, 0]], vec![true, false], 99.0)
            .expect("valid");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_inequality_on_location_or_flags() {
        let world = triangle_world();
        let base = State::new(world.clone(), vec![vec![0, 2], vec![0]], vec![true, false], 0.0)
            .expect("valid");
        let moved = State::new(world.clone(), vec![vec![0, 1], vec![0]], vec![true, false], 0.0)
            .expect("valid");
        let flags = State::new(world, vec![vec![0, 2], vec![0]], vec![true, true], 0.0)
            .expect("valid");
        assert_ne!(base, moved);
        assert_ne!(base, flags);
    }

    #[test]
    fn test_goal_requires_garage_and_delivery() {
        let world = triangle_world();
        let away = State::new(world.clone(), vec![vec![0, 2], vec![0]], vec![true, true], 0.0)
            .expect("valid");
        let home = State::new(world.clone(), vec![vec![0, 2, 0], vec![0]], vec![true, true], 0.0)
            .expect("valid");
        let pending = State::new(world, vec![vec![0], vec![0]], vec![true, false], 0.0)
            .expect("valid");
        assert!(away.all_delivered() && !away.is_goal());
        assert!(home.is_goal());
        assert!(!pending.is_goal());
        assert_eq!(home.num_delivered(), 2);
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        let world = triangle_world();
        assert!(matches!(
            State::new(world.clone(), vec![vec![0]], vec![false, false], 0.0),
            Err(ConfigError::StateShape { what: "vehicle paths", .. })
        ));
        assert!(matches!(
            State::new(world.clone(), vec![vec![0], vec![0]], vec![false], 0.0),
            Err(ConfigError::StateShape { what: "delivered flags", .. })
        ));
        assert_eq!(
            State::new(world.clone(), vec![vec![0], vec![]], vec![false, false], 0.0).unwrap_err(),
            ConfigError::EmptyVehiclePath { vehicle: 1 }
        );
        assert!(matches!(
            State::new(world, vec![vec![0], vec![4]], vec![false, false], 0.0),
            Err(ConfigError::VertexOutOfRange { vertex: 4, .. })
        ));
    }

    #[test]
    fn test_new_rejects_stops_outside_reduced_map() {
        let (graph, pairs) = fixtures::ogg();
        let world = Arc::new(World::new(1, 3, 9, graph, pairs).expect("valid world"));
        // Vertex 8 is neither the garage nor a package endpoint.
        assert_eq!(
            State::new(world.clone(), vec![vec![0, 8]], vec![false; 3], 0.0).unwrap_err(),
            ConfigError::NotImportantStop { vehicle: 0, vertex: 8 }
        );
        let s = State::new(world, vec![vec![0, 4]], vec![false; 3], 0.0).expect("valid");
        assert!(s.successors().count() > 0);
    }

    #[test]
    fn test_new_rejects_invalid_cost() {
        let world = triangle_world();
        for cost in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                State::new(world.clone(), vec![vec![0], vec![0]], vec![false, false], cost),
                Err(ConfigError::InvalidCost(_))
            ));
        }
    }

    #[test]
    fn test_routes_expand_stops() {
        let world = triangle_world();
        let s = State::new(world, vec![vec![0, 2, 0], vec![0]], vec![true, true], 60.0)
            .expect("valid");
        let routes = s.routes();
        assert_eq!(routes.len(), 2);
        // 0→2 costs 30 directly
        assert_eq!(routes[0].vertices(), &[0, 2, 0]);
        assert_eq!(routes[1].vertices(), &[0]);
    }

    #[test]
    fn test_coarse_rejects_vanilla_heuristic() {
        let err = State::heuristic(HeuristicKind::SumOfEstimatedCost).unwrap_err();
        assert_eq!(
            err,
            SearchError::UnsupportedHeuristic {
                heuristic: "sum_of_estimated_cost",
                model: "coarse"
            }
        );
    }
}
