//! Fine-grained state: vehicles move one map edge per transition.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{ConfigError, SearchError};
use crate::heuristics::{self, HeuristicKind};
use crate::transition::vanilla_successors;

use super::state::{check_cost, check_shape};
use super::{DeliveryState, Route, World};

/// A state in the one-hop-at-a-time model.
///
/// Besides locations and delivery flags, each vehicle may physically hold
/// one package. Equality compares current locations, delivery flags and
/// held packages.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_delivery::graph::fixtures;
/// use u_delivery::models::{DeliveryState, VanillaState, World};
///
/// let (graph, pairs) = fixtures::triangle();
/// let world = Arc::new(World::new(1, 2, 3, graph, pairs).unwrap());
/// let initial = VanillaState::initial(world);
///
/// assert_eq!(initial.held(), &[None]);
/// // From the garage the single vehicle can step to vertex 1 or vertex 2.
/// assert!(initial.successors().all(|s| s.cost() > 0.0));
/// ```
#[derive(Clone)]
pub struct VanillaState {
    world: Arc<World>,
    vehicle_paths: Vec<Vec<usize>>,
    delivered: Vec<bool>,
    held: Vec<Option<usize>>,
    cost: f64,
}

impl VanillaState {
    /// The initial state: every vehicle at the garage and empty-handed.
    pub fn initial(world: Arc<World>) -> Self {
        let garage = world.garage();
        let vehicles = world.vehicle_count();
        let packages = world.package_count();
        Self {
            world,
            vehicle_paths: vec![vec![garage]; vehicles],
            delivered: vec![false; packages],
            held: vec![None; vehicles],
            cost: 0.0,
        }
    }

    /// Creates a state from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on any shape mismatch with the world, if
    /// `held` names an unknown package, or if `cost` is negative or not
    /// finite.
    pub fn new(
        world: Arc<World>,
        vehicle_paths: Vec<Vec<usize>>,
        delivered: Vec<bool>,
        held: Vec<Option<usize>>,
        cost: f64,
    ) -> Result<Self, ConfigError> {
        check_shape(&world, &vehicle_paths, &delivered)?;
        check_cost(cost)?;
        if held.len() != world.vehicle_count() {
            return Err(ConfigError::StateShape {
                what: "held slots",
                expected: world.vehicle_count(),
                actual: held.len(),
            });
        }
        if let Some(&package) = held.iter().flatten().find(|&&p| p >= world.package_count()) {
            return Err(ConfigError::UnknownPackage {
                package,
                package_count: world.package_count(),
            });
        }
        Ok(Self::from_parts(world, vehicle_paths, delivered, held, cost))
    }

    pub(crate) fn from_parts(
        world: Arc<World>,
        vehicle_paths: Vec<Vec<usize>>,
        delivered: Vec<bool>,
        held: Vec<Option<usize>>,
        cost: f64,
    ) -> Self {
        Self {
            world,
            vehicle_paths,
            delivered,
            held,
            cost,
        }
    }

    /// Package held by each vehicle, if any.
    pub fn held(&self) -> &[Option<usize>] {
        &self.held
    }

    /// Returns the vehicle currently holding `package`.
    pub fn holder(&self, package: usize) -> Option<usize> {
        self.held.iter().position(|&h| h == Some(package))
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

impl DeliveryState for VanillaState {
    type Successors = std::vec::IntoIter<VanillaState>;

    const MODEL: &'static str = "vanilla";

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

    fn successors(&self) -> Self::Successors {
        vanilla_successors(self).into_iter()
    }

    fn routes(&self) -> Vec<Route> {
        self.vehicle_paths
            .iter()
            .enumerate()
            .map(|(v, hops)| Route::from_hops(v, hops))
            .collect()
    }

    fn heuristic(kind: HeuristicKind) -> Result<fn(&Self) -> f64, SearchError> {
        match kind {
            HeuristicKind::SumOfEstimatedCost => {
                Ok(heuristics::sum_of_estimated_cost as fn(&Self) -> f64)
            }
            HeuristicKind::SumOfEstimatedCostScaled => {
                Ok(heuristics::sum_of_estimated_cost_scaled as fn(&Self) -> f64)
            }
            other => heuristics::generic(other).ok_or(SearchError::UnsupportedHeuristic {
                heuristic: other.name(),
                model: Self::MODEL,
            }),
        }
    }
}

impl PartialEq for VanillaState {
    fn eq(&self, other: &Self) -> bool {
        self.delivered == other.delivered
            && self.held == other.held
            && self.locations().eq(other.locations())
    }
}

impl Eq for VanillaState {}

impl Hash for VanillaState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for location in self.locations() {
            location.hash(state);
        }
        self.delivered.hash(state);
        self.held.hash(state);
    }
}

impl fmt::Debug for VanillaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VanillaState")
            .field("vehicle_paths", &self.vehicle_paths)
            .field("delivered", &self.delivered)
            .field("held", &self.held)
            .field("cost", &self.cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    fn triangle_world() -> Arc<World> {
        let (graph, pairs) = fixtures::triangle();
        Arc::new(World::new(1, 2, 3, graph, pairs).expect("valid world"))
    }

    fn state(path: Vec<usize>, delivered: [bool; 2], held: Option<usize>, cost: f64) -> VanillaState {
        VanillaState::new(triangle_world(), vec![path], delivered.to_vec(), vec![held], cost)
            .expect("valid state")
    }

    #[test]
    fn test_equality_includes_held() {
        let empty = state(vec![0, 1], [false, false], None, 10.0);
        let holding = state(vec![0, 1], [false, false], Some(0), 10.0);
        let other_history = state(vec![0, 2, 1], [false, false], None, 50.0);
        assert_ne!(empty, holding);
        assert_eq!(empty, other_history);
    }

    #[test]
    fn test_goal() {
        assert!(state(vec![0, 1, 2, 0], [true, true], None, 60.0).is_goal());
        assert!(!state(vec![0, 1, 2], [true, true], None, 30.0).is_goal());
        assert!(!state(vec![0, 1, 0], [true, false], None, 20.0).is_goal());
    }

    #[test]
    fn test_new_rejects_bad_held() {
        let world = triangle_world();
        let err = VanillaState::new(world.clone(), vec![vec![0]], vec![false; 2], vec![], 0.0);
        assert!(matches!(err, Err(ConfigError::StateShape { what: "held slots", .. })));
        let err = VanillaState::new(world, vec![vec![0]], vec![false; 2], vec![Some(5)], 0.0);
        assert_eq!(
            err.unwrap_err(),
            ConfigError::UnknownPackage {
                package: 5,
                package_count: 2
            }
        );
    }

    #[test]
    fn test_new_rejects_invalid_cost() {
        let world = triangle_world();
        let err = VanillaState::new(world.clone(), vec![vec![0]], vec![false; 2], vec![None], -5.0);
        assert_eq!(err.unwrap_err(), ConfigError::InvalidCost(-5.0));
        let err = VanillaState::new(world, vec![vec![0]], vec![false; 2], vec![None], f64::NAN);
        assert!(matches!(err, Err(ConfigError::InvalidCost(c)) if c.is_nan()));
    }

    #[test]
    fn test_holder() {
        let s = state(vec![0, 1], [false, false], Some(0), 10.0);
        assert_eq!(s.holder(0), Some(0));
        assert_eq!(s.holder(1), None);
    }

    #[test]
    fn test_routes_are_hop_paths() {
        let s = state(vec![0, 1, 1, 2, 0], [true, true], None, 60.0);
        assert_eq!(s.routes()[0].vertices(), &[0, 1, 2, 0]);
    }

    #[test]
    fn test_vanilla_heuristics_resolve() {
        assert!(VanillaState::heuristic(HeuristicKind::SumOfEstimatedCostScaled).is_ok());
        assert!(VanillaState::heuristic(HeuristicKind::Zero).is_ok());
    }
}
