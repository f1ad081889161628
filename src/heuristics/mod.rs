//! Heuristic estimates of remaining cost.
//!
//! A heuristic is a plain `fn(&S) -> f64`. [`HeuristicKind`] selects one
//! by name and [`DeliveryState::heuristic`] resolves it for a concrete
//! state model; [`f_value`] combines it with the accumulated cost into the
//! `f = g + h` priority the searches order by.
//!
//! Admissibility differs per heuristic:
//!
//! | Heuristic | Admissible |
//! |-----------|------------|
//! | [`zero`] | yes (uniform-cost search) |
//! | [`undelivered_count`] | only if every edge costs at least 1 |
//! | [`sum_package_distance`] | yes |
//! | [`sum_package_distance_scaled`] | no guarantee |
//! | [`sum_of_estimated_cost`] | yes |
//! | [`sum_of_estimated_cost_scaled`] | no guarantee |
//!
//! Non-admissible heuristics are kept on purpose: they trade optimality of
//! the first solution for fewer expansions.

use serde::{Deserialize, Serialize};

use crate::models::{DeliveryState, VanillaState};

/// Selects a heuristic function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// Always zero.
    Zero,
    /// Number of undelivered packages.
    UndeliveredCount,
    /// Sum of source-to-destination costs of undelivered packages.
    #[default]
    SumPackageDistance,
    /// [`HeuristicKind::SumPackageDistance`] scaled by the undelivered share.
    SumPackageDistanceScaled,
    /// Cheapest edges each undelivered package must still cross. Fine-grained
    /// model only.
    SumOfEstimatedCost,
    /// [`HeuristicKind::SumOfEstimatedCost`] scaled by the undelivered share.
    /// Fine-grained model only.
    SumOfEstimatedCostScaled,
}

impl HeuristicKind {
    /// Every heuristic, in declaration order.
    pub const ALL: [HeuristicKind; 6] = [
        HeuristicKind::Zero,
        HeuristicKind::UndeliveredCount,
        HeuristicKind::SumPackageDistance,
        HeuristicKind::SumPackageDistanceScaled,
        HeuristicKind::SumOfEstimatedCost,
        HeuristicKind::SumOfEstimatedCostScaled,
    ];

    /// Snake-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::UndeliveredCount => "undelivered_count",
            Self::SumPackageDistance => "sum_package_distance",
            Self::SumPackageDistanceScaled => "sum_package_distance_scaled",
            Self::SumOfEstimatedCost => "sum_of_estimated_cost",
            Self::SumOfEstimatedCostScaled => "sum_of_estimated_cost_scaled",
        }
    }

    /// Returns `true` if the first goal found by A* with this heuristic is
    /// guaranteed optimal on arbitrary non-negative weights.
    pub fn is_admissible(self) -> bool {
        matches!(
            self,
            Self::Zero | Self::SumPackageDistance | Self::SumOfEstimatedCost
        )
    }
}

/// Resolves the heuristics that work on any state model.
///
/// Returns `None` for the fine-grained-only kinds.
pub fn generic<S: DeliveryState>(kind: HeuristicKind) -> Option<fn(&S) -> f64> {
    match kind {
        HeuristicKind::Zero => Some(zero::<S> as fn(&S) -> f64),
        HeuristicKind::UndeliveredCount => Some(undelivered_count::<S> as fn(&S) -> f64),
        HeuristicKind::SumPackageDistance => Some(sum_package_distance::<S> as fn(&S) -> f64),
        HeuristicKind::SumPackageDistanceScaled => {
            Some(sum_package_distance_scaled::<S> as fn(&S) -> f64)
        }
        HeuristicKind::SumOfEstimatedCost | HeuristicKind::SumOfEstimatedCostScaled => None,
    }
}

/// Wraps a heuristic into the `f = g + h` priority function.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_delivery::graph::fixtures;
/// use u_delivery::heuristics::{f_value, sum_package_distance};
/// use u_delivery::models::{State, World};
///
/// let (graph, pairs) = fixtures::triangle();
/// let world = Arc::new(World::new(1, 2, 3, graph, pairs).unwrap());
/// let f = f_value(sum_package_distance::<State>);
///
/// // g = 0, h = 20 (1→2) + 30 (2→0)
/// assert_eq!(f(&State::initial(world)), 50.0);
/// ```
pub fn f_value<S: DeliveryState>(h: fn(&S) -> f64) -> impl Fn(&S) -> f64 + Clone {
    move |state: &S| state.cost() + h(state)
}

/// Always zero: A* degrades to uniform-cost search.
pub fn zero<S: DeliveryState>(_state: &S) -> f64 {
    0.0
}

/// Number of undelivered packages.
///
/// Admissible only when every edge costs at least 1.
pub fn undelivered_count<S: DeliveryState>(state: &S) -> f64 {
    state.num_undelivered() as f64
}

/// Sum of reduced-map source-to-destination costs over undelivered
/// packages. Ignores travel to the sources and vehicle reuse, so it never
/// overestimates.
pub fn sum_package_distance<S: DeliveryState>(state: &S) -> f64 {
    let world = state.world();
    world
        .packages()
        .iter()
        .zip(state.delivered())
        .filter(|(_, &delivered)| !delivered)
        .map(|(&(source, destination), _)| world.travel_cost(source, destination))
        .sum()
}

/// [`sum_package_distance`] times the undelivered share of packages.
pub fn sum_package_distance_scaled<S: DeliveryState>(state: &S) -> f64 {
    sum_package_distance(state) * undelivered_share(state)
}

/// Per undelivered package, the cheapest edge out of its current vertex
/// (the holder's location, or its source if waiting) plus the cheapest edge
/// into its destination when the two are not adjacent.
///
/// Each edge traversal carries at most one package, so the per-package
/// sums never count the same traversal twice.
pub fn sum_of_estimated_cost(state: &VanillaState) -> f64 {
    let world = state.world();
    let map = world.full_map();
    let mut total = 0.0;

    for (package, &(source, destination)) in world.packages().iter().enumerate() {
        if state.delivered()[package] {
            continue;
        }
        let at = state
            .holder(package)
            .and_then(|v| state.vehicle_location(v))
            .unwrap_or(source);
        if at == destination {
            continue;
        }
        total += map.min_edge_weight(at).unwrap_or(0.0);
        if map.weight(at, destination).is_none() {
            total += map.min_edge_weight(destination).unwrap_or(0.0);
        }
    }
    total
}

/// [`sum_of_estimated_cost`] times the undelivered share of packages.
pub fn sum_of_estimated_cost_scaled(state: &VanillaState) -> f64 {
    sum_of_estimated_cost(state) * undelivered_share(state)
}

fn undelivered_share<S: DeliveryState>(state: &S) -> f64 {
    let total = state.delivered().len();
    if total == 0 {
        return 0.0;
    }
    1.0 - state.num_delivered() as f64 / total as f64
}
