//! Package-granularity successor generation.
//!
//! One transition assigns distinct undelivered packages to a non-empty
//! subset of vehicles; each chosen vehicle drives to its package's source
//! and on to the destination as a single step. Once every package is
//! delivered, the only successor sends every vehicle home.
//!
//! Moves between disconnected parts of the map have infinite cost; such
//! successors are skipped, so an unreachable package leaves no way forward.
//!
//! # Complexity
//!
//! A state with N vehicles and U undelivered packages has
//! `Σ_{i=1..min(N,U)} C(N, i) · P(U, i)` successors. They are produced one at
//! a time; nothing beyond the current subset and permutation is kept.

use crate::models::{DeliveryState, State};

use super::combinatorics::{Combinations, Permutations};

/// Lazy iterator over the successors of a coarse [`State`].
///
/// Order: subset size ascending, then vehicle subsets lexicographically,
/// then package arrangements lexicographically. No deduplication happens
/// here; equal successors are left for the search to handle. A goal state
/// has no successors.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_delivery::graph::fixtures;
/// use u_delivery::models::{DeliveryState, State, World};
///
/// let (graph, pairs) = fixtures::triangle();
/// let world = Arc::new(World::new(2, 2, 3, graph, pairs).unwrap());
/// let initial = State::initial(world);
///
/// // 2 vehicles, 2 packages: C(2,1)·P(2,1) + C(2,2)·P(2,2) = 4 + 2
/// assert_eq!(initial.successors().count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct CoarseSuccessors {
    parent: State,
    undelivered: Vec<usize>,
    progress: Progress,
}

#[derive(Debug, Clone)]
enum Progress {
    /// All packages delivered: one final move back to the garage.
    Return,
    /// Enumerating package assignments for vehicle subsets of `size`.
    Assign {
        size: usize,
        subsets: Combinations,
        vehicles: Vec<usize>,
        arrangements: Permutations,
    },
    Done,
}

impl CoarseSuccessors {
    /// Prepares successor generation for `parent`.
    pub fn new(parent: State) -> Self {
        let undelivered: Vec<usize> = parent
            .delivered()
            .iter()
            .enumerate()
            .filter(|(_, &d)| !d)
            .map(|(k, _)| k)
            .collect();

        let progress = if parent.is_goal() {
            Progress::Done
        } else if undelivered.is_empty() {
            Progress::Return
        } else {
            Progress::Assign {
                size: 1,
                subsets: Combinations::new(parent.vehicle_count(), 1),
                vehicles: Vec::new(),
                arrangements: Permutations::new(0, 1),
            }
        };

        Self {
            parent,
            undelivered,
            progress,
        }
    }
}

impl Iterator for CoarseSuccessors {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        let Self {
            parent,
            undelivered,
            progress,
        } = self;
        let vehicle_count = parent.vehicle_count();
        let max_size = vehicle_count.min(undelivered.len());

        loop {
            match progress {
                Progress::Done => return None,
                Progress::Return => {
                    *progress = Progress::Done;
                    let home = return_home(parent);
                    if home.cost().is_finite() {
                        return Some(home);
                    }
                }
                Progress::Assign {
                    size,
                    subsets,
                    vehicles,
                    arrangements,
                } => {
                    if let Some(arrangement) = arrangements.next() {
                        let successor = assign(parent, vehicles, &arrangement, undelivered);
                        if successor.cost().is_finite() {
                            return Some(successor);
                        }
                        continue;
                    }
                    if let Some(subset) = subsets.next() {
                        *vehicles = subset;
                        *arrangements = Permutations::new(undelivered.len(), *size);
                        continue;
                    }
                    if *size >= max_size {
                        *progress = Progress::Done;
                        continue;
                    }
                    *size += 1;
                    *subsets = Combinations::new(vehicle_count, *size);
                    *arrangements = Permutations::new(0, 1);
                }
            }
        }
    }
}

/// Vehicle `vehicles[i]` delivers package `undelivered[arrangement[i]]`.
fn assign(parent: &State, vehicles: &[usize], arrangement: &[usize], undelivered: &[usize]) -> State {
    let world = parent.world_handle();
    let mut paths = parent.vehicle_paths().to_vec();
    let mut delivered = parent.delivered().to_vec();
    let mut cost = parent.cost();

    for (&vehicle, &slot) in vehicles.iter().zip(arrangement) {
        let package = undelivered[slot];
        let (source, destination) = world.packages()[package];
        let path = &mut paths[vehicle];
        let here = path.last().copied().unwrap_or(world.garage());

        cost += world.travel_cost(here, source) + world.travel_cost(source, destination);
        path.push(source);
        path.push(destination);
        delivered[package] = true;
    }

    State::from_parts(world.clone(), paths, delivered, cost)
}

/// Sends every vehicle that is away back to the garage.
fn return_home(parent: &State) -> State {
    let world = parent.world_handle();
    let garage = world.garage();
    let mut paths = parent.vehicle_paths().to_vec();
    let mut cost = parent.cost();

    for path in paths.iter_mut() {
        let here = path.last().copied().unwrap_or(garage);
        if here != garage {
            cost += world.travel_cost(here, garage);
            path.push(garage);
        }
    }

    State::from_parts(world.clone(), paths, parent.delivered().to_vec(), cost)
}
