//! One-hop successor generation for [`VanillaState`].
//!
//! Every transition moves each non-stationary vehicle across exactly one
//! edge. After the move, held packages whose destination was reached are
//! dropped off, then every distinct way for empty-handed vehicles to pick
//! up a waiting package at their vertex yields its own successor.
//!
//! Successors come from three passes over stationary-vehicle masks:
//!
//! 1. wind-down: vehicles parked at the garage with nothing left for them
//!    to pick up stay where they are while the rest move;
//! 2. every non-empty subset of vehicles stays while the rest move (the
//!    full set only picks up or drops off);
//! 3. every vehicle moves.
//!
//! The passes overlap, so the same successor can appear more than once.
//! Successors equal to the parent are discarded.

use crate::models::{DeliveryState, VanillaState, World};

use super::combinatorics::Combinations;

/// Every successor of a fine-grained state. A goal state has none.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_delivery::graph::fixtures;
/// use u_delivery::models::{DeliveryState, VanillaState, World};
/// use u_delivery::transition::vanilla_successors;
///
/// let (graph, pairs) = fixtures::triangle();
/// let world = Arc::new(World::new(1, 2, 3, graph, pairs).unwrap());
/// let succ = vanilla_successors(&VanillaState::initial(world));
///
/// // Step to 1 (and optionally pick up package 0 there) or step to 2
/// // (and optionally pick up package 1).
/// assert_eq!(succ.len(), 4);
/// ```
pub fn vanilla_successors(state: &VanillaState) -> Vec<VanillaState> {
    if state.is_goal() {
        return Vec::new();
    }

    let vehicles = state.vehicle_count();
    let mut out = Vec::new();

    let parked = parked_vehicles(state);
    if parked.iter().any(|&p| p) {
        expand(state, &parked, &mut out);
    }

    for size in 1..=vehicles {
        for subset in Combinations::new(vehicles, size) {
            let mut stationary = vec![false; vehicles];
            for v in subset {
                stationary[v] = true;
            }
            expand(state, &stationary, &mut out);
        }
    }

    expand(state, &vec![false; vehicles], &mut out);

    tracing::trace!(successors = out.len(), "expanded vanilla state");
    out
}

/// Vehicles at the garage, empty-handed, while every undelivered package
/// is already in some vehicle.
fn parked_vehicles(state: &VanillaState) -> Vec<bool> {
    let garage = state.world().garage();
    let nothing_waiting = state
        .delivered()
        .iter()
        .enumerate()
        .all(|(k, &d)| d || state.holder(k).is_some());

    (0..state.vehicle_count())
        .map(|v| {
            nothing_waiting
                && state.held()[v].is_none()
                && state.vehicle_location(v) == Some(garage)
        })
        .collect()
}

/// Appends every successor in which exactly the non-stationary vehicles
/// move one edge.
fn expand(state: &VanillaState, stationary: &[bool], out: &mut Vec<VanillaState>) {
    let world = state.world();
    let locations: Vec<usize> = (0..state.vehicle_count())
        .map(|v| state.vehicle_location(v).unwrap_or(world.garage()))
        .collect();

    let movers: Vec<usize> = (0..locations.len()).filter(|&v| !stationary[v]).collect();
    let choices: Vec<Vec<(usize, f64)>> = movers
        .iter()
        .map(|&v| world.full_map().neighbors(locations[v]).collect())
        .collect();
    if choices.iter().any(Vec::is_empty) {
        return;
    }

    // Odometer over the cross product of mover neighbor lists.
    let mut odometer = vec![0usize; movers.len()];
    loop {
        let mut next_locations = locations.clone();
        let mut step = 0.0;
        for (slot, &v) in movers.iter().enumerate() {
            let (to, weight) = choices[slot][odometer[slot]];
            next_locations[v] = to;
            step += weight;
        }
        emit(state, world, &movers, &next_locations, step, out);

        let Some(slot) = (0..odometer.len()).rev().find(|&s| odometer[s] + 1 < choices[s].len())
        else {
            break;
        };
        odometer[slot] += 1;
        for reset in &mut odometer[slot + 1..] {
            *reset = 0;
        }
    }
}

/// Builds the successors for one joint move: drop-offs first, then every
/// pickup assignment.
fn emit(
    state: &VanillaState,
    world: &World,
    movers: &[usize],
    locations: &[usize],
    step: f64,
    out: &mut Vec<VanillaState>,
) {
    let mut delivered = state.delivered().to_vec();
    let mut held = state.held().to_vec();

    for (v, slot) in held.iter_mut().enumerate() {
        if let Some(package) = *slot {
            if world.package_destination(package) == Some(locations[v]) {
                delivered[package] = true;
                *slot = None;
            }
        }
    }

    let mut paths = state.vehicle_paths().to_vec();
    for &v in movers {
        paths[v].push(locations[v]);
    }
    let cost = state.cost() + step;

    let mut assignments = Vec::new();
    pickups(world, locations, 0, &mut delivered, &mut held, &mut assignments);

    for (delivered, held) in assignments {
        let successor = VanillaState::from_parts(
            state.world_handle().clone(),
            paths.clone(),
            delivered,
            held,
            cost,
        );
        if successor != *state {
            out.push(successor);
        }
    }
}

/// Recursively enumerates pickups for vehicles `vehicle..`: each empty-handed
/// vehicle takes nothing or one waiting package whose source is its vertex.
fn pickups(
    world: &World,
    locations: &[usize],
    vehicle: usize,
    delivered: &mut [bool],
    held: &mut [Option<usize>],
    out: &mut Vec<(Vec<bool>, Vec<Option<usize>>)>,
) {
    if vehicle == locations.len() {
        out.push((delivered.to_vec(), held.to_vec()));
        return;
    }

    pickups(world, locations, vehicle + 1, delivered, held, out);
    if held[vehicle].is_some() {
        return;
    }

    let here = locations[vehicle];
    for (package, &(source, destination)) in world.packages().iter().enumerate() {
        if source != here || delivered[package] || held.contains(&Some(package)) {
            continue;
        }
        if source == destination {
            delivered[package] = true;
            pickups(world, locations, vehicle + 1, delivered, held, out);
            delivered[package] = false;
        } else {
            held[vehicle] = Some(package);
            pickups(world, locations, vehicle + 1, delivered, held, out);
            held[vehicle] = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{fixtures, random_problem, Graph};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn triangle(vehicles: usize) -> Arc<World> {
        let (graph, pairs) = fixtures::triangle();
        Arc::new(World::new(vehicles, 2, 3, graph, pairs).expect("valid world"))
    }

    #[test]
    fn test_initial_single_vehicle() {
        let succ = vanilla_successors(&VanillaState::initial(triangle(1)));
        let summary: Vec<_> = succ
            .iter()
            .map(|s| (s.vehicle_location(0), s.held()[0], s.cost()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some(1), None, 10.0),
                (Some(1), Some(0), 10.0),
                (Some(2), None, 30.0),
                (Some(2), Some(1), 30.0),
            ]
        );
    }

    #[test]
    fn test_some_vehicles_wait_while_others_move() {
        let succ = vanilla_successors(&VanillaState::initial(triangle(2)));
        for (waiting, moving) in [(0, 1), (1, 0)] {
            for (to, step) in [(1, 10.0), (2, 30.0)] {
                assert!(
                    succ.iter().any(|s| s.vehicle_path(waiting) == Some(&[0][..])
                        && s.vehicle_location(moving) == Some(to)
                        && s.held()[waiting].is_none()
                        && s.cost() == step),
                    "vehicle {waiting} waits while vehicle {moving} steps to {to}"
                );
            }
        }
    }

    #[test]
    fn test_drop_off_on_arrival() {
        let w = triangle(1);
        let s = VanillaState::new(w, vec![vec![0, 1]], vec![false, false], vec![Some(0)], 10.0)
            .expect("valid");
        let arrived: Vec<_> = vanilla_successors(&s)
            .into_iter()
            .filter(|s| s.vehicle_location(0) == Some(2))
            .collect();
        // Drop package 0, then pick up package 1 or not.
        assert_eq!(arrived.len(), 2);
        assert!(arrived.iter().all(|s| s.delivered()[0]));
        assert_eq!(arrived[0].held(), &[None]);
        assert_eq!(arrived[1].held(), &[Some(1)]);
        assert!(arrived.iter().all(|s| s.cost() == 30.0));
    }

    #[test]
    fn test_stationary_pickup_is_offered() {
        let w = triangle(1);
        // Standing at 1 empty-handed: staying put and picking up is a
        // distinct successor with no added cost.
        let s = VanillaState::new(w, vec![vec![0, 1]], vec![false, false], vec![None], 10.0)
            .expect("valid");
        let succ = vanilla_successors(&s);
        assert!(succ
            .iter()
            .any(|t| t.vehicle_location(0) == Some(1) && t.held() == [Some(0)] && t.cost() == 10.0));
        assert!(succ.iter().all(|t| *t != s));
    }

    #[test]
    fn test_parked_vehicle_waits() {
        let w = triangle(2);
        // Vehicle 1 carries the last package; vehicle 0 is home and idle.
        let s = VanillaState::new(
            w,
            vec![vec![0], vec![0, 2]],
            vec![true, false],
            vec![None, Some(1)],
            30.0,
        )
        .expect("valid");
        let succ = vanilla_successors(&s);
        let goal = succ.iter().find(|t| t.is_goal()).expect("goal reachable in one hop");
        assert_eq!(goal.vehicle_path(0), Some(&[0][..]));
        assert_eq!(goal.cost(), 60.0);
    }

    #[test]
    fn test_same_vertex_package_delivers_on_pickup() {
        let graph = Graph::from_edges(2, &[(0, 1, 1.0)]).expect("valid");
        let w = Arc::new(World::new(1, 1, 2, graph, vec![(1, 1)]).expect("valid"));
        let succ = vanilla_successors(&VanillaState::initial(w));
        assert!(succ.iter().any(|s| s.all_delivered() && s.held() == [None]));
    }

    #[test]
    fn test_goal_is_terminal() {
        let w = triangle(1);
        let goal = VanillaState::new(w, vec![vec![0, 1, 2, 0]], vec![true, true], vec![None], 60.0)
            .expect("valid");
        assert!(vanilla_successors(&goal).is_empty());
    }

    #[test]
    fn test_isolated_vehicle_only_waits() {
        let graph = Graph::from_edges(3, &[(1, 2, 1.0)]).expect("valid");
        let w = Arc::new(World::new(1, 1, 3, graph, vec![(1, 2)]).expect("valid"));
        assert!(vanilla_successors(&VanillaState::initial(w)).is_empty());
    }

    proptest! {
        #[test]
        fn prop_successor_cost_is_monotonic(seed in 0u64..100, vehicles in 1usize..3) {
            let (graph, pairs) = random_problem(5, 2, 0.4, seed);
            let w = Arc::new(World::new(vehicles, 2, 5, graph, pairs).expect("valid world"));
            let mut frontier = vec![VanillaState::initial(w)];
            for _ in 0..2 {
                let mut next = Vec::new();
                for s in &frontier {
                    for succ in vanilla_successors(s) {
                        prop_assert!(succ.cost() >= s.cost());
                        prop_assert!(succ != *s);
                        prop_assert!(succ.num_delivered() >= s.num_delivered());
                        next.push(succ);
                    }
                }
                frontier = next;
            }
        }
    }
}
