//! Local beam search.

use std::fmt;

use crate::error::SearchError;

use super::SearchProgress;

/// Lazy local beam search.
///
/// Each round truncates the beam to the `k_limit` states with the lowest
/// `f` (ties keep generation order), then expands every member in that
/// order. Every generated successor that passes the goal test is yielded
/// the moment it is generated, and the search carries on; all successors
/// of the round, goals included, form the next beam.
///
/// The initial state is treated as the sole successor of an empty round,
/// so an initial goal is yielded too.
///
/// Local beam search is neither complete nor optimal: the optimal goal can
/// fall out of the beam, and in a state space with cycles the search may
/// run forever without finding a goal.
pub struct LocalBeam<S, G, T, F> {
    k_limit: usize,
    members: std::vec::IntoIter<(f64, S)>,
    pending: std::vec::IntoIter<S>,
    next_round: Vec<(f64, S)>,
    generated: usize,
    rounds: usize,
    is_goal: G,
    transition: T,
    f: F,
}

impl<S, G, T, F> LocalBeam<S, G, T, F> {
    /// Starts a search from `initial` with beam width `k_limit`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBeamWidth`] if `k_limit` is zero.
    pub fn new(initial: S, is_goal: G, transition: T, f: F, k_limit: usize) -> Result<Self, SearchError> {
        if k_limit == 0 {
            return Err(SearchError::InvalidBeamWidth(k_limit));
        }
        Ok(Self {
            k_limit,
            members: Vec::new().into_iter(),
            pending: vec![initial].into_iter(),
            next_round: Vec::new(),
            generated: 0,
            rounds: 0,
            is_goal,
            transition,
            f,
        })
    }

    /// Beam width.
    pub fn k_limit(&self) -> usize {
        self.k_limit
    }

    /// Rounds started so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl<S, G, T, I, F> Iterator for LocalBeam<S, G, T, F>
where
    S: Clone,
    G: Fn(&S) -> bool,
    T: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
    F: Fn(&S) -> f64,
{
    type Item = S;

    fn next(&mut self) -> Option<S> {
        loop {
            if let Some(state) = self.pending.next() {
                self.generated += 1;
                let priority = (self.f)(&state);
                if (self.is_goal)(&state) {
                    tracing::debug!(
                        f = priority,
                        generated = self.generated,
                        round = self.rounds,
                        "beam reached goal"
                    );
                    self.next_round.push((priority, state.clone()));
                    return Some(state);
                }
                self.next_round.push((priority, state));
                continue;
            }

            if let Some((_, member)) = self.members.next() {
                let successors: Vec<S> = (self.transition)(&member).into_iter().collect();
                self.pending = successors.into_iter();
                continue;
            }

            if self.next_round.is_empty() {
                tracing::debug!(generated = self.generated, rounds = self.rounds, "beam exhausted");
                return None;
            }

            let mut beam = std::mem::take(&mut self.next_round);
            beam.sort_by(|a, b| a.0.total_cmp(&b.0));
            beam.truncate(self.k_limit);
            self.rounds += 1;
            tracing::trace!(round = self.rounds, width = beam.len(), "beam round");
            self.members = beam.into_iter();
        }
    }
}

impl<S, G, T, F> SearchProgress for LocalBeam<S, G, T, F> {
    fn node_count(&self) -> usize {
        self.generated
    }
}

impl<S, G, T, F> fmt::Debug for LocalBeam<S, G, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalBeam")
            .field("k_limit", &self.k_limit)
            .field("rounds", &self.rounds)
            .field("generated", &self.generated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;
    use crate::heuristics::{f_value, sum_package_distance, zero};
    use crate::models::{DeliveryState, State, World};
    use crate::search::{local_beam_search, AStar};
    use std::sync::Arc;

    fn world(vehicles: usize) -> Arc<World> {
        let (graph, pairs) = fixtures::ogg();
        Arc::new(World::new(vehicles, 3, 9, graph, pairs).expect("valid world"))
    }

    fn beam(world: Arc<World>, k_limit: usize) -> impl Iterator<Item = State> + SearchProgress {
        LocalBeam::new(
            State::initial(world),
            State::is_goal,
            State::successors,
            f_value(sum_package_distance::<State>),
            k_limit,
        )
        .expect("valid width")
    }

    #[test]
    fn test_rejects_zero_width() {
        let result = local_beam_search(
            State::initial(world(1)),
            State::is_goal,
            State::successors,
            f_value(zero::<State>),
            0,
        );
        assert_eq!(result.err(), Some(SearchError::InvalidBeamWidth(0)));
    }

    #[test]
    fn test_narrow_beam_finds_goal() {
        let mut search = LocalBeam::new(
            State::initial(world(2)),
            State::is_goal,
            State::successors,
            f_value(sum_package_distance::<State>),
            1,
        )
        .expect("valid width");
        let goal = search.next().expect("goal");
        assert!(goal.is_goal());
        assert!(search.node_count() > 0);
        assert!(search.rounds() >= 2);
        assert_eq!(search.k_limit(), 1);
    }

    #[test]
    fn test_goal_never_cheaper_than_optimum() {
        let w = world(2);
        let optimum = AStar::new(
            State::initial(w.clone()),
            State::is_goal,
            State::successors,
            f_value(sum_package_distance::<State>),
        )
        .next()
        .expect("solution")
        .cost();
        for k in [1, 3, 10] {
            let found = beam(w.clone(), k).next().expect("goal");
            assert!(found.cost() >= optimum);
        }
    }

    #[test]
    fn test_unlimited_beam_yields_every_goal_path() {
        let (graph, pairs) = fixtures::triangle();
        let w = Arc::new(World::new(2, 2, 3, graph, pairs).expect("valid world"));
        let from_a_star = AStar::new(
            State::initial(w.clone()),
            State::is_goal,
            State::successors,
            f_value(zero::<State>),
        )
        .count();
        let from_beam = beam(w, usize::MAX).count();
        assert_eq!(from_beam, from_a_star);
    }

    #[test]
    fn test_node_count_is_generated_successors() {
        let (graph, pairs) = fixtures::triangle();
        let w = Arc::new(World::new(1, 2, 3, graph, pairs).expect("valid world"));
        let counted: Vec<_> = beam(w, 5).with_node_count().collect();
        // Initial, round one {pkg0, pkg1}, round two {pkg0 then pkg1 (goal),
        // pkg1 then pkg0}, round three {return home (goal)}.
        assert_eq!(counted.len(), 2);
        assert_eq!(counted[0].1, 4);
        assert_eq!(counted[1].1, 6);
    }
}
