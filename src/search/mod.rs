//! Informed search over any state space, as lazy iterators of goal states.
//!
//! - [`AStar`]: best-first search by `f = g + h`
//! - [`BoundedAStar`]: A* that keeps only the best [`Bound`] successors of
//!   each expansion
//! - [`LocalBeam`]: rounds of at most `k_limit` states
//! - [`NodeCounted`]: pairs every goal with the search effort spent so far
//!
//! Every search is parameterized by an initial state, a goal test, a
//! transition function and a priority function, and keeps its whole
//! frontier inside the iterator. Pulling the next item resumes the search
//! where the previous goal was found; dropping the iterator releases the
//! frontier. An exhausted search simply ends.
//!
//! No closed set is kept: a state reached along several paths is expanded
//! once per path, so every distinct path to a goal is eventually yielded.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use u_delivery::graph::fixtures;
//! use u_delivery::heuristics::{f_value, sum_package_distance};
//! use u_delivery::models::{DeliveryState, State, World};
//! use u_delivery::search::{a_star, SearchProgress};
//!
//! let (graph, pairs) = fixtures::triangle();
//! let world = Arc::new(World::new(1, 2, 3, graph, pairs).unwrap());
//!
//! let mut search = a_star(
//!     State::initial(world),
//!     State::is_goal,
//!     State::successors,
//!     f_value(sum_package_distance::<State>),
//! );
//! let best = search.next().unwrap();
//! assert_eq!(best.cost(), 60.0);
//! assert!(search.node_count() > 0);
//! ```

mod astar;
mod beam;
mod bounded;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

pub use astar::AStar;
pub use beam::LocalBeam;
pub use bounded::{Bound, BoundedAStar};

use crate::error::SearchError;

/// Search effort reporting shared by every search iterator.
pub trait SearchProgress {
    /// Nodes counted so far: priority-queue pops for the A* family,
    /// generated successors for local beam search.
    fn node_count(&self) -> usize;

    /// Adapts the search to yield `(goal, node_count)` pairs.
    fn with_node_count(self) -> NodeCounted<Self>
    where
        Self: Sized,
    {
        NodeCounted { inner: self }
    }
}

/// Yields each goal together with the node count at the moment it was found.
#[derive(Debug, Clone)]
pub struct NodeCounted<I> {
    inner: I,
}

impl<I> NodeCounted<I> {
    /// Returns the wrapped search.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator + SearchProgress> Iterator for NodeCounted<I> {
    type Item = (I::Item, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let goal = self.inner.next()?;
        Some((goal, self.inner.node_count()))
    }
}

/// Creates an [`AStar`] search.
pub fn a_star<S, G, T, I, F>(initial: S, is_goal: G, transition: T, f: F) -> AStar<S, G, T, F>
where
    G: Fn(&S) -> bool,
    T: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
    F: Fn(&S) -> f64,
{
    AStar::new(initial, is_goal, transition, f)
}

/// Creates a [`BoundedAStar`] search, interpreting `bound` with
/// [`Bound::parse`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidBound`] for a non-integral bound of at
/// least one, or NaN.
pub fn bounded_a_star<S, G, T, I, F>(
    initial: S,
    is_goal: G,
    transition: T,
    f: F,
    bound: f64,
) -> Result<BoundedAStar<S, G, T, F>, SearchError>
where
    G: Fn(&S) -> bool,
    T: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
    F: Fn(&S) -> f64,
{
    Ok(BoundedAStar::new(initial, is_goal, transition, f, Bound::parse(bound)?))
}

/// Creates a [`LocalBeam`] search.
///
/// # Errors
///
/// Returns [`SearchError::InvalidBeamWidth`] if `k_limit` is zero.
pub fn local_beam_search<S, G, T, I, F>(
    initial: S,
    is_goal: G,
    transition: T,
    f: F,
    k_limit: usize,
) -> Result<LocalBeam<S, G, T, F>, SearchError>
where
    S: Clone,
    G: Fn(&S) -> bool,
    T: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
    F: Fn(&S) -> f64,
{
    LocalBeam::new(initial, is_goal, transition, f, k_limit)
}

/// Min-priority open list ordered by `(f, insertion order)`.
///
/// The insertion counter breaks ties between equal priorities so states
/// themselves are never compared, and equal-`f` states pop first-in
/// first-out.
#[derive(Debug, Clone)]
pub(crate) struct Frontier<S> {
    heap: BinaryHeap<Entry<S>>,
    counter: u64,
}

impl<S> Frontier<S> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            counter: 0,
        }
    }

    pub(crate) fn push(&mut self, f: f64, state: S) {
        self.heap.push(Entry {
            f,
            seq: self.counter,
            state,
        });
        self.counter += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<(f64, S)> {
        self.heap.pop().map(|e| (e.f, e.state))
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Debug, Clone)]
struct Entry<S> {
    f: f64,
    seq: u64,
    state: S,
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for Entry<S> {}

impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Entry<S> {
    // Reversed so the max-heap pops the smallest (f, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontier_pops_lowest_f_first() {
        let mut frontier = Frontier::new();
        frontier.push(3.0, "c");
        frontier.push(1.0, "a");
        frontier.push(2.0, "b");
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop(), Some((1.0, "a")));
        assert_eq!(frontier.pop(), Some((2.0, "b")));
        assert_eq!(frontier.pop(), Some((3.0, "c")));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_frontier_ties_are_fifo() {
        let mut frontier = Frontier::new();
        for name in ["first", "second", "third"] {
            frontier.push(5.0, name);
        }
        let order: Vec<_> = std::iter::from_fn(|| frontier.pop()).map(|(_, s)| s).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }
}
