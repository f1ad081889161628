//! A* search.

use std::fmt;

use super::{Frontier, SearchProgress};

/// Lazy A* search yielding goal states in order of their priority.
///
/// Pops the state with the lowest `f`; a goal is yielded without being
/// expanded, any other state has all of its successors pushed. With an
/// admissible heuristic the first goal has minimal cost. With `h = 0` the
/// search expands states in non-decreasing order of `g`.
pub struct AStar<S, G, T, F> {
    frontier: Frontier<S>,
    expanded: usize,
    is_goal: G,
    transition: T,
    f: F,
}

impl<S, G, T, F> AStar<S, G, T, F>
where
    F: Fn(&S) -> f64,
{
    /// Starts a search from `initial`.
    pub fn new(initial: S, is_goal: G, transition: T, f: F) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(f(&initial), initial);
        Self {
            frontier,
            expanded: 0,
            is_goal,
            transition,
            f,
        }
    }

    /// States waiting in the open list.
    pub fn open_len(&self) -> usize {
        self.frontier.len()
    }
}

impl<S, G, T, I, F> Iterator for AStar<S, G, T, F>
where
    G: Fn(&S) -> bool,
    T: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
    F: Fn(&S) -> f64,
{
    type Item = S;

    fn next(&mut self) -> Option<S> {
        while let Some((priority, state)) = self.frontier.pop() {
            self.expanded += 1;
            if (self.is_goal)(&state) {
                tracing::debug!(f = priority, expanded = self.expanded, "a* reached goal");
                return Some(state);
            }
            for successor in (self.transition)(&state) {
                self.frontier.push((self.f)(&successor), successor);
            }
        }
        tracing::debug!(expanded = self.expanded, "a* exhausted");
        None
    }
}

impl<S, G, T, F> SearchProgress for AStar<S, G, T, F> {
    fn node_count(&self) -> usize {
        self.expanded
    }
}

impl<S, G, T, F> fmt::Debug for AStar<S, G, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AStar")
            .field("open", &self.frontier.len())
            .field("expanded", &self.expanded)
            .finish()
    }
}
