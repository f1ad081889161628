//! A* with per-expansion successor pruning.

use std::fmt;

use crate::error::SearchError;

use super::{Frontier, SearchProgress};

/// How many successors of one expansion survive pruning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Keep `ceil(fraction * n)` successors, at least one.
    Fraction(f64),
    /// Keep at most this many successors.
    Count(usize),
    /// Keep every successor.
    Unbounded,
}

impl Bound {
    /// Interprets a numeric bound.
    ///
    /// A value in `(0, 1)` is a fraction, a whole number of at least one is
    /// a count, and anything at or below zero disables pruning.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBound`] for NaN or for a value of at
    /// least one that is not a whole number.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_delivery::search::Bound;
    ///
    /// assert_eq!(Bound::parse(0.5).unwrap(), Bound::Fraction(0.5));
    /// assert_eq!(Bound::parse(3.0).unwrap(), Bound::Count(3));
    /// assert_eq!(Bound::parse(-1.0).unwrap(), Bound::Unbounded);
    /// assert!(Bound::parse(2.5).is_err());
    /// ```
    pub fn parse(bound: f64) -> Result<Self, SearchError> {
        if bound.is_nan() {
            Err(SearchError::InvalidBound(bound))
        } else if bound <= 0.0 {
            Ok(Self::Unbounded)
        } else if bound < 1.0 {
            Ok(Self::Fraction(bound))
        } else if bound.is_finite() && bound.fract() == 0.0 {
            Ok(Self::Count(bound as usize))
        } else {
            Err(SearchError::InvalidBound(bound))
        }
    }

    /// Number of successors kept out of `n`.
    pub fn keep(self, n: usize) -> usize {
        match self {
            Self::Fraction(p) if n > 0 => ((p * n as f64).ceil() as usize).clamp(1, n),
            Self::Fraction(_) => 0,
            Self::Count(c) => c.min(n),
            Self::Unbounded => n,
        }
    }
}

/// A* that, at each expansion, sorts the successors by `f` and pushes only
/// the best [`Bound::keep`] of them.
///
/// Pruning gives up both completeness and optimality in exchange for a
/// bounded branching factor: the optimal goal may be cut off, and with
/// `Bound::Count(1)` the search follows a single greedy chain. With
/// [`Bound::Unbounded`] it behaves exactly like [`AStar`](super::AStar).
pub struct BoundedAStar<S, G, T, F> {
    frontier: Frontier<S>,
    expanded: usize,
    bound: Bound,
    is_goal: G,
    transition: T,
    f: F,
}

impl<S, G, T, F> BoundedAStar<S, G, T, F>
where
    F: Fn(&S) -> f64,
{
    /// Starts a search from `initial`.
    pub fn new(initial: S, is_goal: G, transition: T, f: F, bound: Bound) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(f(&initial), initial);
        Self {
            frontier,
            expanded: 0,
            bound,
            is_goal,
            transition,
            f,
        }
    }

    /// The pruning bound.
    pub fn bound(&self) -> Bound {
        self.bound
    }
}

impl<S, G, T, I, F> Iterator for BoundedAStar<S, G, T, F>
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
                tracing::debug!(f = priority, expanded = self.expanded, "bounded a* reached goal");
                return Some(state);
            }

            let mut scored: Vec<(f64, S)> = (self.transition)(&state)
                .into_iter()
                .map(|s| ((self.f)(&s), s))
                .collect();
            // Stable: equal-f successors keep generation order.
            scored.sort_by(|a, b| a.0.total_cmp(&b.0));
            let keep = self.bound.keep(scored.len());
            tracing::trace!(generated = scored.len(), keep, "pruned successors");
            scored.truncate(keep);

            for (f, successor) in scored {
                self.frontier.push(f, successor);
            }
        }
        tracing::debug!(expanded = self.expanded, "bounded a* exhausted");
        None
    }
}

impl<S, G, T, F> SearchProgress for BoundedAStar<S, G, T, F> {
    fn node_count(&self) -> usize {
        self.expanded
    }
}

impl<S, G, T, F> fmt::Debug for BoundedAStar<S, G, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedAStar")
            .field("bound", &self.bound)
            .field("open", &self.frontier.len())
            .field("expanded", &self.expanded)
            .finish()
    }
}
