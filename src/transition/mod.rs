//! Successor generation for both state models.
//!
//! - [`CoarseSuccessors`]: package-at-a-time transitions for [`State`]
//! - [`vanilla_successors`]: one-edge-at-a-time transitions for [`VanillaState`]
//! - [`Combinations`], [`Permutations`]: the lazy index enumerators both rely on
//!
//! Neither generator deduplicates; equal successors are the search's concern.
//!
//! [`State`]: crate::models::State
//! [`VanillaState`]: crate::models::VanillaState

mod coarse;
mod combinatorics;
mod fine;

pub use coarse::CoarseSuccessors;
pub use combinatorics::{Combinations, Permutations};
pub use fine::vanilla_successors;
