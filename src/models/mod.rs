//! Domain model types for pickup-and-delivery search.
//!
//! Provides the immutable problem description, the two state models the
//! search runs over, and the routes reconstructed from finished states.

mod route;
mod state;
mod vanilla;
mod world;

pub use route::Route;
pub use state::{DeliveryState, State};
pub use vanilla::VanillaState;
pub use world::World;
