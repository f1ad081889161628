//! # u-delivery
//!
//! Multi-vehicle pickup-and-delivery planning by informed state-space
//! search. A fleet starts at a garage vertex of a weighted map, carries
//! every package from its source to its destination and returns home; the
//! searches look for the cheapest such plan.
//!
//! ## Modules
//!
//! - [`graph`]: weighted maps, all-pairs shortest paths, fixtures and random problems
//! - [`models`]: the shared [`World`](models::World) and the two state models
//! - [`transition`]: successor generation for each state model
//! - [`heuristics`]: remaining-cost estimates and `f = g + h`
//! - [`search`]: A*, bounded A* and local beam search as lazy iterators
//! - [`simulation`]: configured runs, batches on random maps and reports
//! - [`error`]: configuration, query and search-parameter errors
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use u_delivery::graph::fixtures;
//! use u_delivery::models::World;
//! use u_delivery::simulation::{solve, Algorithm, SearchConfig};
//!
//! let (graph, pairs) = fixtures::ogg();
//! let world = Arc::new(World::new(2, 3, 9, graph, pairs).unwrap());
//!
//! let optimal = solve(world.clone(), &SearchConfig::default()).unwrap();
//! let beam = solve(
//!     world,
//!     &SearchConfig::default().with_algorithm(Algorithm::LocalBeam { k_limit: 4 }),
//! )
//! .unwrap();
//!
//! let best = optimal.first().unwrap().cost;
//! assert!(beam.first().unwrap().cost >= best);
//! ```

pub mod error;
pub mod graph;
pub mod heuristics;
pub mod models;
pub mod search;
pub mod simulation;
pub mod transition;

pub use error::{ConfigError, Error, QueryError, SearchError};
