//! Graph collaborators for the search core.
//!
//! - [`Graph`]: weighted undirected map
//! - [`DistanceMatrix`]: dense cost matrix
//! - [`ShortestPaths`]: Floyd–Warshall costs and path reconstruction
//! - [`fixtures`]: small hand-built problems
//! - [`random_problem`]: seeded random problem generator

mod adjacency;
pub mod fixtures;
mod generate;
mod matrix;
mod paths;

pub use adjacency::Graph;
pub use generate::random_problem;
pub use matrix::DistanceMatrix;
pub use paths::ShortestPaths;
