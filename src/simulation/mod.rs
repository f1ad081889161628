//! Running configured searches and collecting results.
//!
//! - [`SearchConfig`], [`SimulationConfig`]: serde-backed run settings
//! - [`solve`]: one problem, one configured search
//! - [`simulate`]: a reproducible batch of random problems
//! - [`SearchReport`], [`SimulationReport`], [`Averages`]: results, JSON-ready
//! - [`Stopwatch`]: explicit timing handle

mod config;
mod report;
mod runner;
mod timing;

pub use config::{Algorithm, SearchConfig, SimulationConfig, StateModel};
pub use report::{Averages, SearchReport, SimulationReport, SolutionRecord};
pub use runner::{simulate, solve};
pub use timing::Stopwatch;
