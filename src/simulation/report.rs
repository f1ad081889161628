//! Search results and their JSON form.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::error::Error;
use crate::models::Route;

use super::{SearchConfig, SimulationConfig};

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// One goal state found by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionRecord {
    /// Total travel cost (g of the goal).
    pub cost: f64,
    /// Search effort when the goal was found.
    pub node_count: usize,
    /// Search time from start until this goal, in seconds when serialized.
    #[serde(serialize_with = "as_secs")]
    pub elapsed: Duration,
    /// Concrete route per vehicle.
    pub routes: Vec<Route>,
}

/// Outcome of searching one problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    /// Configuration the search ran with.
    pub config: SearchConfig,
    /// Time spent building the reduced map.
    #[serde(serialize_with = "as_secs")]
    pub preprocessing: Duration,
    /// Goals in the order they were found; empty if none is reachable.
    pub solutions: Vec<SolutionRecord>,
}

impl SearchReport {
    /// The first goal found; optimal for A* with an admissible heuristic.
    pub fn first(&self) -> Option<&SolutionRecord> {
        self.solutions.first()
    }

    /// The cheapest goal found.
    pub fn best(&self) -> Option<&SolutionRecord> {
        self.solutions.iter().min_by(|a, b| a.cost.total_cmp(&b.cost))
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Outcome of a simulation over random problems.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Problem shape.
    pub simulation: SimulationConfig,
    /// One report per run, in seed order.
    pub runs: Vec<SearchReport>,
    /// Averages over runs that found a solution.
    pub averages: Option<Averages>,
}

impl SimulationReport {
    /// Builds the report and computes its averages.
    pub fn new(simulation: SimulationConfig, runs: Vec<SearchReport>) -> Self {
        let averages = Averages::from_reports(&runs);
        Self {
            simulation,
            runs,
            averages,
        }
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Mean first-solution figures over a set of runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    /// Mean solution cost.
    pub cost: f64,
    /// Mean map pre-processing time in seconds.
    pub preprocessing: f64,
    /// Mean node count.
    pub node_count: f64,
    /// Mean search time to the first solution in seconds.
    pub search_time: f64,
    /// Runs contributing to the averages.
    pub runs: usize,
}

impl Averages {
    /// Averages the first solution of every report that has one; `None` if
    /// no report does.
    pub fn from_reports(reports: &[SearchReport]) -> Option<Self> {
        let solved: Vec<(&SearchReport, &SolutionRecord)> = reports
            .iter()
            .filter_map(|r| r.first().map(|s| (r, s)))
            .collect();
        if solved.is_empty() {
            return None;
        }

        let n = solved.len() as f64;
        let mean = |value: fn(&SearchReport, &SolutionRecord) -> f64| {
            solved.iter().map(|&(r, s)| value(r, s)).sum::<f64>() / n
        };
        Some(Self {
            cost: mean(|_, s| s.cost),
            preprocessing: mean(|r, _| r.preprocessing.as_secs_f64()),
            node_count: mean(|_, s| s.node_count as f64),
            search_time: mean(|_, s| s.elapsed.as_secs_f64()),
            runs: solved.len(),
        })
    }
}
