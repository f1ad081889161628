//! Runs configured searches on single problems and random batches.

use std::sync::Arc;

use crate::error::{Error, SearchError};
use crate::graph::random_problem;
use crate::heuristics::f_value;
use crate::models::{DeliveryState, State, VanillaState, World};
use crate::search::{AStar, Bound, BoundedAStar, LocalBeam, SearchProgress};

use super::{
    Algorithm, SearchConfig, SearchReport, SimulationConfig, SimulationReport, SolutionRecord,
    StateModel, Stopwatch,
};

/// Solves one problem.
///
/// Parameters are validated before anything else runs. The reduced map is
/// built (and timed) next, then the configured search starts from the
/// initial state and collects up to `num_solutions` goals. A problem with
/// no reachable goal yields an empty solution list, not an error.
///
/// # Errors
///
/// Returns [`Error::Search`] for rejected parameters.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_delivery::graph::fixtures;
/// use u_delivery::models::World;
/// use u_delivery::simulation::{solve, SearchConfig};
///
/// let (graph, pairs) = fixtures::triangle();
/// let world = Arc::new(World::new(1, 2, 3, graph, pairs).unwrap());
///
/// let report = solve(world, &SearchConfig::default()).unwrap();
/// assert_eq!(report.first().unwrap().cost, 60.0);
/// ```
pub fn solve(world: Arc<World>, config: &SearchConfig) -> Result<SearchReport, Error> {
    config.validate()?;

    let timer = Stopwatch::start();
    world.process_map();
    let preprocessing = timer.stop();

    let solutions = match config.model {
        StateModel::Coarse => run(State::initial(world), config)?,
        StateModel::Vanilla => run(VanillaState::initial(world), config)?,
    };

    tracing::debug!(
        model = config.model.name(),
        heuristic = config.heuristic.name(),
        algorithm = config.algorithm.name(),
        solutions = solutions.len(),
        "search finished"
    );

    Ok(SearchReport {
        config: *config,
        preprocessing,
        solutions,
    })
}

/// Solves `sim.runs` random problems; run `i` is generated from seed `i`,
/// so a simulation is reproducible.
///
/// # Errors
///
/// Returns [`Error::Search`] for rejected search parameters and
/// [`Error::Config`] if the problem shape cannot form a valid world.
pub fn simulate(sim: &SimulationConfig, config: &SearchConfig) -> Result<SimulationReport, Error> {
    config.validate()?;

    let mut runs = Vec::with_capacity(sim.runs);
    for run in 0..sim.runs {
        let (graph, pairs) = random_problem(sim.vertices, sim.packages, sim.edge_probability, run as u64);
        let world = World::new(sim.vehicles, sim.packages, sim.vertices, graph, pairs)?;
        let report = solve(Arc::new(world), config)?;

        tracing::info!(
            run,
            solutions = report.solutions.len(),
            cost = report.first().map(|s| s.cost),
            node_count = report.first().map(|s| s.node_count),
            "simulation run complete"
        );
        runs.push(report);
    }

    Ok(SimulationReport::new(*sim, runs))
}

fn run<S: DeliveryState>(initial: S, config: &SearchConfig) -> Result<Vec<SolutionRecord>, SearchError> {
    let f = f_value(S::heuristic(config.heuristic)?);
    let limit = config.num_solutions.unwrap_or(usize::MAX);

    let solutions = match config.algorithm {
        Algorithm::AStar => collect(AStar::new(initial, S::is_goal, S::successors, f), limit),
        Algorithm::BoundedAStar { bound } => collect(
            BoundedAStar::new(initial, S::is_goal, S::successors, f, Bound::parse(bound)?),
            limit,
        ),
        Algorithm::LocalBeam { k_limit } => collect(
            LocalBeam::new(initial, S::is_goal, S::successors, f, k_limit)?,
            limit,
        ),
    };
    Ok(solutions)
}

fn collect<S, I>(search: I, limit: usize) -> Vec<SolutionRecord>
where
    S: DeliveryState,
    I: Iterator<Item = S> + SearchProgress,
{
    let timer = Stopwatch::start();
    search
        .with_node_count()
        .take(limit)
        .map(|(goal, node_count)| SolutionRecord {
            cost: goal.cost(),
            node_count,
            elapsed: timer.elapsed(),
            routes: goal.routes(),
        })
        .collect()
}
