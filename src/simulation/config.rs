//! Search and simulation configuration.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::heuristics::HeuristicKind;
use crate::models::{DeliveryState, State, VanillaState};
use crate::search::Bound;

/// Which state model to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateModel {
    /// Package-at-a-time transitions over the reduced map.
    #[default]
    Coarse,
    /// One-edge-at-a-time transitions with held packages.
    Vanilla,
}

impl StateModel {
    /// Model name, matching [`DeliveryState::MODEL`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Coarse => State::MODEL,
            Self::Vanilla => VanillaState::MODEL,
        }
    }
}

/// Search algorithm and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    /// Plain A*.
    #[default]
    AStar,
    /// A* keeping only the best successors of each expansion, see
    /// [`Bound::parse`].
    BoundedAStar {
        /// Fraction in `(0, 1)`, whole count `>= 1`, or `<= 0` for no pruning.
        bound: f64,
    },
    /// Local beam search.
    LocalBeam {
        /// Beam width, at least 1.
        k_limit: usize,
    },
}

impl Algorithm {
    /// Algorithm name as serialized.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AStar => "a_star",
            Self::BoundedAStar { .. } => "bounded_a_star",
            Self::LocalBeam { .. } => "local_beam",
        }
    }

    /// Checks the algorithm parameters.
    pub fn validate(&self) -> Result<(), SearchError> {
        match *self {
            Self::AStar => Ok(()),
            Self::BoundedAStar { bound } => Bound::parse(bound).map(|_| ()),
            Self::LocalBeam { k_limit: 0 } => Err(SearchError::InvalidBeamWidth(0)),
            Self::LocalBeam { .. } => Ok(()),
        }
    }
}

/// Everything needed to search one problem.
///
/// `num_solutions: None` asks for every solution. The coarse state space
/// is finite, but the fine-grained one has cycles, so unlimited searches
/// there may not end.
///
/// # Examples
///
/// ```
/// use u_delivery::heuristics::HeuristicKind;
/// use u_delivery::simulation::{Algorithm, SearchConfig, StateModel};
///
/// let config = SearchConfig::default()
///     .with_model(StateModel::Vanilla)
///     .with_heuristic(HeuristicKind::SumOfEstimatedCost)
///     .with_algorithm(Algorithm::LocalBeam { k_limit: 8 });
/// assert!(config.validate().is_ok());
///
/// let json = serde_json::to_string(&config).unwrap();
/// let back: SearchConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(back, config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// State model.
    pub model: StateModel,
    /// Heuristic used in `f = g + h`.
    pub heuristic: HeuristicKind,
    /// Search algorithm.
    pub algorithm: Algorithm,
    /// Solutions to collect; `None` for all.
    pub num_solutions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            model: StateModel::Coarse,
            heuristic: HeuristicKind::SumPackageDistance,
            algorithm: Algorithm::AStar,
            num_solutions: Some(1),
        }
    }
}

impl SearchConfig {
    /// Sets the state model.
    pub fn with_model(mut self, model: StateModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the heuristic.
    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the number of solutions to collect; `None` for all.
    pub fn with_num_solutions(mut self, num_solutions: Option<usize>) -> Self {
        self.num_solutions = num_solutions;
        self
    }

    /// Rejects parameters no search could run with.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] for a zero solution count, an invalid
    /// bound or beam width, or a heuristic the model cannot evaluate.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_solutions == Some(0) {
            return Err(SearchError::InvalidSolutionCount);
        }
        self.algorithm.validate()?;
        match self.model {
            StateModel::Coarse => State::heuristic(self.heuristic).map(|_| ()),
            StateModel::Vanilla => VanillaState::heuristic(self.heuristic).map(|_| ()),
        }
    }
}

/// Shape of the random problems a simulation solves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Vehicles per problem (N).
    pub vehicles: usize,
    /// Packages per problem (K).
    pub packages: usize,
    /// Vertices per map (M).
    pub vertices: usize,
    /// Number of problems; run `i` uses seed `i`.
    pub runs: usize,
    /// Chance of each extra edge beyond the spanning tree.
    pub edge_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicles: 2,
            packages: 3,
            vertices: 10,
            runs: 10,
            edge_probability: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let base = SearchConfig::default();
        assert_eq!(
            base.with_num_solutions(Some(0)).validate(),
            Err(SearchError::InvalidSolutionCount)
        );
        assert_eq!(
            base.with_algorithm(Algorithm::LocalBeam { k_limit: 0 }).validate(),
            Err(SearchError::InvalidBeamWidth(0))
        );
        assert_eq!(
            base.with_algorithm(Algorithm::BoundedAStar { bound: 1.5 }).validate(),
            Err(SearchError::InvalidBound(1.5))
        );
        assert!(matches!(
            base.with_heuristic(HeuristicKind::SumOfEstimatedCost).validate(),
            Err(SearchError::UnsupportedHeuristic { model: "coarse", .. })
        ));
        assert!(base.with_num_solutions(None).validate().is_ok());
    }

    #[test]
    fn test_algorithm_json_shape() {
        let json = serde_json::to_string(&Algorithm::BoundedAStar { bound: 0.5 }).expect("serialize");
        assert_eq!(json, r#"{"kind":"bounded_a_star","bound":0.5}"#);
        let back: Algorithm = serde_json::from_str(r#"{"kind":"local_beam","k_limit":4}"#).expect("deserialize");
        assert_eq!(back, Algorithm::LocalBeam { k_limit: 4 });
        assert_eq!(back.name(), "local_beam");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"model":"vanilla"}"#).expect("deserialize");
        assert_eq!(config.model, StateModel::Vanilla);
        assert_eq!(config.num_solutions, Some(1));

        let sim: SimulationConfig = serde_json::from_str(r#"{"runs":3}"#).expect("deserialize");
        assert_eq!(sim.runs, 3);
        assert_eq!(sim.vehicles, SimulationConfig::default().vehicles);
    }

    #[test]
    fn test_model_names() {
        assert_eq!(StateModel::Coarse.name(), "coarse");
        assert_eq!(StateModel::Vanilla.name(), "vanilla");
    }
}
