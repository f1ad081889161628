//! Error types.
//!
//! Errors fall into three families that are reported separately:
//!
//! - [`ConfigError`]: a problem instance was built from inconsistent data.
//!   The offending value is never constructed.
//! - [`QueryError`]: a well-formed world was asked about a vertex it does
//!   not know. This points at a logic error in the caller.
//! - [`SearchError`]: search parameters were rejected before any search
//!   started.
//!
//! [`Error`] wraps all of them for callers that drive a whole run.

use std::fmt;

/// Invalid problem data detected while building a graph, world or state.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The declared package count differs from the number of pairs.
    PackageCountMismatch {
        /// Declared package count.
        declared: usize,
        /// Number of source/destination pairs supplied.
        pairs: usize,
    },
    /// The declared vertex count differs from the graph's vertex count.
    VertexCountMismatch {
        /// Declared vertex count.
        declared: usize,
        /// Vertices in the supplied graph.
        graph: usize,
    },
    /// At least one vehicle is required.
    NoVehicles,
    /// A vertex index is outside `0..vertex_count`.
    VertexOutOfRange {
        /// Offending vertex.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge weight is negative, NaN or infinite.
    InvalidWeight {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
        /// Rejected weight.
        weight: f64,
    },
    /// A state's containers do not match the shape of its world.
    StateShape {
        /// What was mismatched ("vehicle paths", "delivered flags", ...).
        what: &'static str,
        /// Length the world requires.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// A package index is not below the world's package count.
    UnknownPackage {
        /// Offending package index.
        package: usize,
        /// Number of packages in the world.
        package_count: usize,
    },
    /// A vehicle path is empty; every vehicle needs a current location.
    EmptyVehiclePath {
        /// Vehicle index.
        vehicle: usize,
    },
    /// A coarse state stops at a vertex outside the reduced map.
    NotImportantStop {
        /// Vehicle index.
        vehicle: usize,
        /// Offending vertex.
        vertex: usize,
    },
    /// Accumulated cost must be finite and non-negative.
    InvalidCost(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageCountMismatch { declared, pairs } => write!(
                f,
                "package count {declared} does not match {pairs} source/destination pairs"
            ),
            Self::VertexCountMismatch { declared, graph } => write!(
                f,
                "vertex count {declared} does not match graph with {graph} vertices"
            ),
            Self::NoVehicles => write!(f, "vehicle count must be at least 1"),
            Self::VertexOutOfRange {
                vertex,
                vertex_count,
            } => write!(
                f,
                "vertex {vertex} is out of range for a graph with {vertex_count} vertices"
            ),
            Self::InvalidWeight { from, to, weight } => {
                write!(f, "edge ({from}, {to}) has invalid weight {weight}")
            }
            Self::StateShape {
                what,
                expected,
                actual,
            } => write!(f, "state has {actual} {what}, world requires {expected}"),
            Self::UnknownPackage {
                package,
                package_count,
            } => write!(
                f,
                "package {package} is out of range for a world with {package_count} packages"
            ),
            Self::EmptyVehiclePath { vehicle } => {
                write!(f, "vehicle {vehicle} has an empty path")
            }
            Self::NotImportantStop { vehicle, vertex } => write!(
                f,
                "vehicle {vehicle} stops at vertex {vertex}, which is not in the reduced map"
            ),
            Self::InvalidCost(cost) => {
                write!(f, "state cost {cost} must be finite and non-negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A query against the reduced map named a vertex it does not contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The vertex is not below the world's vertex count.
    VertexOutOfRange {
        /// Offending vertex.
        vertex: usize,
        /// Number of vertices in the full map.
        vertex_count: usize,
    },
    /// The vertex exists but is neither the garage nor a package endpoint.
    NotImportant {
        /// Offending vertex.
        vertex: usize,
    },
    /// The package index is not below the world's package count.
    UnknownPackage {
        /// Offending package index.
        package: usize,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexOutOfRange {
                vertex,
                vertex_count,
            } => write!(
                f,
                "illegal vertex {vertex}: world has {vertex_count} vertices"
            ),
            Self::NotImportant { vertex } => {
                write!(f, "illegal vertex {vertex}: not in the reduced map")
            }
            Self::UnknownPackage { package } => write!(f, "unknown package {package}"),
        }
    }
}

impl std::error::Error for QueryError {}

/// Search parameters rejected before the search begins.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A bound of one or more must be a whole number of successors.
    InvalidBound(f64),
    /// The beam must hold at least one state.
    InvalidBeamWidth(usize),
    /// At least one solution must be requested.
    InvalidSolutionCount,
    /// The heuristic cannot evaluate the selected state model.
    UnsupportedHeuristic {
        /// Heuristic name.
        heuristic: &'static str,
        /// State model name.
        model: &'static str,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBound(bound) => write!(
                f,
                "bound {bound} must be a fraction in (0, 1), a whole number >= 1, or <= 0"
            ),
            Self::InvalidBeamWidth(k) => write!(f, "beam width {k} must be at least 1"),
            Self::InvalidSolutionCount => {
                write!(f, "the number of requested solutions must be at least 1")
            }
            Self::UnsupportedHeuristic { heuristic, model } => {
                write!(f, "heuristic '{heuristic}' is not defined for {model} states")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Any error raised while configuring or running a search.
#[derive(Debug)]
pub enum Error {
    /// Invalid problem data.
    Config(ConfigError),
    /// Illegal reduced-map query.
    Query(QueryError),
    /// Rejected search parameters.
    Search(SearchError),
    /// Result serialization failed.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Query(e) => write!(f, "query error: {e}"),
            Self::Search(e) => write!(f, "search parameter error: {e}"),
            Self::Json(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<QueryError> for Error {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

impl From<SearchError> for Error {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
