//! Crate-wide error type.
//!
//! Only malformed input is an error. A polycube that cannot satisfy the
//! distance constraint is a normal outcome of the search and is reported
//! through `Option`, see [`IntervalObjective::bound`](crate::objective::IntervalObjective::bound).

use thiserror::Error;

/// Errors raised when constructing or splitting domain elements, or when a
/// run is configured with invalid parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("interval bounds are inverted or not a number: [{lo}, {hi}]")]
    InvertedInterval { lo: f64, hi: f64 },

    #[error("polycube has no coordinates")]
    EmptyPolycube,

    #[error("polycube must have an even number of coordinates, got {len}")]
    OddDimension { len: usize },

    #[error("split dimension {index} is out of range for a polycube of length {len}")]
    DimensionOutOfRange { index: usize, len: usize },

    #[error("expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("hint point lies outside the initial polycube")]
    HintOutsideDomain,

    #[error("hint point cannot be certified feasible")]
    HintNotFeasible,
}

impl Error {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
