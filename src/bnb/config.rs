//! Branch-and-bound configuration.
//!
//! [`BnbConfig`] holds the problem size, the iteration budget, the optional
//! early-stop thresholds, and the splitting policy.

use super::types::SplitStrategy;
use crate::error::{Error, Result};

/// Configuration for a branch-and-bound run.
///
/// # Defaults
///
/// ```
/// use polycube_bound::bnb::{BnbConfig, SplitStrategy};
///
/// let config = BnbConfig::default();
/// assert_eq!(config.n, 3);
/// assert_eq!(config.max_iterations, 40);
/// assert_eq!(config.split_strategy, SplitStrategy::RoundRobin);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use polycube_bound::bnb::{BnbConfig, SplitStrategy};
///
/// let config = BnbConfig::default()
///     .with_n(5)
///     .with_max_iterations(100)
///     .with_split_strategy(SplitStrategy::Widest)
///     .with_min_volume(1e-6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BnbConfig {
    /// Number of points (complex coordinates). At least 2.
    pub n: usize,

    /// Maximum number of expand/bound/prune iterations.
    pub max_iterations: usize,

    /// Dimension selection policy.
    pub split_strategy: SplitStrategy,

    /// Stop once the total frontier volume is at most this value.
    pub min_volume: Option<f64>,

    /// Stop once `max_upper - delta_sup` is at most this value.
    pub bound_gap_tolerance: Option<f64>,

    /// Stop after this many consecutive iterations with unchanged node count
    /// and volume. 0 disables the check.
    pub stall_iterations: usize,

    /// Width floor: a dimension no wider than this is not bisected.
    ///
    /// Bounds the working precision of the search. 0.0 (the default) splits
    /// down to whatever `f64` can represent.
    pub min_width: f64,

    /// Stop before an expansion that could grow the frontier past this many
    /// nodes.
    pub max_nodes: Option<usize>,

    /// Whether to expand and bound nodes in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Optional wall-clock time limit in milliseconds, checked at the start
    /// of each iteration.
    pub time_limit_ms: Option<u64>,

    /// Candidate point `[Re z_1, Im z_1, …]` whose certified objective value
    /// seeds the pruning threshold.
    pub hint: Option<Vec<f64>>,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            n: 3,
            max_iterations: 40,
            split_strategy: SplitStrategy::default(),
            min_volume: None,
            bound_gap_tolerance: None,
            stall_iterations: 0,
            min_width: 0.0,
            max_nodes: None,
            parallel: true,
            time_limit_ms: None,
            hint: None,
        }
    }
}

impl BnbConfig {
    /// Sets the number of points.
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the dimension selection policy.
    pub fn with_split_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.split_strategy = strategy;
        self
    }

    /// Sets the frontier volume at which the run stops.
    pub fn with_min_volume(mut self, volume: f64) -> Self {
        self.min_volume = Some(volume);
        self
    }

    /// Sets the bound gap at which the run stops.
    pub fn with_bound_gap_tolerance(mut self, tolerance: f64) -> Self {
        self.bound_gap_tolerance = Some(tolerance);
        self
    }

    /// Sets the number of unchanged iterations tolerated before stopping.
    pub fn with_stall_iterations(mut self, n: usize) -> Self {
        self.stall_iterations = n;
        self
    }

    /// Sets the width floor below which dimensions are not bisected.
    pub fn with_min_width(mut self, width: f64) -> Self {
        self.min_width = width;
        self
    }

    /// Sets the frontier node cap.
    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = Some(n);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Seeds the pruning threshold from a candidate point.
    pub fn with_hint(mut self, point: Vec<f64>) -> Self {
        self.hint = Some(point);
        self
    }

    /// Preset for a short exploratory run.
    ///
    /// - Iterations: 10, Time limit: 10s
    pub fn quick() -> Self {
        Self {
            max_iterations: 10,
            time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Preset for a long run that splits the widest dimension and caps memory.
    ///
    /// - Iterations: 400, Stall limit: 25, Node cap: 2^22
    pub fn thorough() -> Self {
        Self {
            max_iterations: 400,
            split_strategy: SplitStrategy::Widest,
            stall_iterations: 25,
            max_nodes: Some(1 << 22),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] describing the first invalid parameter, or
    /// [`Error::DimensionMismatch`] for a hint of the wrong length.
    pub fn validate(&self) -> Result<()> {
        if self.n < 2 {
            return Err(Error::config(format!("n must be at least 2, got {}", self.n)));
        }
        if self.max_iterations == 0 {
            return Err(Error::config("max_iterations must be at least 1"));
        }
        if let Some(v) = self.min_volume {
            if v.is_nan() || v < 0.0 {
                return Err(Error::config(format!("min_volume must be non-negative, got {v}")));
            }
        }
        if let Some(t) = self.bound_gap_tolerance {
            if t.is_nan() || t < 0.0 {
                return Err(Error::config(format!(
                    "bound_gap_tolerance must be non-negative, got {t}"
                )));
            }
        }
        if !self.min_width.is_finite() || self.min_width < 0.0 {
            return Err(Error::config(format!(
                "min_width must be finite and non-negative, got {}",
                self.min_width
            )));
        }
        if self.max_nodes == Some(0) {
            return Err(Error::config("max_nodes must be positive or None"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(Error::config("time_limit_ms must be positive or None"));
        }
        if let Some(hint) = &self.hint {
            if hint.len() != 2 * self.n {
                return Err(Error::DimensionMismatch {
                    expected: 2 * self.n,
                    actual: hint.len(),
                });
            }
        }
        Ok(())
    }
}
