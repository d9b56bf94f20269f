//! Hint search configuration.

use crate::error::{Error, Result};

/// Parameters of the annealing walk.
///
/// # Examples
///
/// ```
/// use polycube_bound::hint::HintConfig;
///
/// let config = HintConfig::default()
///     .with_iterations(5_000)
///     .with_initial_temperature(2.0)
///     .with_alpha(0.999)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HintConfig {
    /// Number of proposed moves.
    pub iterations: usize,

    /// Starting temperature, on the scale of the log-objective.
    pub initial_temperature: f64,

    /// Temperature floor. Cooling never goes below it.
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1), applied after every move.
    pub alpha: f64,

    /// Half-width of the uniform perturbation applied to one coordinate.
    pub step_size: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            iterations: 20_000,
            initial_temperature: 1.0,
            min_temperature: 1e-4,
            alpha: 0.9995,
            step_size: 0.25,
            seed: None,
        }
    }
}

impl HintConfig {
    /// Sets the number of proposed moves.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the starting temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the temperature floor.
    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    /// Sets the cooling factor.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the perturbation half-width.
    pub fn with_step_size(mut self, step: f64) -> Self {
        self.step_size = step;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::config("iterations must be at least 1"));
        }
        if !(self.initial_temperature > 0.0) {
            return Err(Error::config("initial_temperature must be positive"));
        }
        if !(self.min_temperature > 0.0) || self.min_temperature > self.initial_temperature {
            return Err(Error::config(
                "min_temperature must be positive and at most initial_temperature",
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::config(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if !(self.step_size > 0.0) || !self.step_size.is_finite() {
            return Err(Error::config("step_size must be finite and positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HintConfig::default();
        assert_eq!(config.iterations, 20_000);
        assert!((config.alpha - 0.9995).abs() < 1e-12);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_alpha() {
        assert!(HintConfig::default().with_alpha(1.0).validate().is_err());
        assert!(HintConfig::default().with_alpha(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_temperatures() {
        assert!(HintConfig::default()
            .with_initial_temperature(-1.0)
            .validate()
            .is_err());
        assert!(HintConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(2.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_step_and_iterations() {
        assert!(HintConfig::default().with_step_size(0.0).validate().is_err());
        assert!(HintConfig::default().with_iterations(0).validate().is_err());
    }
}
