//! Annealing walk over the initial polycube.

use super::config::HintConfig;
use crate::error::Result;
use crate::objective::IntervalObjective;
use crate::polycube::{Polycube, FIXED_DIMS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// A certified candidate configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    /// `[Re z_1, Im z_1, …, Re z_n, Im z_n]`, inside the initial polycube.
    pub point: Vec<f64>,
    /// Certified lower bound of the objective at `point`.
    pub value: f64,
}

/// Searches for a good certified point for `n` points.
///
/// Starts at the centre of the initial polycube and perturbs one free
/// coordinate per move, clamped to the domain. Moves are scored by the log of
/// [`IntervalObjective::certified_lower`]; moves that cannot be certified
/// feasible are rejected. Worse moves are accepted with the Metropolis
/// probability `exp(Δ / T)`.
///
/// # Errors
/// Invalid `config`, or `n < 2`.
pub fn search_hint<O: IntervalObjective>(objective: &O, n: usize, config: &HintConfig) -> Result<Hint> {
    config.validate()?;
    let domain = Polycube::initial(n)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    };

    let mut current: Vec<f64> = domain.intervals().iter().map(|i| i.midpoint()).collect();
    let mut current_score = score(objective, &current).unwrap_or(f64::NEG_INFINITY);
    let mut best = Hint {
        value: objective.certified_lower(&current).unwrap_or(0.0),
        point: current.clone(),
    };

    let mut temperature = config.initial_temperature;
    let mut accepted = 0usize;

    for _ in 0..config.iterations {
        let dim = rng.random_range(FIXED_DIMS..domain.len());
        let bounds = domain.intervals()[dim];
        let step = rng.random_range(-config.step_size..=config.step_size);

        let mut candidate = current.clone();
        candidate[dim] = (candidate[dim] + step).clamp(bounds.left(), bounds.right());

        if let Some(candidate_score) = score(objective, &candidate) {
            let accept = if candidate_score >= current_score {
                true
            } else {
                let probability = ((candidate_score - current_score) / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            };

            if accept {
                accepted += 1;
                current = candidate;
                current_score = candidate_score;

                let value = current_score.exp();
                if value > best.value {
                    best = Hint {
                        point: current.clone(),
                        value,
                    };
                }
            }
        }

        temperature = (temperature * config.alpha).max(config.min_temperature);
    }

    // exp(ln v) may round above v
    best.value = objective
        .certified_lower(&best.point)
        .unwrap_or(0.0)
        .min(best.value);

    debug!(
        n,
        value = best.value,
        accepted,
        iterations = config.iterations,
        "hint search finished"
    );
    Ok(best)
}

/// Log of the certified value, `None` when `x` is not certifiably feasible.
fn score<O: IntervalObjective>(objective: &O, x: &[f64]) -> Option<f64> {
    objective.certified_lower(x).map(f64::ln)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::PairwiseDistance;

    #[test]
    fn test_finds_near_optimal_triangle() {
        let objective = PairwiseDistance::default();
        let hint = search_hint(&objective, 3, &HintConfig::default().with_seed(42)).unwrap();
        assert!(hint.value > 48.0, "expected close to 64, got {}", hint.value);
        assert!(hint.value <= 64.0);
    }

    #[test]
    fn test_hint_is_certified_and_in_domain() {
        let objective = PairwiseDistance::default();
        let hint = search_hint(&objective, 4, &HintConfig::default().with_seed(1)).unwrap();
        let domain = Polycube::initial(4).unwrap();
        assert_eq!(domain.contains_point(&hint.point), Ok(true));
        let certified = objective.certified_lower(&hint.point).unwrap();
        assert!(hint.value <= certified);
        assert!(hint.value > 0.0);
    }

    #[test]
    fn test_fixed_coordinates_untouched() {
        let objective = PairwiseDistance::default();
        let hint = search_hint(
            &objective,
            3,
            &HintConfig::default().with_iterations(500).with_seed(3),
        )
        .unwrap();
        assert_eq!(&hint.point[..FIXED_DIMS], &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let objective = PairwiseDistance::default();
        let config = HintConfig::default().with_iterations(2_000).with_seed(11);
        let a = search_hint(&objective, 3, &config).unwrap();
        let b = search_hint(&objective, 3, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_input() {
        let objective = PairwiseDistance::default();
        assert!(search_hint(&objective, 1, &HintConfig::default()).is_err());
        assert!(search_hint(&objective, 3, &HintConfig::default().with_alpha(2.0)).is_err());
    }
}
