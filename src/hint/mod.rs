//! Stochastic candidate search for seeding the pruning threshold.
//!
//! A simulated-annealing walk inside the initial polycube proposes a good
//! feasible configuration. Its value is only used if it can be certified,
//! so the search never affects the soundness of branch and bound; it only
//! lets pruning start earlier.
//!
//! # Examples
//!
//! ```
//! use polycube_bound::bnb::{BnbConfig, BnbRunner};
//! use polycube_bound::hint::{search_hint, HintConfig};
//! use polycube_bound::objective::PairwiseDistance;
//!
//! let objective = PairwiseDistance::default();
//! let hint = search_hint(&objective, 3, &HintConfig::default().with_seed(7)).unwrap();
//!
//! let config = BnbConfig::default().with_max_iterations(5).with_hint(hint.point);
//! let result = BnbRunner::run(&objective, &config).unwrap();
//! assert!(result.delta_sup >= hint.value);
//! ```
//!
//! # References
//!
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod search;

pub use config::HintConfig;
pub use search::{search_hint, Hint};
