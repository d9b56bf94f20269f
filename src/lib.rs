//! Certified bounds on the generalized discriminant by interval branch and bound.
//!
//! For `n` points `z_1, …, z_n` in the plane with every pairwise distance at
//! most 2, the crate bounds the maximum of `∏_{i > j} |z_i - z_j|²`. Every
//! bound is computed with outward-rounded interval arithmetic, so the final
//! frontier provably covers the maximizer rather than approximating it.
//!
//! - **Interval**: conservative enclosures with outward rounding and exact
//!   bisection.
//! - **Polycube**: products of intervals over `C^n`, the domain elements
//!   that get split.
//! - **Objective**: enclosure of the discriminant over a polycube, with an
//!   early infeasibility test.
//! - **Branch and bound**: the expand → bound → prune loop over a frontier of
//!   search nodes, with per-iteration metrics.
//! - **Hint**: an optional annealing search whose certified value lets
//!   pruning start earlier.
//!
//! # Example
//!
//! ```
//! use polycube_bound::bnb::{BnbConfig, BnbRunner};
//! use polycube_bound::objective::PairwiseDistance;
//!
//! let config = BnbConfig::default().with_n(3).with_max_iterations(10);
//! let result = BnbRunner::run(&PairwiseDistance::default(), &config).unwrap();
//! assert!(result.delta_sup <= 64.0 && 64.0 <= result.max_upper());
//! ```
//!
//! # Features
//!
//! - `parallel`: expand and bound frontier nodes with rayon
//! - `serde`: `Serialize`/`Deserialize` for intervals, polycubes, and metrics

pub mod bnb;
pub mod error;
pub mod hint;
pub mod interval;
pub mod objective;
pub mod polycube;

pub use error::{Error, Result};
