//! Interval branch-and-bound.
//!
//! Maintains a frontier of [`SearchNode`]s that together cover every region
//! of the domain that may still contain the global maximizer, and shrinks it
//! by bisection and bound-based pruning.
//!
//! # Key Types
//!
//! - [`BnbConfig`]: problem size, iteration budget, early-stop thresholds
//! - [`SearchNode`]: a polycube with its cached objective enclosure
//! - [`BnbRunner`]: executes the expand → bound → prune loop
//! - [`BnbResult`]: final frontier, per-iteration metrics, termination reason
//!
//! # References
//!
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete Programming Problems"
//! - Hansen & Walster (2004), "Global Optimization Using Interval Analysis"

mod config;
mod runner;
mod types;

pub use config::BnbConfig;
pub use runner::{advance_frontier, BnbResult, BnbRunner, Step};
pub use types::{
    next_split_dim, BnbObserver, Expansion, IterationMetrics, NoopObserver, SearchNode,
    SplitStrategy, TerminationReason,
};
