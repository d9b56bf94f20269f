//! Branch-and-bound execution loop.
//!
//! Each iteration runs expand → bound → sup → prune over the whole frontier:
//!
//! 1. every node bisects one dimension,
//! 2. every child is bounded; infeasible children are dropped,
//! 3. `delta_sup` is the largest lower bound among the children,
//! 4. children whose upper bound is below `delta_sup` are discarded.
//!
//! A discarded child cannot hold the global maximizer: some other child
//! already attains at least `delta_sup`, which the discarded one cannot
//! reach anywhere.

use super::config::BnbConfig;
use super::types::{
    BnbObserver, Expansion, IterationMetrics, NoopObserver, SearchNode, TerminationReason,
};
use crate::error::{Error, Result};
use crate::objective::IntervalObjective;
use crate::polycube::Polycube;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of one expand/bound/prune step.
#[derive(Debug, Clone)]
pub struct Step {
    /// Surviving children.
    pub frontier: Vec<SearchNode>,
    /// Pruning threshold after this step.
    pub delta_sup: f64,
    /// Feasible children before pruning.
    pub expanded: usize,
    /// Children proven infeasible.
    pub infeasible: usize,
    /// Feasible children discarded by the bound test.
    pub pruned: usize,
    /// Nodes carried over without splitting (width floor reached).
    pub unsplit: usize,
}

/// Runs one expand/bound/prune step over `frontier`.
///
/// The threshold is recomputed from this step's children alone. `delta_floor`
/// may only carry a value attained at a certified point (a hint); pass
/// `f64::NEG_INFINITY` otherwise.
///
/// # Errors
/// Propagates split validation errors.
pub fn advance_frontier<O: IntervalObjective>(
    objective: &O,
    frontier: &[SearchNode],
    delta_floor: f64,
    config: &BnbConfig,
) -> Result<Step> {
    let expansions = expand_all(objective, frontier, config)?;

    let mut infeasible = 0usize;
    let mut unsplit = 0usize;
    let mut children = Vec::with_capacity(2 * frontier.len());
    for expansion in expansions {
        infeasible += expansion.infeasible;
        unsplit += usize::from(expansion.unsplit);
        children.extend(expansion.nodes);
    }

    let delta_sup = children
        .iter()
        .map(|node| node.bound().left())
        .fold(delta_floor, f64::max);

    let expanded = children.len();
    children.retain(|node| node.bound().right() >= delta_sup);
    let pruned = expanded - children.len();

    Ok(Step {
        frontier: children,
        delta_sup,
        expanded,
        infeasible,
        pruned,
        unsplit,
    })
}

/// Expands every node; the parallel path writes per-node results and joins
/// before any reduction.
fn expand_all<O: IntervalObjective>(
    objective: &O,
    frontier: &[SearchNode],
    config: &BnbConfig,
) -> Result<Vec<Expansion>> {
    #[cfg(feature = "parallel")]
    if config.parallel {
        return frontier
            .par_iter()
            .map(|node| node.expand(objective, config.split_strategy, config.min_width))
            .collect();
    }

    frontier
        .iter()
        .map(|node| node.expand(objective, config.split_strategy, config.min_width))
        .collect()
}

/// Result of a branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BnbResult {
    /// Surviving nodes. Together they cover every region that may still hold
    /// the global maximizer.
    pub frontier: Vec<SearchNode>,

    /// Metrics of the initial frontier (iteration 0).
    pub initial: IterationMetrics,

    /// One record per completed iteration, in order.
    pub metrics: Vec<IterationMetrics>,

    /// Number of completed iterations.
    pub iterations: usize,

    /// Why the run stopped.
    pub termination: TerminationReason,

    /// Final pruning threshold, a lower bound on the global maximum.
    pub delta_sup: f64,
}

impl BnbResult {
    /// Largest upper bound over the final frontier, an upper bound on the
    /// global maximum.
    pub fn max_upper(&self) -> f64 {
        self.last_metrics().max_upper
    }

    /// Total volume of the final frontier.
    pub fn total_volume(&self) -> f64 {
        self.last_metrics().total_volume
    }

    fn last_metrics(&self) -> &IterationMetrics {
        self.metrics.last().unwrap_or(&self.initial)
    }
}

/// Executes the branch-and-bound loop.
///
/// # Usage
///
/// ```
/// use polycube_bound::bnb::{BnbConfig, BnbRunner};
/// use polycube_bound::objective::PairwiseDistance;
///
/// let config = BnbConfig::default().with_n(3).with_max_iterations(6);
/// let result = BnbRunner::run(&PairwiseDistance::default(), &config).unwrap();
/// assert_eq!(result.metrics.len(), 6);
/// assert!(result.total_volume() <= result.initial.total_volume);
/// ```
pub struct BnbRunner;

impl BnbRunner {
    /// Runs over the standard initial polycube for `config.n` points.
    pub fn run<O: IntervalObjective>(objective: &O, config: &BnbConfig) -> Result<BnbResult> {
        Self::run_with_observer(objective, config, &mut NoopObserver)
    }

    /// Runs and reports every iteration to `observer`.
    pub fn run_with_observer<O: IntervalObjective, B: BnbObserver>(
        objective: &O,
        config: &BnbConfig,
        observer: &mut B,
    ) -> Result<BnbResult> {
        Self::run_with_cancel(objective, config, observer, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run stops at the start of the next
    /// iteration and returns the frontier reached so far.
    pub fn run_with_cancel<O: IntervalObjective, B: BnbObserver>(
        objective: &O,
        config: &BnbConfig,
        observer: &mut B,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BnbResult> {
        config.validate()?;
        let cube = Polycube::initial(config.n)?;
        Self::run_on(objective, cube, config, observer, cancel)
    }

    /// Runs over a caller-supplied initial polycube of `2 * config.n`
    /// coordinates.
    ///
    /// # Errors
    /// Configuration and hint validation errors, a polycube whose size does
    /// not match `config.n`, and split validation errors.
    pub fn run_on<O: IntervalObjective, B: BnbObserver>(
        objective: &O,
        cube: Polycube,
        config: &BnbConfig,
        observer: &mut B,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BnbResult> {
        config.validate()?;
        if cube.len() != 2 * config.n {
            return Err(Error::DimensionMismatch {
                expected: 2 * config.n,
                actual: cube.len(),
            });
        }

        let hint_floor = match &config.hint {
            Some(hint) => seed_threshold(objective, &cube, hint)?,
            None => f64::NEG_INFINITY,
        };

        let mut frontier: Vec<SearchNode> = SearchNode::root(objective, cube)?.into_iter().collect();
        let mut delta_sup = frontier
            .iter()
            .map(|node| node.bound().left())
            .fold(hint_floor, f64::max);

        let initial = IterationMetrics::of(0, &frontier, delta_sup);
        info!(
            n = config.n,
            max_iterations = config.max_iterations,
            strategy = ?config.split_strategy,
            delta_sup,
            "starting branch and bound"
        );

        let start = Instant::now();
        let mut metrics: Vec<IterationMetrics> = Vec::with_capacity(config.max_iterations);
        let mut termination = TerminationReason::IterationBudget;
        let mut stall_counter = 0usize;
        let mut warned_unsplit = false;

        for iteration in 1..=config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    termination = TerminationReason::Cancelled;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if start.elapsed().as_millis() >= u128::from(limit) {
                    termination = TerminationReason::TimeLimit;
                    break;
                }
            }
            if frontier.is_empty() {
                termination = TerminationReason::Exhausted;
                break;
            }
            if let Some(cap) = config.max_nodes {
                if frontier.len().saturating_mul(2) > cap {
                    termination = TerminationReason::NodeLimit;
                    break;
                }
            }

            let step = advance_frontier(objective, &frontier, hint_floor, config)?;
            trace!(
                iteration,
                expanded = step.expanded,
                infeasible = step.infeasible,
                pruned = step.pruned,
                "step complete"
            );
            if step.unsplit > 0 && !warned_unsplit {
                warn!(
                    iteration,
                    nodes = step.unsplit,
                    min_width = config.min_width,
                    "split dimension reached the width floor; nodes carried over unsplit"
                );
                warned_unsplit = true;
            }

            delta_sup = step.delta_sup;
            frontier = step.frontier;

            let record = IterationMetrics::of(iteration, &frontier, delta_sup);
            debug!(
                iteration,
                nodes = record.node_count,
                volume = record.total_volume,
                delta_sup = record.delta_sup,
                max_upper = record.max_upper,
                "iteration complete"
            );
            observer.on_iteration(&record);

            let previous = metrics.last().unwrap_or(&initial);
            if previous.node_count == record.node_count && previous.total_volume == record.total_volume {
                stall_counter += 1;
            } else {
                stall_counter = 0;
            }
            metrics.push(record);

            if frontier.is_empty() {
                termination = TerminationReason::Exhausted;
                break;
            }
            if config.min_volume.is_some_and(|v| record.total_volume <= v) {
                termination = TerminationReason::MinVolume;
                break;
            }
            if config
                .bound_gap_tolerance
                .is_some_and(|t| record.bound_gap() <= t)
            {
                termination = TerminationReason::BoundGap;
                break;
            }
            if config.stall_iterations > 0 && stall_counter >= config.stall_iterations {
                termination = TerminationReason::Stalled;
                break;
            }
        }

        let iterations = metrics.len();
        info!(
            ?termination,
            iterations,
            nodes = frontier.len(),
            delta_sup,
            "branch and bound finished"
        );

        Ok(BnbResult {
            frontier,
            initial,
            metrics,
            iterations,
            termination,
            delta_sup,
        })
    }
}

/// Certified objective value of the hint, checked against the domain.
fn seed_threshold<O: IntervalObjective>(objective: &O, cube: &Polycube, hint: &[f64]) -> Result<f64> {
    if !cube.contains_point(hint)? {
        return Err(Error::HintOutsideDomain);
    }
    objective.certified_lower(hint).ok_or(Error::HintNotFeasible)
}
