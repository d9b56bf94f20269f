//! Search nodes, per-iteration metrics, and run observers.

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::objective::IntervalObjective;
use crate::polycube::{Polycube, FIXED_DIMS};

/// How a node picks the dimension to bisect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitStrategy {
    /// Cycle through the free dimensions: `3, 4, …, 2n - 1, 3, …`.
    #[default]
    RoundRobin,

    /// Bisect the widest free dimension (lowest index on ties).
    Widest,
}

/// Index following `dim` in round-robin order, skipping the fixed prefix.
pub fn next_split_dim(dim: usize, len: usize) -> usize {
    let next = (dim + 1) % len.max(1);
    if next < FIXED_DIMS {
        FIXED_DIMS
    } else {
        next
    }
}

/// A polycube together with its cached objective enclosure.
///
/// Infeasible polycubes never become nodes: [`SearchNode::new`] returns
/// `Ok(None)` for them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    cube: Polycube,
    split_dim: usize,
    bound: Interval,
}

/// Children produced by expanding one node.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Feasible children with their bounds.
    pub nodes: Vec<SearchNode>,
    /// Children dropped because the objective proved them infeasible.
    pub infeasible: usize,
    /// Whether the node was carried over unsplit because its split
    /// dimension was already at or below the width floor.
    pub unsplit: bool,
}

impl SearchNode {
    /// Bounds `cube` and wraps it as a node that will split `split_dim` next.
    ///
    /// # Errors
    /// [`Error::DimensionOutOfRange`] when `split_dim` is not a free
    /// dimension of `cube`.
    pub fn new<O: IntervalObjective>(
        objective: &O,
        cube: Polycube,
        split_dim: usize,
    ) -> Result<Option<Self>> {
        if split_dim < FIXED_DIMS || split_dim >= cube.len() {
            return Err(Error::DimensionOutOfRange {
                index: split_dim,
                len: cube.len(),
            });
        }
        Ok(objective.bound(&cube).map(|bound| Self {
            cube,
            split_dim,
            bound,
        }))
    }

    /// Root node: splits start at the first free dimension.
    ///
    /// # Errors
    /// [`Error::DimensionOutOfRange`] if `cube` has no free dimension.
    pub fn root<O: IntervalObjective>(objective: &O, cube: Polycube) -> Result<Option<Self>> {
        Self::new(objective, cube, FIXED_DIMS)
    }

    pub fn cube(&self) -> &Polycube {
        &self.cube
    }

    pub fn split_dim(&self) -> usize {
        self.split_dim
    }

    /// Cached enclosure of the objective over the node's polycube.
    pub fn bound(&self) -> Interval {
        self.bound
    }

    pub fn volume(&self) -> f64 {
        self.cube.volume()
    }

    /// The dimension this node will bisect under `strategy`.
    pub fn target_dim(&self, strategy: SplitStrategy) -> usize {
        match strategy {
            SplitStrategy::RoundRobin => self.split_dim,
            SplitStrategy::Widest => self.cube.widest_dim().unwrap_or(self.split_dim),
        }
    }

    /// Bisects one dimension and bounds the children.
    ///
    /// A target dimension no wider than `min_width` is not split; the node
    /// is carried over with its cached bound and the next split index.
    ///
    /// # Errors
    /// Propagates split validation errors.
    pub fn expand<O: IntervalObjective>(
        &self,
        objective: &O,
        strategy: SplitStrategy,
        min_width: f64,
    ) -> Result<Expansion> {
        let dim = self.target_dim(strategy);
        let next = next_split_dim(dim, self.cube.len());

        let width = self.cube.get(dim).map_or(0.0, Interval::size);
        if width > 0.0 && width <= min_width {
            return Ok(Expansion {
                nodes: vec![Self {
                    cube: self.cube.clone(),
                    split_dim: next,
                    bound: self.bound,
                }],
                infeasible: 0,
                unsplit: true,
            });
        }

        let mut expansion = Expansion::default();
        for cube in self.cube.split_dim(dim)? {
            match Self::new(objective, cube, next)? {
                Some(node) => expansion.nodes.push(node),
                None => expansion.infeasible += 1,
            }
        }
        Ok(expansion)
    }

    /// Coordinate bounds followed by the objective bound, as `(lo, hi)` pairs.
    pub fn to_flat_bounds(&self) -> Vec<(f64, f64)> {
        let mut out = self.cube.to_flat_bounds();
        out.push((self.bound.left(), self.bound.right()));
        out
    }
}

/// Frontier statistics recorded after each completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationMetrics {
    /// Iteration number; 0 describes the initial frontier.
    pub iteration: usize,
    /// Sum of node volumes over the frontier.
    pub total_volume: f64,
    /// Number of nodes in the frontier.
    pub node_count: usize,
    /// Pruning threshold: largest lower bound among this iteration's children.
    pub delta_sup: f64,
    /// Largest upper bound in the frontier (`-inf` when empty).
    pub max_upper: f64,
}

impl IterationMetrics {
    /// Summarizes `frontier` at `iteration`.
    pub fn of(iteration: usize, frontier: &[SearchNode], delta_sup: f64) -> Self {
        Self {
            iteration,
            total_volume: frontier.iter().map(SearchNode::volume).sum(),
            node_count: frontier.len(),
            delta_sup,
            max_upper: frontier
                .iter()
                .map(|node| node.bound().right())
                .fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Width of the enclosure of the global maximum, `max_upper - delta_sup`.
    pub fn bound_gap(&self) -> f64 {
        self.max_upper - self.delta_sup
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// The configured number of iterations completed.
    IterationBudget,
    /// Frontier volume fell to the configured floor.
    MinVolume,
    /// The bound gap fell to the configured tolerance.
    BoundGap,
    /// Node count and volume stopped changing.
    Stalled,
    /// The next expansion could exceed the node cap.
    NodeLimit,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// Cancelled through the cancellation token.
    Cancelled,
    /// The frontier became empty: no feasible point in the domain.
    Exhausted,
}

/// Receives metrics as the run progresses.
///
/// Closures `FnMut(&IterationMetrics)` implement this trait.
pub trait BnbObserver {
    fn on_iteration(&mut self, metrics: &IterationMetrics);
}

/// Observer that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BnbObserver for NoopObserver {
    fn on_iteration(&mut self, _metrics: &IterationMetrics) {}
}

impl<F: FnMut(&IterationMetrics)> BnbObserver for F {
    fn on_iteration(&mut self, metrics: &IterationMetrics) {
        self(metrics)
    }
}
