//! Objective enclosures over polycubes.
//!
//! The objective is the generalized discriminant
//! `Δ(z_1, …, z_n) = ∏_{i > j} |z_i - z_j|²`, maximized subject to
//! `|z_i - z_j| ≤ d` for every pair (the points lie in a common disk of
//! diameter `d`).
//!
//! - [`IntervalObjective`]: the seam between the branch-and-bound driver and
//!   the function being bounded
//! - [`PairwiseDistance`]: the discriminant itself

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::polycube::Polycube;

/// An objective that can be enclosed over a whole polycube.
///
/// The driver maximizes. Implementations must be conservative: for every
/// point `x` of `cube` that satisfies the constraints,
/// `evaluate(x) ∈ bound(cube)`.
pub trait IntervalObjective: Send + Sync {
    /// Enclosure of the objective over `cube`.
    ///
    /// `None` means no point of `cube` can satisfy the constraints.
    fn bound(&self, cube: &Polycube) -> Option<Interval>;

    /// Floating-point value at the real point `x`, `None` when infeasible.
    ///
    /// Not rounded; use [`certified_lower`](Self::certified_lower) when the
    /// value must be provably achievable.
    fn evaluate(&self, x: &[f64]) -> Option<f64>;

    /// A value the objective provably attains at `x`.
    ///
    /// `Some(v)` only if `x` is provably feasible; `v` is then a lower bound
    /// on the exact objective at `x`.
    fn certified_lower(&self, x: &[f64]) -> Option<f64>;
}

/// Product of squared pairwise distances under a common distance cap.
///
/// # Examples
///
/// ```
/// use polycube_bound::objective::{IntervalObjective, PairwiseDistance};
/// use polycube_bound::polycube::Polycube;
///
/// let objective = PairwiseDistance::default();
/// let bound = objective.bound(&Polycube::initial(3).unwrap()).unwrap();
/// assert!(bound.right() >= 64.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseDistance {
    max_distance: f64,
    threshold: Interval,
}

impl Default for PairwiseDistance {
    fn default() -> Self {
        Self {
            max_distance: 2.0,
            threshold: Interval::point(4.0),
        }
    }
}

impl PairwiseDistance {
    /// Objective with pairwise distances capped at `max_distance`.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] unless `max_distance` is finite and positive.
    pub fn new(max_distance: f64) -> Result<Self> {
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(Error::config(format!(
                "max_distance must be finite and positive, got {max_distance}"
            )));
        }
        Ok(Self {
            max_distance,
            threshold: squared_threshold(max_distance),
        })
    }

    /// The distance cap `d`.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Enclosure of `d²`.
    pub fn threshold(&self) -> Interval {
        self.threshold
    }

    /// Enclosure of `|z_i - z_j|²` over `cube`; `None` if either index is
    /// out of range.
    pub fn squared_distance(cube: &Polycube, i: usize, j: usize) -> Option<Interval> {
        let (re_i, im_i) = cube.complex(i)?;
        let (re_j, im_j) = cube.complex(j)?;
        Some((re_i - re_j).square() + (im_i - im_j).square())
    }

    /// Product of the pairwise enclosures, stopping at the first pair that
    /// `reject` refuses.
    fn pair_product(&self, cube: &Polycube, reject: impl Fn(Interval) -> bool) -> Option<Interval> {
        let mut out = Interval::ONE;
        for i in 0..cube.n() {
            for j in 0..i {
                let norm = Self::squared_distance(cube, i, j)?;
                if reject(norm) {
                    return None;
                }
                out = out * norm;
            }
        }
        Some(out)
    }
}

impl IntervalObjective for PairwiseDistance {
    fn bound(&self, cube: &Polycube) -> Option<Interval> {
        let cap = self.threshold.right();
        self.pair_product(cube, |norm| norm.exceeds(cap))
    }

    fn evaluate(&self, x: &[f64]) -> Option<f64> {
        let cap = self.max_distance * self.max_distance;
        let n = x.len() / 2;
        let mut out = 1.0;
        for i in 0..n {
            for j in 0..i {
                let dre = x[2 * i] - x[2 * j];
                let dim = x[2 * i + 1] - x[2 * j + 1];
                let norm = dre * dre + dim * dim;
                if norm > cap {
                    return None;
                }
                out *= norm;
            }
        }
        Some(out)
    }

    fn certified_lower(&self, x: &[f64]) -> Option<f64> {
        let cube = Polycube::from_point(x).ok()?;
        let cap = self.threshold.left();
        self.pair_product(&cube, |norm| !norm.at_most(cap))
            .map(|bound| bound.left().max(0.0))
    }
}

/// Enclosure of `d * d`, degenerate when the product is exact in `f64`.
fn squared_threshold(d: f64) -> Interval {
    let sq = d * d;
    if d.mul_add(d, -sq) == 0.0 {
        Interval::point(sq)
    } else {
        Interval::point(d).square()
    }
}
