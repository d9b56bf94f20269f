//! Conservative interval arithmetic.
//!
//! An [`Interval`] `[lo, hi]` encloses every real value a quantity may take.
//! Each operation returns an interval that contains the exact real result for
//! any choice of operands drawn from the inputs: endpoints are computed in
//! `f64` and then stepped one ulp outward.
//!
//! # Examples
//!
//! ```
//! use polycube_bound::interval::Interval;
//!
//! let a = Interval::new(1.0, 2.0).unwrap();
//! let b = Interval::new(-3.0, 0.5).unwrap();
//! let p = a * b;
//! assert!(p.contains(-6.0) && p.contains(1.0));
//! assert!(a.square().left() >= 0.0);
//! ```
//!
//! # References
//!
//! Moore, Kearfott & Cloud (2009), "Introduction to Interval Analysis"

mod rounding;

use crate::error::{Error, Result};
use rounding::{next_down, next_up};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A closed interval `[lo, hi]` with `lo <= hi`.
///
/// A degenerate interval (`lo == hi`) represents an exact real.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    lo: f64,
    hi: f64,
}

/// Result of bisecting an interval.
///
/// Zero-width intervals are not subdivided: they come back [`Whole`](Split::Whole).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Split {
    /// `[lo, mid]` and `[mid, hi]`, sharing the midpoint exactly.
    Halves(Interval, Interval),
    /// The original interval, unchanged.
    Whole(Interval),
}

impl Split {
    /// Number of parts (1 or 2).
    pub fn len(&self) -> usize {
        match self {
            Split::Halves(..) => 2,
            Split::Whole(_) => 1,
        }
    }

    /// Always `false`; a split has at least one part.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The parts in ascending order.
    pub fn to_vec(&self) -> Vec<Interval> {
        match *self {
            Split::Halves(l, r) => vec![l, r],
            Split::Whole(i) => vec![i],
        }
    }
}

impl Interval {
    /// The exact zero.
    pub const ZERO: Self = Self { lo: 0.0, hi: 0.0 };

    /// The exact one, identity for multiplication.
    pub const ONE: Self = Self { lo: 1.0, hi: 1.0 };

    /// Creates `[lo, hi]`.
    ///
    /// # Errors
    /// [`Error::InvertedInterval`] if `lo > hi` or either bound is NaN.
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Err(Error::InvertedInterval { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Creates the degenerate interval `[v, v]`.
    pub fn point(v: f64) -> Self {
        Self { lo: v, hi: v }
    }

    /// Widens a raw `[lo, hi]` pair one ulp outward.
    #[inline]
    fn outward(lo: f64, hi: f64) -> Self {
        Self {
            lo: next_down(lo),
            hi: next_up(hi),
        }
    }

    /// Lower bound.
    #[inline]
    pub fn left(self) -> f64 {
        self.lo
    }

    /// Upper bound.
    #[inline]
    pub fn right(self) -> f64 {
        self.hi
    }

    /// Width `right - left`.
    #[inline]
    pub fn size(self) -> f64 {
        self.hi - self.lo
    }

    /// Floating-point midpoint, always within `[lo, hi]`.
    pub fn midpoint(self) -> f64 {
        let mid = (self.lo + self.hi) / 2.0;
        if mid.is_finite() {
            mid.clamp(self.lo, self.hi)
        } else {
            // lo + hi overflowed
            self.lo / 2.0 + self.hi / 2.0
        }
    }

    /// Whether the interval is a single point.
    pub fn is_degenerate(self) -> bool {
        self.lo == self.hi
    }

    /// Whether `x` lies in `[lo, hi]`.
    pub fn contains(self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Whether every point of the interval is strictly greater than `threshold`.
    pub fn exceeds(self, threshold: f64) -> bool {
        self.lo > threshold
    }

    /// Whether every point of the interval is at most `threshold`.
    pub fn at_most(self, threshold: f64) -> bool {
        self.hi <= threshold
    }

    /// Smallest interval containing both operands.
    pub fn hull(self, other: Self) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Enclosure of `a + b`.
    pub fn add(self, other: Self) -> Self {
        Self::outward(self.lo + other.lo, self.hi + other.hi)
    }

    /// Enclosure of `a - b`.
    pub fn sub(self, other: Self) -> Self {
        Self::outward(self.lo - other.hi, self.hi - other.lo)
    }

    /// Enclosure of `a * b` from all four corner products.
    pub fn mul(self, other: Self) -> Self {
        let corners = [
            self.lo * other.lo,
            self.lo * other.hi,
            self.hi * other.lo,
            self.hi * other.hi,
        ];
        let lo = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::outward(lo, hi)
    }

    /// Enclosure of `a²`.
    ///
    /// Tighter than `a * a`: the result is never negative, and an interval
    /// straddling zero has lower bound exactly 0.
    pub fn square(self) -> Self {
        let (lo, hi) = if self.lo >= 0.0 {
            (self.lo * self.lo, self.hi * self.hi)
        } else if self.hi <= 0.0 {
            (self.hi * self.hi, self.lo * self.lo)
        } else {
            let m = self.lo.abs().max(self.hi);
            (0.0, m * m)
        };
        Self {
            lo: if lo == 0.0 { 0.0 } else { next_down(lo).max(0.0) },
            hi: next_up(hi),
        }
    }

    /// Exact negation.
    pub fn neg(self) -> Self {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }

    /// Bisects at the midpoint.
    ///
    /// The halves share the midpoint, so their union is exactly `self`. A
    /// zero-width interval returns [`Split::Whole`] to avoid endless
    /// subdivision of already exact coordinates.
    pub fn split(self) -> Split {
        if self.size() > 0.0 {
            let mid = self.midpoint();
            Split::Halves(
                Self { lo: self.lo, hi: mid },
                Self { lo: mid, hi: self.hi },
            )
        } else {
            Split::Whole(self)
        }
    }
}

impl Add for Interval {
    type Output = Interval;
    fn add(self, rhs: Interval) -> Interval {
        Interval::add(self, rhs)
    }
}

impl Sub for Interval {
    type Output = Interval;
    fn sub(self, rhs: Interval) -> Interval {
        Interval::sub(self, rhs)
    }
}

impl Mul for Interval {
    type Output = Interval;
    fn mul(self, rhs: Interval) -> Interval {
        Interval::mul(self, rhs)
    }
}

impl Neg for Interval {
    type Output = Interval;
    fn neg(self) -> Interval {
        Interval::neg(self)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(lo: f64, hi: f64) -> Interval {
        Interval::new(lo, hi).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted() {
        assert_eq!(
            Interval::new(2.0, 1.0),
            Err(Error::InvertedInterval { lo: 2.0, hi: 1.0 })
        );
        assert!(Interval::new(f64::NAN, 1.0).is_err());
        assert!(Interval::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_accessors() {
        let i = iv(-1.0, 3.0);
        assert_eq!(i.left(), -1.0);
        assert_eq!(i.right(), 3.0);
        assert_eq!(i.size(), 4.0);
        assert_eq!(i.midpoint(), 1.0);
        assert!(!i.is_degenerate());
        assert!(Interval::point(2.0).is_degenerate());
    }

    #[test]
    fn test_add_sub_enclose() {
        let a = iv(1.0, 2.0);
        let b = iv(10.0, 20.0);
        let s = a + b;
        assert!(s.left() <= 11.0 && s.right() >= 22.0);
        let d = a - b;
        assert!(d.left() <= -19.0 && d.right() >= -8.0);
    }

    #[test]
    fn test_mul_uses_all_corners() {
        let a = iv(-2.0, 3.0);
        let b = iv(-5.0, 4.0);
        let p = a * b;
        // corners: 10, -8, -15, 12
        assert!(p.left() <= -15.0 && p.left() > -15.0001);
        assert!(p.right() >= 12.0 && p.right() < 12.0001);
    }

    #[test]
    fn test_square_tighter_than_mul() {
        let a = iv(-1.0, 2.0);
        let sq = a.square();
        let m = a * a;
        assert_eq!(sq.left(), 0.0);
        assert!(m.left() < 0.0);
        assert!(sq.right() >= 4.0);
    }

    #[test]
    fn test_square_sign_cases() {
        let pos = iv(2.0, 3.0).square();
        assert!(pos.left() <= 4.0 && pos.left() > 3.999);
        assert!(pos.right() >= 9.0);

        let neg = iv(-3.0, -2.0).square();
        assert!(neg.left() <= 4.0 && neg.left() > 3.999);
        assert!(neg.right() >= 9.0);

        assert_eq!(Interval::ZERO.square().left(), 0.0);
    }

    #[test]
    fn test_outward_rounding_strict() {
        // 0.1 + 0.2 is inexact; the enclosure must straddle the rounded value
        let s = Interval::point(0.1) + Interval::point(0.2);
        assert!(s.left() < 0.1 + 0.2);
        assert!(s.right() > 0.1 + 0.2);
    }

    #[test]
    fn test_exceeds_is_conservative() {
        let i = iv(3.0, 5.0);
        assert!(i.exceeds(2.9));
        assert!(!i.exceeds(3.0));
        assert!(!i.exceeds(4.0));
        assert!(i.at_most(5.0));
        assert!(!i.at_most(4.9));
    }

    #[test]
    fn test_split_halves() {
        let i = iv(0.0, 4.0);
        match i.split() {
            Split::Halves(l, r) => {
                assert_eq!(l, iv(0.0, 2.0));
                assert_eq!(r, iv(2.0, 4.0));
                assert_eq!(l.right(), r.left());
            }
            Split::Whole(_) => panic!("expected two halves"),
        }
        assert_eq!(i.split().len(), 2);
    }

    #[test]
    fn test_split_degenerate_returns_self() {
        let p = Interval::point(2.0);
        assert_eq!(p.split(), Split::Whole(p));
        assert_eq!(p.split().to_vec(), vec![p]);
    }

    #[test]
    fn test_hull_and_neg() {
        let h = iv(0.0, 1.0).hull(iv(3.0, 4.0));
        assert_eq!(h, iv(0.0, 4.0));
        assert_eq!(-iv(1.0, 2.0), iv(-2.0, -1.0));
    }

    #[test]
    fn test_midpoint_no_overflow() {
        let i = iv(f64::MAX / 2.0, f64::MAX);
        let m = i.midpoint();
        assert!(m.is_finite());
        assert!(i.contains(m));
    }
}
