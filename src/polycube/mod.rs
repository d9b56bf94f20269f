//! Complex polycubes: products of intervals over `C^n`.
//!
//! A [`Polycube`] is the set `S = S_1 × … × S_n` where each
//! `S_i = { u + v i : u ∈ R_i, v ∈ I_i }`. It is stored as the flat sequence
//! `[R_1, I_1, …, R_n, I_n]` of `2n` intervals.
//!
//! The first [`FIXED_DIMS`] coordinates are pinned by symmetry reduction (two
//! points fixed up to rotation and translation, one coordinate of a third),
//! so they are degenerate and carry no volume.
//!
//! A polycube is immutable. [`Polycube::split`] builds new values.

use crate::error::{Error, Result};
use crate::interval::Interval;
use std::fmt;

/// Number of leading coordinates fixed by symmetry reduction.
pub const FIXED_DIMS: usize = 3;

/// Value of the pinned coordinates in the initial polycube.
pub const PINNED_VALUE: f64 = 2.0;

/// Side of the square `[0, SIDE] × [0, SIDE]` every free point starts in.
pub const SIDE: f64 = 4.0;

/// A product of `2n` intervals, read as `n` complex coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polycube {
    z: Vec<Interval>,
}

impl Polycube {
    /// Creates a polycube from `[R_1, I_1, …, R_n, I_n]`.
    ///
    /// # Errors
    /// [`Error::EmptyPolycube`] for an empty sequence and
    /// [`Error::OddDimension`] when the length is odd.
    pub fn new(z: Vec<Interval>) -> Result<Self> {
        if z.is_empty() {
            return Err(Error::EmptyPolycube);
        }
        if z.len() % 2 != 0 {
            return Err(Error::OddDimension { len: z.len() });
        }
        Ok(Self { z })
    }

    /// Degenerate polycube holding exactly the real point `x`.
    ///
    /// # Errors
    /// Same as [`Polycube::new`]; NaN coordinates give
    /// [`Error::InvertedInterval`].
    pub fn from_point(x: &[f64]) -> Result<Self> {
        let z = x
            .iter()
            .map(|&v| Interval::new(v, v))
            .collect::<Result<Vec<_>>>()?;
        Self::new(z)
    }

    /// The whole search domain for `n` points.
    ///
    /// Three degenerate coordinates at [`PINNED_VALUE`] followed by `2n - 3`
    /// copies of `[0, SIDE]`.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] when `n < 2`.
    pub fn initial(n: usize) -> Result<Self> {
        if n < 2 {
            return Err(Error::config(format!("n must be at least 2, got {n}")));
        }
        let mut z = vec![Interval::point(PINNED_VALUE); FIXED_DIMS];
        z.extend(std::iter::repeat_n(full_side(), 2 * n - FIXED_DIMS));
        Self::new(z)
    }

    /// Number of complex coordinates.
    pub fn n(&self) -> usize {
        self.z.len() / 2
    }

    /// Number of real coordinates (`2n`).
    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// Always `false`; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// The flat interval sequence.
    pub fn intervals(&self) -> &[Interval] {
        &self.z
    }

    /// Interval of real coordinate `dim`.
    pub fn get(&self, dim: usize) -> Option<Interval> {
        self.z.get(dim).copied()
    }

    /// `(real, imaginary)` enclosure of complex coordinate `i`, or `None` if
    /// `i >= n`.
    pub fn complex(&self, i: usize) -> Option<(Interval, Interval)> {
        Some((*self.z.get(2 * i)?, *self.z.get(2 * i + 1)?))
    }

    /// Read-only view of the polycube as complex pairs.
    pub fn complex_view(&self) -> impl ExactSizeIterator<Item = (Interval, Interval)> + '_ {
        self.z.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Product of widths over the free dimensions (index ≥ [`FIXED_DIMS`]).
    ///
    /// Zero if any free dimension is degenerate.
    pub fn volume(&self) -> f64 {
        self.z.iter().skip(FIXED_DIMS).map(|i| i.size()).product()
    }

    /// Splits every dimension listed in `dims` in two.
    ///
    /// Returns the cartesian product of the per-dimension parts, so `k`
    /// splittable dimensions yield `2^k` children. Degenerate dimensions
    /// contribute a single part. Duplicate indices are treated once.
    ///
    /// # Errors
    /// [`Error::DimensionOutOfRange`] if any index is `>= len()`.
    pub fn split(&self, dims: &[usize]) -> Result<Vec<Polycube>> {
        if let Some(&index) = dims.iter().find(|&&d| d >= self.z.len()) {
            return Err(Error::DimensionOutOfRange {
                index,
                len: self.z.len(),
            });
        }

        let mut children: Vec<Vec<Interval>> = vec![Vec::with_capacity(self.z.len())];
        for (dim, &interval) in self.z.iter().enumerate() {
            let parts = if dims.contains(&dim) {
                interval.split().to_vec()
            } else {
                vec![interval]
            };
            if parts.len() == 1 {
                for child in &mut children {
                    child.push(parts[0]);
                }
            } else {
                children = children
                    .into_iter()
                    .flat_map(|prefix| {
                        parts.iter().map(move |&part| {
                            let mut next = prefix.clone();
                            next.push(part);
                            next
                        })
                    })
                    .collect();
            }
        }

        Ok(children.into_iter().map(|z| Polycube { z }).collect())
    }

    /// Splits a single dimension, yielding one or two children.
    ///
    /// # Errors
    /// [`Error::DimensionOutOfRange`] if `dim >= len()`.
    pub fn split_dim(&self, dim: usize) -> Result<Vec<Polycube>> {
        self.split(&[dim])
    }

    /// Free dimension with the largest width; ties go to the lowest index.
    ///
    /// `None` when there are no free dimensions.
    pub fn widest_dim(&self) -> Option<usize> {
        self.z
            .iter()
            .enumerate()
            .skip(FIXED_DIMS)
            .fold(None, |best: Option<(usize, f64)>, (dim, i)| match best {
                Some((_, w)) if w >= i.size() => best,
                _ => Some((dim, i.size())),
            })
            .map(|(dim, _)| dim)
    }

    /// Whether the real point `x` (length `2n`) lies inside the polycube.
    ///
    /// # Errors
    /// [`Error::DimensionMismatch`] when `x.len() != len()`.
    pub fn contains_point(&self, x: &[f64]) -> Result<bool> {
        if x.len() != self.z.len() {
            return Err(Error::DimensionMismatch {
                expected: self.z.len(),
                actual: x.len(),
            });
        }
        Ok(self.z.iter().zip(x).all(|(i, &v)| i.contains(v)))
    }

    /// Flat `(lo, hi)` pairs, one per real coordinate.
    pub fn to_flat_bounds(&self) -> Vec<(f64, f64)> {
        self.z.iter().map(|i| (i.left(), i.right())).collect()
    }
}

fn full_side() -> Interval {
    Interval::point(0.0).hull(Interval::point(SIDE))
}

impl fmt::Display for Polycube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (re, im)) in self.complex_view().enumerate() {
            if i > 0 {
                write!(f, " , ")?;
            }
            write!(f, "z{}={}+{}i", i + 1, re, im)?;
        }
        Ok(())
    }
}
