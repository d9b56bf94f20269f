//! Directed rounding by one unit in the last place.
//!
//! Arithmetic on `f64` rounds to nearest, so a computed endpoint may sit up to
//! half an ulp on the wrong side of the exact real result. Stepping one ulp
//! outward restores the enclosure.

/// Smallest `f64` strictly greater than `x`.
#[inline]
pub(crate) fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        // Smallest positive subnormal.
        return f64::from_bits(1);
    }

    let bits = x.to_bits();
    if x.is_sign_positive() {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Largest `f64` strictly less than `x`.
#[inline]
pub(crate) fn next_down(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return x;
    }
    if x == 0.0 {
        // Smallest negative subnormal.
        return f64::from_bits(0x8000_0000_0000_0001);
    }

    let bits = x.to_bits();
    if x.is_sign_positive() {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_one_ulp() {
        assert!(next_up(1.0) > 1.0);
        assert!(next_down(1.0) < 1.0);
        assert_eq!(next_up(1.0), 1.0 + f64::EPSILON);
        assert_eq!(next_down(next_up(1.0)), 1.0);
    }

    #[test]
    fn test_crosses_zero() {
        assert!(next_up(0.0) > 0.0);
        assert!(next_down(0.0) < 0.0);
        assert!(next_up(-0.0) > 0.0);
        assert_eq!(next_up(next_down(0.0)), 0.0);
    }

    #[test]
    fn test_negative_values() {
        assert!(next_up(-1.0) > -1.0);
        assert!(next_down(-1.0) < -1.0);
    }

    #[test]
    fn test_infinities_are_fixed_points() {
        assert_eq!(next_up(f64::INFINITY), f64::INFINITY);
        assert_eq!(next_down(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert_eq!(next_up(f64::MAX), f64::INFINITY);
    }
}
