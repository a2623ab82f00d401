// Copyright (c) 2026 The Sortition Developers.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Tolerance Context
//!
//! Fractional mechanism computations live entirely in floating point, so
//! every "is this height equal to that bound?" decision must be made under
//! an explicit comparison policy. `Tolerance` bundles a relative and an
//! absolute tolerance (both strictly positive) and provides the complete
//! set of comparisons the solvers are allowed to use: approximate equality,
//! signed-zero checks, interval membership, and checked clamping.
//!
//! The approximate-equality test follows the widely used formula
//! `|a - b| <= absolute + relative * |b|`.

use thiserror::Error;

/// Errors raised by tolerance construction and checked clamping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToleranceError {
    /// A tolerance value was zero or negative.
    #[error("tolerance must be strictly positive, got {0}")]
    NonPositiveTolerance(f64),
    /// A value fell outside an interval by more than the tolerance allows.
    #[error("value {value} outside [{lower}, {upper}] beyond tolerance")]
    OutOfBounds {
        value: f64,
        lower: f64,
        upper: f64,
    },
    /// An interval was given with its lower bound above its upper bound.
    #[error("empty interval [{lower}, {upper}]")]
    EmptyInterval { lower: f64, upper: f64 },
}

/// The floating-point comparison policy shared by all solver arithmetic.
///
/// A `Tolerance` is immutable after construction and may be freely copied
/// and shared across solve calls.
///
/// # Examples
///
/// ```rust
/// use sortition_core::tolerance::Tolerance;
///
/// let tolerance = Tolerance::new(1e-5, 1e-5).unwrap();
/// assert!(tolerance.is_close(1.0, 1.0 + 1e-9));
/// assert!(!tolerance.is_close(1.0, 1.1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    relative: f64,
    absolute: f64,
}

impl Tolerance {
    /// Default relative tolerance.
    pub const DEFAULT_RELATIVE: f64 = 1e-5;
    /// Default absolute tolerance.
    pub const DEFAULT_ABSOLUTE: f64 = 1e-5;

    /// Creates a tolerance context.
    ///
    /// Both tolerances must be strictly positive.
    pub fn new(relative: f64, absolute: f64) -> Result<Self, ToleranceError> {
        if !(relative > 0.0) {
            return Err(ToleranceError::NonPositiveTolerance(relative));
        }
        if !(absolute > 0.0) {
            return Err(ToleranceError::NonPositiveTolerance(absolute));
        }
        Ok(Tolerance { relative, absolute })
    }

    /// Returns the relative tolerance.
    #[inline]
    pub fn relative(&self) -> f64 {
        self.relative
    }

    /// Returns the absolute tolerance.
    #[inline]
    pub fn absolute(&self) -> f64 {
        self.absolute
    }

    /// Tests whether `a` and `b` are equal up to this tolerance.
    ///
    /// Note that the test is asymmetric in its arguments: the relative
    /// component scales with `|b|`.
    #[inline]
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.absolute + self.relative * b.abs()
    }

    /// Tests whether `a` is positive or within tolerance of zero.
    #[inline]
    pub fn is_nonnegative(&self, a: f64) -> bool {
        a > 0.0 || self.is_close(a, 0.0)
    }

    /// Tests whether `value` lies inside `[lower, upper]` or within
    /// tolerance of either bound.
    #[inline]
    pub fn is_in_interval(&self, value: f64, lower: f64, upper: f64) -> bool {
        debug_assert!(
            lower <= upper,
            "called `Tolerance::is_in_interval` with inverted bounds: [{}, {}]",
            lower,
            upper
        );
        if value < lower {
            return self.is_close(value, lower);
        }
        if upper < value {
            return self.is_close(upper, value);
        }
        true
    }

    /// Clamps `value` into `[lower, upper]`.
    #[inline]
    pub fn bound(&self, value: f64, lower: f64, upper: f64) -> f64 {
        debug_assert!(
            lower <= upper,
            "called `Tolerance::bound` with inverted bounds: [{}, {}]",
            lower,
            upper
        );
        if value < lower {
            return lower;
        }
        if upper < value {
            return upper;
        }
        value
    }

    /// Clamps `value` into `[lower, upper]` if it is inside the interval
    /// up to tolerance, and fails otherwise.
    pub fn check_bound(&self, value: f64, lower: f64, upper: f64) -> Result<f64, ToleranceError> {
        if lower > upper {
            return Err(ToleranceError::EmptyInterval { lower, upper });
        }
        if self.is_in_interval(value, lower, upper) {
            Ok(self.bound(value, lower, upper))
        } else {
            Err(ToleranceError::OutOfBounds {
                value,
                lower,
                upper,
            })
        }
    }
}

impl Default for Tolerance {
    /// Returns the default tolerance context (`1e-5` relative and absolute).
    #[inline]
    fn default() -> Self {
        Tolerance {
            relative: Self::DEFAULT_RELATIVE,
            absolute: Self::DEFAULT_ABSOLUTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_tolerances() {
        assert!(matches!(
            Tolerance::new(0.0, 1e-5),
            Err(ToleranceError::NonPositiveTolerance(_))
        ));
        assert!(matches!(
            Tolerance::new(1e-5, -1.0),
            Err(ToleranceError::NonPositiveTolerance(_))
        ));
        assert!(matches!(
            Tolerance::new(f64::NAN, 1e-5),
            Err(ToleranceError::NonPositiveTolerance(_))
        ));
    }

    #[test]
    fn test_is_close() {
        let tolerance = Tolerance::default();
        assert!(tolerance.is_close(0.5, 0.5));
        assert!(tolerance.is_close(0.5, 0.5 + 1e-8));
        assert!(!tolerance.is_close(0.5, 0.6));
        assert!(tolerance.is_close(1e-9, 0.0));
    }

    #[test]
    fn test_is_nonnegative() {
        let tolerance = Tolerance::default();
        assert!(tolerance.is_nonnegative(0.3));
        assert!(tolerance.is_nonnegative(0.0));
        assert!(tolerance.is_nonnegative(-1e-9));
        assert!(!tolerance.is_nonnegative(-0.1));
    }

    #[test]
    fn test_is_in_interval() {
        let tolerance = Tolerance::default();
        assert!(tolerance.is_in_interval(0.5, 0.0, 1.0));
        assert!(tolerance.is_in_interval(0.0, 0.0, 1.0));
        assert!(tolerance.is_in_interval(1.0 + 1e-9, 0.0, 1.0));
        assert!(tolerance.is_in_interval(-1e-9, 0.0, 1.0));
        assert!(!tolerance.is_in_interval(1.5, 0.0, 1.0));
        assert!(!tolerance.is_in_interval(-0.5, 0.0, 1.0));
    }

    #[test]
    fn test_bound_clamps() {
        let tolerance = Tolerance::default();
        assert_eq!(tolerance.bound(0.5, 0.0, 1.0), 0.5);
        assert_eq!(tolerance.bound(-0.1, 0.0, 1.0), 0.0);
        assert_eq!(tolerance.bound(1.1, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_check_bound() {
        let tolerance = Tolerance::default();
        assert_eq!(tolerance.check_bound(1.0 + 1e-9, 0.0, 1.0), Ok(1.0));
        assert_eq!(tolerance.check_bound(0.25, 0.0, 1.0), Ok(0.25));
        assert!(matches!(
            tolerance.check_bound(1.5, 0.0, 1.0),
            Err(ToleranceError::OutOfBounds { .. })
        ));
        assert!(matches!(
            tolerance.check_bound(0.5, 1.0, 0.0),
            Err(ToleranceError::EmptyInterval { .. })
        ));
    }
}
