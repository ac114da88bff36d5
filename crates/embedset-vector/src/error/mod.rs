//! Error types for the vector crate.

use thiserror::Error;

/// Errors that can occur in vector operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// Two vectors taking part in one operation have different lengths.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Invalid dimension (e.g., zero).
    #[error("invalid dimension: expected at least {expected}, got {actual}")]
    InvalidDimension {
        /// The minimum expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Invalid value in a vector (NaN, Infinity).
    #[error("invalid value at index {index}: {value} - {reason}")]
    InvalidValue {
        /// The index of the invalid value.
        index: usize,
        /// The invalid value.
        value: f32,
        /// The reason the value is invalid.
        reason: &'static str,
    },

    /// The axis of a projection has zero norm.
    #[error("cannot project onto a zero-norm axis")]
    ZeroVector,

    /// A scalar result (distance, projection length) does not fit in an `f32`.
    #[error("{operation} produced a non-finite result: {value}")]
    NonFinite {
        /// The operation that overflowed.
        operation: &'static str,
        /// The offending result.
        value: f32,
    },

    /// The distance metric identifier does not name a known metric.
    #[error("unknown distance metric '{0}' (expected one of: cosine, euclidean, l2, manhattan, cityblock, l1, chebyshev, dot)")]
    UnknownMetric(String),
}

impl VectorError {
    /// Fail with [`VectorError::DimensionMismatch`] unless the dimensions agree.
    #[inline]
    pub(crate) fn check_dimensions(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, actual })
        }
    }
}
