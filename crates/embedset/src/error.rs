//! Error types for `embedset`.
//!
//! This module provides the [`enum@Error`] type returned by every fallible
//! collection operation. Errors are raised at the call that triggers them and
//! are never retried or degraded internally.

use embedset_vector::VectorError;
use thiserror::Error;

/// Errors that can occur when working with entities and embedding sets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A vector operation failed (dimension mismatch, zero-norm axis, unknown metric, ...).
    #[error("vector error: {0}")]
    Vector(#[from] VectorError),

    /// A name was looked up that is not present in the set.
    #[error("embedding '{name}' does not exist in set '{set}'")]
    NotFound {
        /// The missing name.
        name: String,
        /// The name of the set that was searched.
        set: String,
    },

    /// More results were requested than the set holds.
    #[error("cannot retrieve n={requested} items from a set of len={available}")]
    BoundsExceeded {
        /// Number of results requested.
        requested: usize,
        /// Number of members in the set.
        available: usize,
    },

    /// The operation needs at least one member.
    #[error("embedding set '{set}' is empty")]
    EmptySet {
        /// The name of the empty set.
        set: String,
    },

    /// An entity lacks a property that the operation reads.
    #[error("embedding '{entity}' has no property '{property}'")]
    PropertyMissing {
        /// The entity name.
        entity: String,
        /// The missing property key.
        property: String,
    },
}

impl Error {
    /// Returns `true` if a name or property could not be found.
    #[must_use]
    pub const fn is_lookup_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PropertyMissing { .. })
    }

    /// Returns `true` if vectors of different lengths met in one operation.
    #[must_use]
    pub const fn is_dimension_error(&self) -> bool {
        matches!(self, Self::Vector(VectorError::DimensionMismatch { .. }))
    }
}

/// Result type alias for `embedset` operations.
pub type Result<T> = std::result::Result<T, Error>;
