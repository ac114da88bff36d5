//! `embedset` Vector
//!
//! Numeric layer of `embedset`: validated dense vectors, vector algebra and
//! distance metrics.
//!
//! # Overview
//!
//! - **Embeddings**: [`Embedding`], a non-empty vector of finite `f32` values
//! - **Algebra**: sum, difference, projection onto an axis, orthogonalization and
//!   scalar projection, all returning new values
//! - **Distance functions**: Cosine, Euclidean, Manhattan, Chebyshev and dot product,
//!   selectable by identifier through [`DistanceMetric`]
//!
//! # Example
//!
//! ```
//! use embedset_vector::{DistanceMetric, Embedding};
//!
//! let king = Embedding::new(vec![0.9, 0.8, 0.1]).unwrap();
//! let man = Embedding::new(vec![0.7, 0.1, 0.1]).unwrap();
//!
//! let royalty = king.subtract(&man).unwrap();
//! let metric: DistanceMetric = "euclidean".parse().unwrap();
//! let d = metric.distance(&royalty, &king).unwrap();
//! assert!(d > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`types`] - Core types ([`Embedding`])
//! - [`algebra`] - Slice-level algebra kernels
//! - [`distance`] - Distance functions and [`DistanceMetric`]
//! - [`error`] - Error types

#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod algebra;
pub mod distance;
pub mod error;
pub mod types;

pub use distance::DistanceMetric;
pub use error::VectorError;
pub use types::Embedding;
