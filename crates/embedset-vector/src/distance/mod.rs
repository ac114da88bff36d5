//! Distance functions for vector similarity.
//!
//! The low-level kernels come in two flavours:
//!
//! - `simd` (default): portable SIMD via the `wide` crate, 8 floats per step
//! - `scalar`: plain iterator implementations (forced by the `scalar` feature)
//!
//! On top of the kernels sits [`DistanceMetric`], the pluggable metric used for
//! ranking, movement comparison and distance matrices. A metric is usually selected
//! by its identifier:
//!
//! ```
//! use embedset_vector::distance::DistanceMetric;
//!
//! let metric: DistanceMetric = "cosine".parse().unwrap();
//! assert_eq!(metric, DistanceMetric::Cosine);
//! assert!("levenshtein".parse::<DistanceMetric>().is_err());
//! ```

#[cfg(all(feature = "simd", not(feature = "scalar")))]
mod simd;

#[cfg(any(feature = "scalar", not(feature = "simd")))]
mod scalar;

#[cfg(all(feature = "simd", not(feature = "scalar")))]
pub use simd::{
    chebyshev_distance, dot_product, euclidean_distance_squared, manhattan_distance,
    sum_of_squares,
};

#[cfg(any(feature = "scalar", not(feature = "simd")))]
pub use scalar::{
    chebyshev_distance, dot_product, euclidean_distance_squared, manhattan_distance,
    sum_of_squares,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VectorError;

/// Dot product accumulated in `f64`.
///
/// Products of two `f32` values neither overflow nor underflow in `f64`, so this is
/// exact enough for inputs anywhere in the `f32` range.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn dot_product_f64(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    a.iter().zip(b).map(|(&x, &y)| f64::from(x) * f64::from(y)).sum()
}

/// Sum of squares accumulated in `f64`.
#[inline]
#[must_use]
pub fn sum_of_squares_f64(v: &[f32]) -> f64 {
    dot_product_f64(v, v)
}

/// Calculate the Euclidean (L2) distance between two vectors.
///
/// Falls back to `f64` accumulation when the squared distance overflows or
/// underflows `f32`.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    let squared = euclidean_distance_squared(a, b);
    if squared.is_normal() {
        return squared.sqrt();
    }
    let squared: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();
    squared.sqrt() as f32
}

/// Calculate the L2 norm (magnitude) of a vector.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn l2_norm(v: &[f32]) -> f32 {
    let squared = sum_of_squares(v);
    if squared.is_normal() {
        return squared.sqrt();
    }
    sum_of_squares_f64(v).sqrt() as f32
}

/// Calculate the cosine similarity between two vectors.
///
/// Returns a value in the range [-1, 1]. Returns 0.0 if either vector has zero
/// magnitude, so a zero vector sits at cosine distance 1 from everything.
/// Inputs whose squared norms leave the normal `f32` range are handled in `f64`.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let norm_product = (sum_of_squares(a) * sum_of_squares(b)).sqrt();
    if norm_product.is_normal() {
        let similarity = dot_product(a, b) / norm_product;
        if similarity.is_finite() {
            return similarity.clamp(-1.0, 1.0);
        }
    }

    let norm_product = sum_of_squares_f64(a).sqrt() * sum_of_squares_f64(b).sqrt();
    if norm_product == 0.0 {
        return 0.0;
    }
    (dot_product_f64(a, b) / norm_product).clamp(-1.0, 1.0) as f32
}

/// Calculate the cosine distance between two vectors.
///
/// Cosine distance = 1 - cosine_similarity, returning a value in [0, 2].
#[inline]
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

/// Distance metric for comparing vectors.
///
/// Smaller is always closer, so [`DistanceMetric::DotProduct`] reports the
/// negated dot product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Cosine distance (1 - cosine similarity).
    #[default]
    Cosine,
    /// Euclidean (L2) distance.
    Euclidean,
    /// Manhattan (L1, city block) distance.
    Manhattan,
    /// Chebyshev (L∞) distance.
    Chebyshev,
    /// Dot product (negative, for max similarity).
    DotProduct,
}

impl DistanceMetric {
    /// All supported metrics.
    pub const ALL: [Self; 5] =
        [Self::Cosine, Self::Euclidean, Self::Manhattan, Self::Chebyshev, Self::DotProduct];

    /// The canonical identifier of this metric.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
            Self::DotProduct => "dot_product",
        }
    }

    /// Calculate the distance between two vectors using this metric.
    ///
    /// Dimensions are only debug-checked; use [`DistanceMetric::distance`] when the
    /// inputs come from outside.
    #[inline]
    #[must_use]
    pub fn calculate(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::Cosine => cosine_distance(a, b),
            Self::Euclidean => euclidean_distance(a, b),
            Self::Manhattan => manhattan_distance(a, b),
            Self::Chebyshev => chebyshev_distance(a, b),
            Self::DotProduct => -dot_product(a, b),
        }
    }

    /// Calculate the distance between two vectors, checking their dimensions and
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if the vectors differ in length and
    /// [`VectorError::NonFinite`] if the distance does not fit in an `f32`.
    #[inline]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
        VectorError::check_dimensions(a.len(), b.len())?;
        let distance = self.calculate(a, b);
        if !distance.is_finite() {
            return Err(VectorError::NonFinite { operation: self.as_str(), value: distance });
        }
        Ok(distance)
    }

    /// Distance from every row of a matrix to a single query vector.
    ///
    /// # Errors
    ///
    /// Same as [`DistanceMetric::distance`] for the first failing row.
    pub fn distances_to<R>(&self, rows: &[R], query: &[f32]) -> Result<Vec<f32>, VectorError>
    where
        R: AsRef<[f32]>,
    {
        rows.iter().map(|row| self.distance(query, row.as_ref())).collect()
    }

    /// Full pairwise distance matrix between the rows of a matrix.
    ///
    /// The result is square and symmetric, with `result[i][j]` the distance from
    /// row `i` to row `j`.
    ///
    /// # Errors
    ///
    /// Same as [`DistanceMetric::distance`] for the first failing pair.
    pub fn pairwise<R>(&self, rows: &[R]) -> Result<Vec<Vec<f32>>, VectorError>
    where
        R: AsRef<[f32]>,
    {
        rows.iter().map(|row| self.distances_to(rows, row.as_ref())).collect()
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "manhattan" | "cityblock" | "l1" => Ok(Self::Manhattan),
            "chebyshev" => Ok(Self::Chebyshev),
            "dot" | "dot_product" => Ok(Self::DotProduct),
            _ => Err(VectorError::UnknownMetric(s.to_string())),
        }
    }
}

impl TryFrom<&str> for DistanceMetric {
    type Error = VectorError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
