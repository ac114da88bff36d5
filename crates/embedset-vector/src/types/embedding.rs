//! Embedding type: a validated dense vector.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::algebra;
use crate::distance::l2_norm;
use crate::error::VectorError;

/// A vector embedding with dimension validation.
///
/// Embeddings are fixed-dimension, non-empty vectors of finite f32 values. They
/// are immutable: every algebra operation returns a new embedding.
///
/// # Example
///
/// ```
/// use embedset_vector::types::Embedding;
///
/// let a = Embedding::new(vec![3.0, 4.0]).unwrap();
/// let x = Embedding::new(vec![1.0, 0.0]).unwrap();
///
/// assert_eq!(a.project_onto(&x).unwrap().as_slice(), &[3.0, 0.0]);
/// assert_eq!(a.orthogonalize(&x).unwrap().as_slice(), &[0.0, 4.0]);
/// assert_eq!(a.scalar_projection(&a).unwrap(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    /// Create a new embedding from a vector of f32 values.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is empty or contains NaN/Infinite values.
    pub fn new(data: Vec<f32>) -> Result<Self, VectorError> {
        if data.is_empty() {
            return Err(VectorError::InvalidDimension { expected: 1, actual: 0 });
        }

        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(VectorError::InvalidValue {
                index,
                value,
                reason: if value.is_nan() {
                    "NaN values are not allowed"
                } else {
                    "Infinite values are not allowed"
                },
            });
        }

        Ok(Self { data })
    }

    /// Create a zero-filled embedding of the given dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if dimension is 0.
    pub fn zeros(dimension: usize) -> Result<Self, VectorError> {
        Self::new(vec![0.0; dimension])
    }

    /// Get the dimension of the embedding.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Get the embedding data as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the embedding and return the underlying vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Calculate the L2 (Euclidean) norm of the embedding.
    #[inline]
    #[must_use]
    pub fn l2_norm(&self) -> f32 {
        l2_norm(&self.data)
    }

    /// Whether every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    /// Vector sum `self + other`.
    ///
    /// # Errors
    ///
    /// Fails on a dimension mismatch or if the sum overflows to infinity.
    pub fn add(&self, other: &Self) -> Result<Self, VectorError> {
        Self::new(algebra::add(&self.data, &other.data)?)
    }

    /// Vector difference `self - other`.
    ///
    /// # Errors
    ///
    /// Fails on a dimension mismatch or if the difference overflows to infinity.
    pub fn subtract(&self, other: &Self) -> Result<Self, VectorError> {
        Self::new(algebra::subtract(&self.data, &other.data)?)
    }

    /// The component of `self` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ZeroVector`] if `axis` is the zero vector.
    pub fn project_onto(&self, axis: &Self) -> Result<Self, VectorError> {
        Self::new(algebra::project_onto(&self.data, &axis.data)?)
    }

    /// `self` with its component along `axis` removed.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ZeroVector`] if `axis` is the zero vector.
    pub fn orthogonalize(&self, axis: &Self) -> Result<Self, VectorError> {
        Self::new(algebra::orthogonalize(&self.data, &axis.data)?)
    }

    /// Signed length of the projection of `self` onto `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ZeroVector`] if `axis` is the zero vector.
    pub fn scalar_projection(&self, axis: &Self) -> Result<f32, VectorError> {
        algebra::scalar_projection(&self.data, &axis.data)
    }

    /// Coordinate-wise mean of a non-empty set of embeddings.
    ///
    /// # Errors
    ///
    /// Fails if `embeddings` is empty or the embeddings differ in dimension.
    pub fn mean(embeddings: &[&Self]) -> Result<Self, VectorError> {
        Self::new(algebra::mean(embeddings)?)
    }
}

impl Deref for Embedding {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl AsRef<[f32]> for Embedding {
    #[inline]
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}

impl TryFrom<Vec<f32>> for Embedding {
    type Error = VectorError;

    fn try_from(data: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

impl From<Embedding> for Vec<f32> {
    fn from(embedding: Embedding) -> Self {
        embedding.data
    }
}
