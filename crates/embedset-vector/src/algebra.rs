//! Vector algebra kernels.
//!
//! Slice-level building blocks for the operators exposed on
//! [`Embedding`](crate::types::Embedding): sums, differences, projection onto an
//! axis, removal of the axis component, the signed scalar projection and the
//! coordinate-wise mean.
//!
//! All binary kernels check dimensions and return a fresh vector. Projection
//! kernels refuse an all-zero axis and accumulate in `f64`, so tiny or huge axes
//! neither underflow nor overflow on the way. A result that still cannot be
//! represented in `f32` is an error, never NaN or infinity.

use crate::distance::{dot_product_f64, sum_of_squares_f64};
use crate::error::VectorError;

fn ensure_finite(values: Vec<f32>) -> Result<Vec<f32>, VectorError> {
    match values.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(VectorError::InvalidValue {
            index,
            value: values[index],
            reason: "result does not fit in f32",
        }),
        None => Ok(values),
    }
}

fn is_zero(v: &[f32]) -> bool {
    v.iter().all(|x| *x == 0.0)
}

/// Element-wise `a + b`.
///
/// # Errors
///
/// Returns [`VectorError::DimensionMismatch`] if the vectors differ in length.
pub fn add(a: &[f32], b: &[f32]) -> Result<Vec<f32>, VectorError> {
    VectorError::check_dimensions(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Element-wise `a - b`.
///
/// # Errors
///
/// Returns [`VectorError::DimensionMismatch`] if the vectors differ in length.
pub fn subtract(a: &[f32], b: &[f32]) -> Result<Vec<f32>, VectorError> {
    VectorError::check_dimensions(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Multiply every component by `factor`.
#[must_use]
pub fn scale(v: &[f32], factor: f32) -> Vec<f32> {
    v.iter().map(|x| x * factor).collect()
}

/// The coefficient `(a·axis) / (axis·axis)` of the projection of `a` onto `axis`.
fn projection_coefficient(a: &[f32], axis: &[f32]) -> Result<f64, VectorError> {
    VectorError::check_dimensions(axis.len(), a.len())?;
    if is_zero(axis) {
        return Err(VectorError::ZeroVector);
    }
    Ok(dot_product_f64(a, axis) / sum_of_squares_f64(axis))
}

/// The vector component of `a` along `axis`: `(a·axis / axis·axis) * axis`.
///
/// # Errors
///
/// Returns [`VectorError::ZeroVector`] if every component of `axis` is zero,
/// [`VectorError::DimensionMismatch`] if the vectors differ in length, or
/// [`VectorError::InvalidValue`] if a component of the result overflows `f32`.
#[allow(clippy::cast_possible_truncation)]
pub fn project_onto(a: &[f32], axis: &[f32]) -> Result<Vec<f32>, VectorError> {
    let coefficient = projection_coefficient(a, axis)?;
    ensure_finite(axis.iter().map(|&y| (coefficient * f64::from(y)) as f32).collect())
}

/// `a` with its component along `axis` removed.
///
/// The result is orthogonal to `axis` up to floating point error.
///
/// # Errors
///
/// Same as [`project_onto`].
#[allow(clippy::cast_possible_truncation)]
pub fn orthogonalize(a: &[f32], axis: &[f32]) -> Result<Vec<f32>, VectorError> {
    let coefficient = projection_coefficient(a, axis)?;
    ensure_finite(
        a.iter()
            .zip(axis)
            .map(|(&x, &y)| (f64::from(x) - coefficient * f64::from(y)) as f32)
            .collect(),
    )
}

/// Signed length of the projection of `a` onto `axis`: `(a·axis) / ‖axis‖`.
///
/// # Errors
///
/// Returns [`VectorError::ZeroVector`] for an all-zero axis,
/// [`VectorError::DimensionMismatch`] if the vectors differ in length, or
/// [`VectorError::NonFinite`] if the length overflows `f32`.
#[allow(clippy::cast_possible_truncation)]
pub fn scalar_projection(a: &[f32], axis: &[f32]) -> Result<f32, VectorError> {
    VectorError::check_dimensions(axis.len(), a.len())?;
    if is_zero(axis) {
        return Err(VectorError::ZeroVector);
    }
    let length = (dot_product_f64(a, axis) / sum_of_squares_f64(axis).sqrt()) as f32;
    if !length.is_finite() {
        return Err(VectorError::NonFinite { operation: "scalar projection", value: length });
    }
    Ok(length)
}

/// Coordinate-wise arithmetic mean of a set of rows.
///
/// # Errors
///
/// Returns [`VectorError::InvalidDimension`] when there are no rows and
/// [`VectorError::DimensionMismatch`] when the rows are ragged.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn mean<R>(rows: &[R]) -> Result<Vec<f32>, VectorError>
where
    R: AsRef<[f32]>,
{
    let first = rows.first().ok_or(VectorError::InvalidDimension { expected: 1, actual: 0 })?;
    let mut sum = vec![0.0_f64; first.as_ref().len()];
    for row in rows {
        let row = row.as_ref();
        VectorError::check_dimensions(sum.len(), row.len())?;
        for (acc, &x) in sum.iter_mut().zip(row) {
            *acc += f64::from(x);
        }
    }
    let count = rows.len() as f64;
    Ok(sum.into_iter().map(|x| (x / count) as f32).collect())
}
