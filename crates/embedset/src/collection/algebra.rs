//! Entity algebra lifted to whole sets.
//!
//! Each operator applies one entity operation to every member against a single
//! fixed right-hand operand. Keys and order are preserved; the result set is
//! named after the operation, e.g. `"(Emb - king)"`.

use serde::{Deserialize, Serialize};

use super::EmbeddingSet;
use crate::entity::Entity;
use crate::error::Result;
use crate::search::Query;

/// Coordinates of one member on a pair of axes.
///
/// `x` and `y` are the scalar projections of the member onto the two axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPoint {
    /// Projection onto the x axis.
    pub x: f32,
    /// Projection onto the y axis.
    pub y: f32,
    /// The member's entity name.
    pub name: String,
    /// The member's origin token.
    pub origin: String,
}

impl EmbeddingSet {
    fn lift<F>(&self, op: &str, other: &Entity, f: F) -> Result<Self>
    where
        F: Fn(&Entity, &Entity) -> Result<Entity>,
    {
        let entries = self
            .entries()
            .map(|(key, entity)| Ok((key.to_owned(), f(entity, other)?)))
            .collect::<Result<Vec<_>>>()?;
        let name = format!("({} {op} {})", self.name(), other.name());
        tracing::debug!(
            set = %self.name(),
            other = %other.name(),
            op,
            members = entries.len(),
            "lifted algebra"
        );
        Ok(Self::derived(name, entries))
    }

    /// Add `other` to every member.
    ///
    /// # Errors
    ///
    /// Fails if any member's dimension differs from `other`.
    pub fn add(&self, other: &Entity) -> Result<Self> {
        self.lift("+", other, Entity::add)
    }

    /// Subtract `other` from every member.
    ///
    /// # Errors
    ///
    /// Fails if any member's dimension differs from `other`.
    pub fn subtract(&self, other: &Entity) -> Result<Self> {
        self.lift("-", other, Entity::subtract)
    }

    /// Make every member orthogonal to `axis`.
    ///
    /// # Errors
    ///
    /// Fails on a dimension mismatch or if `axis` is the zero vector.
    pub fn orthogonalize(&self, axis: &Entity) -> Result<Self> {
        self.lift("|", axis, Entity::orthogonalize)
    }

    /// Replace every member by its component along `axis`.
    ///
    /// # Errors
    ///
    /// Fails on a dimension mismatch or if `axis` is the zero vector.
    pub fn project_onto(&self, axis: &Entity) -> Result<Self> {
        self.lift(">>", axis, Entity::project_onto)
    }

    /// Scalar projection of every member onto `axis`, in iteration order.
    ///
    /// The axis may be a key of this set or any entity.
    ///
    /// # Errors
    ///
    /// Fails if a named axis is missing, on a dimension mismatch, or if the axis is
    /// the zero vector.
    pub fn compare_against<'q>(&self, axis: impl Into<Query<'q>>) -> Result<Vec<f32>> {
        let axis = self.resolve(axis.into())?;
        self.iter().map(|entity| entity.compare_against(axis)).collect()
    }

    /// Project every member onto two axes, giving plotting coordinates.
    ///
    /// # Errors
    ///
    /// Same as [`EmbeddingSet::compare_against`] for either axis.
    pub fn to_axis_points<'x, 'y>(
        &self,
        x_axis: impl Into<Query<'x>>,
        y_axis: impl Into<Query<'y>>,
    ) -> Result<Vec<AxisPoint>> {
        let xs = self.compare_against(x_axis)?;
        let ys = self.compare_against(y_axis)?;
        Ok(self
            .iter()
            .zip(xs.into_iter().zip(ys))
            .map(|(entity, (x, y))| AxisPoint {
                x,
                y,
                name: entity.name().to_owned(),
                origin: entity.origin().to_owned(),
            })
            .collect())
    }
}
