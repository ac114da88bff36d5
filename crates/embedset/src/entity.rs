//! The [`Entity`] type: one named vector with properties and algebra history.
//!
//! # Example
//!
//! ```
//! use embedset::Entity;
//!
//! let king = Entity::new("king", vec![0.9, 0.8]).unwrap();
//! let man = Entity::new("man", vec![0.7, 0.1]).unwrap();
//!
//! let royal = king.subtract(&man).unwrap();
//! assert_eq!(royal.name(), "(king - man)");
//! assert_eq!(royal.origin(), "king");
//! ```

use std::collections::HashMap;

use embedset_vector::{DistanceMetric, Embedding};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

/// A named, fixed-dimension vector with optional scalar annotations.
///
/// Entities are immutable values: algebra operators and [`Entity::add_property`]
/// return new entities. Algebra results start with an empty property map and
/// inherit the left operand's [`origin`](Entity::origin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    origin: String,
    vector: Embedding,
    #[serde(default)]
    properties: HashMap<String, Value>,
}

impl Entity {
    /// Create an entity from a raw vector. The origin is the name itself.
    ///
    /// # Errors
    ///
    /// Fails if the vector is empty or contains non-finite values.
    pub fn new(name: impl Into<String>, vector: Vec<f32>) -> Result<Self> {
        Ok(Self::from_embedding(name, Embedding::new(vector)?))
    }

    /// Create an entity from an already validated embedding.
    #[must_use]
    pub fn from_embedding(name: impl Into<String>, vector: Embedding) -> Self {
        let name = name.into();
        Self { origin: name.clone(), name, vector, properties: HashMap::new() }
    }

    /// Replace the origin token.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Set a property on this entity.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The display and lookup name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lookup token this entity was derived from before any algebra.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The vector.
    #[inline]
    #[must_use]
    pub fn vector(&self) -> &Embedding {
        &self.vector
    }

    /// Dimension of the vector.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.vector.dimension()
    }

    /// All properties.
    #[must_use]
    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.properties
    }

    /// Look up a property; `None` when the entity does not carry it.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// A copy of this entity with `key` set to `f(self)`.
    ///
    /// Existing properties are kept; an existing `key` is overwritten.
    #[must_use]
    pub fn add_property<F, V>(&self, key: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(&Self) -> V,
        V: Into<Value>,
    {
        let value = f(self).into();
        self.clone().with_property(key, value)
    }

    fn derive(&self, op: &str, other: &Self, vector: Embedding) -> Self {
        Self {
            name: format!("({} {op} {})", self.name, other.name),
            origin: self.origin.clone(),
            vector,
            properties: HashMap::new(),
        }
    }

    /// Vector sum, named `"(a + b)"`.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions differ.
    pub fn add(&self, other: &Self) -> Result<Self> {
        Ok(self.derive("+", other, self.vector.add(&other.vector)?))
    }

    /// Vector difference, named `"(a - b)"`.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions differ.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        Ok(self.derive("-", other, self.vector.subtract(&other.vector)?))
    }

    /// This vector minus its projection onto `axis`, named `"(a | b)"`.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions differ or `axis` is the zero vector.
    pub fn orthogonalize(&self, axis: &Self) -> Result<Self> {
        Ok(self.derive("|", axis, self.vector.orthogonalize(&axis.vector)?))
    }

    /// The component of this vector along `axis`, named `"(a >> b)"`.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions differ or `axis` is the zero vector.
    pub fn project_onto(&self, axis: &Self) -> Result<Self> {
        Ok(self.derive(">>", axis, self.vector.project_onto(&axis.vector)?))
    }

    /// Signed length of the projection onto `axis`: `(a·axis) / ‖axis‖`.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions differ, `axis` is the zero vector, or the length
    /// does not fit in an `f32`.
    pub fn compare_against(&self, axis: &Self) -> Result<f32> {
        Ok(self.vector.scalar_projection(&axis.vector)?)
    }

    /// Distance to another entity under `metric`.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions differ or the distance does not fit in an `f32`.
    pub fn distance(&self, other: &Self, metric: DistanceMetric) -> Result<f32> {
        Ok(metric.distance(&self.vector, &other.vector)?)
    }
}

#[cfg(test)]
mod tests {
    use embedset_vector::VectorError;

    use super::*;
    use crate::error::Error;

    const EPSILON: f32 = 1e-5;

    fn entity(name: &str, v: &[f32]) -> Entity {
        Entity::new(name, v.to_vec()).unwrap()
    }

    fn assert_vec_near(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPSILON, "{actual:?} !~ {expected:?}");
        }
    }

    #[test]
    fn new_sets_origin_to_name() {
        let foo = entity("foo", &[0.1, 0.3]);
        assert_eq!(foo.name(), "foo");
        assert_eq!(foo.origin(), "foo");
        assert_eq!(foo.dimension(), 2);
    }

    #[test]
    fn algebra_names_and_origin() {
        let a = entity("a", &[1.0, 2.0]);
        let b = entity("b", &[3.0, 1.0]);

        assert_eq!(a.add(&b).unwrap().name(), "(a + b)");
        assert_eq!(a.subtract(&b).unwrap().name(), "(a - b)");
        assert_eq!(a.orthogonalize(&b).unwrap().name(), "(a | b)");
        assert_eq!(a.project_onto(&b).unwrap().name(), "(a >> b)");

        let nested = a.subtract(&b).unwrap().add(&b).unwrap();
        assert_eq!(nested.name(), "((a - b) + b)");
        assert_eq!(nested.origin(), "a");
        assert_vec_near(nested.vector(), &[1.0, 2.0]);
    }

    #[test]
    fn algebra_drops_properties() {
        let a = entity("a", &[1.0, 2.0]).with_property("group", "one");
        let b = entity("b", &[3.0, 1.0]);
        assert!(a.add(&b).unwrap().properties().is_empty());
        assert!(a.project_onto(&b).unwrap().property("group").is_none());
    }

    #[test]
    fn orthogonal_plus_projection_is_identity() {
        let a = entity("a", &[0.3, -1.2, 2.5]);
        let b = entity("b", &[1.0, 0.5, -0.25]);

        let ortho = a.orthogonalize(&b).unwrap();
        let proj = a.project_onto(&b).unwrap();

        assert_vec_near(ortho.add(&proj).unwrap().vector(), a.vector());
        assert!(ortho.compare_against(&b).unwrap().abs() < EPSILON);
    }

    #[test]
    fn compare_against_self_is_norm() {
        let a = entity("a", &[3.0, 4.0]);
        assert!((a.compare_against(&a).unwrap() - 5.0).abs() < EPSILON);

        let x = entity("x", &[0.0, 2.0]);
        let y = entity("y", &[5.0, 0.0]);
        assert!(x.compare_against(&y).unwrap().abs() < EPSILON);
    }

    #[test]
    fn extreme_magnitudes() {
        let big = entity("big", &[1e20, 0.0]);
        let length = big.compare_against(&big).unwrap();
        assert!((length / 1e20 - 1.0).abs() < EPSILON, "{length}");

        let a = entity("a", &[1.0, 1.0]);
        let tiny = entity("tiny", &[1e-30, 0.0]);
        assert_vec_near(a.project_onto(&tiny).unwrap().vector(), &[1.0, 0.0]);
        assert_vec_near(a.orthogonalize(&tiny).unwrap().vector(), &[0.0, 1.0]);
    }

    #[test]
    fn zero_axis_fails() {
        let a = entity("a", &[1.0, 1.0]);
        let zero = entity("zero", &[0.0, 0.0]);
        assert_eq!(a.orthogonalize(&zero).unwrap_err(), Error::Vector(VectorError::ZeroVector));
        assert_eq!(a.project_onto(&zero).unwrap_err(), Error::Vector(VectorError::ZeroVector));
        assert_eq!(a.compare_against(&zero).unwrap_err(), Error::Vector(VectorError::ZeroVector));
    }

    #[test]
    fn dimension_mismatch_fails() {
        let a = entity("a", &[1.0, 1.0]);
        let b = entity("b", &[1.0, 1.0, 1.0]);
        assert!(a.add(&b).unwrap_err().is_dimension_error());
        assert!(a.distance(&b, DistanceMetric::Cosine).unwrap_err().is_dimension_error());
    }

    #[test]
    fn add_property_keeps_existing() {
        let a = entity("a", &[1.0, 1.0]).with_property("cluster", 2i64);
        let labelled = a.add_property("len", |e| e.name().len());

        assert_eq!(labelled.property("cluster"), Some(&Value::Int(2)));
        assert_eq!(labelled.property("len"), Some(&Value::Int(1)));
        assert!(a.property("len").is_none());
        assert_eq!(labelled.vector(), a.vector());
    }
}
