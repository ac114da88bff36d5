//! Embedding sets: ordered, key-unique collections of entities.
//!
//! An [`EmbeddingSet`] owns its entities in insertion order and indexes them by
//! key. The key is the entity's name at insertion time; lifted algebra keeps the
//! keys while the entity names record the operations applied.
//!
//! Every transformation returns a new set. The submodules group the operators:
//!
//! - `algebra` - one fixed operand broadcast over every member
//! - `compose` - merge, filter, subset, properties, averaging and movement

mod algebra;
mod compose;

pub use algebra::AxisPoint;
pub use compose::Movement;

use std::collections::HashMap;
use std::fmt;

use embedset_vector::VectorError;

use crate::config::DEFAULT_SET_NAME;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::value::Value;

/// An ordered, key-unique collection of [`Entity`] values.
///
/// # Example
///
/// ```
/// use embedset::{EmbeddingSet, Entity};
///
/// let foo = Entity::new("foo", vec![0.1, 0.3]).unwrap();
/// let bar = Entity::new("bar", vec![0.7, 0.2]).unwrap();
/// let emb = EmbeddingSet::new([foo, bar]);
///
/// assert!(emb.contains("foo"));
/// assert!(!emb.contains("dinosaur"));
/// assert_eq!(emb.names().collect::<Vec<_>>(), ["foo", "bar"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingSet {
    name: String,
    entries: Vec<(String, Entity)>,
    index: HashMap<String, usize>,
}

impl EmbeddingSet {
    /// Create a set keyed by each entity's own name.
    ///
    /// A later entity with an already used name replaces the earlier one in place.
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self::from_map(entities.into_iter().map(|e| (e.name().to_owned(), e)))
    }

    /// Create a set from explicit `(key, entity)` pairs.
    ///
    /// Keys need not match entity names. A repeated key keeps its first position and
    /// the last entity given for it.
    pub fn from_map<K>(entries: impl IntoIterator<Item = (K, Entity)>) -> Self
    where
        K: Into<String>,
    {
        Self::derived(DEFAULT_SET_NAME, entries.into_iter().map(|(key, e)| (key.into(), e)))
    }

    /// Builds the result of an operator: fresh entries under a composed name.
    pub(crate) fn derived(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (String, Entity)>,
    ) -> Self {
        let mut set = Self { name: name.into(), entries: Vec::new(), index: HashMap::new() };
        for (key, entity) in entries {
            set.insert(key, entity);
        }
        set
    }

    fn insert(&mut self, key: String, entity: Entity) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = entity;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, entity));
        }
    }

    /// Rename the set.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The provenance label of this set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is a member.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Look up a member; `None` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Look up a member.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] naming the missing key.
    pub fn entity(&self, key: &str) -> Result<&Entity> {
        self.get(key).ok_or_else(|| {
            tracing::warn!(set = %self.name, key, "lookup of missing embedding");
            Error::NotFound { name: key.to_owned(), set: self.name.clone() }
        })
    }

    /// Iterate over members in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.entries.iter() }
    }

    /// Iterate over keys in insertion order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over `(key, entity)` pairs in insertion order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&str, &Entity)> + '_ {
        self.entries.iter().map(|(key, entity)| (key.as_str(), entity))
    }

    /// The common vector dimension of all members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySet`] for an empty set and a dimension mismatch if the
    /// members disagree.
    pub fn dimension(&self) -> Result<usize> {
        let mut members = self.iter();
        let first = members.next().ok_or_else(|| Error::EmptySet { set: self.name.clone() })?;
        let expected = first.dimension();
        for entity in members {
            if entity.dimension() != expected {
                return Err(VectorError::DimensionMismatch {
                    expected,
                    actual: entity.dimension(),
                }
                .into());
            }
        }
        Ok(expected)
    }

    /// Every member's vector as one row of a matrix, in insertion order.
    ///
    /// # Errors
    ///
    /// Fails on an empty set or on members of differing dimension.
    pub fn to_matrix(&self) -> Result<Vec<Vec<f32>>> {
        self.dimension()?;
        Ok(self.iter().map(|e| e.vector().to_vec()).collect())
    }

    /// Alias of [`EmbeddingSet::to_matrix`] in the `X` naming of model-fitting code.
    ///
    /// # Errors
    ///
    /// Same as [`EmbeddingSet::to_matrix`].
    pub fn to_x(&self) -> Result<Vec<Vec<f32>>> {
        self.to_matrix()
    }

    /// The matrix together with the `label` property of every member.
    ///
    /// # Errors
    ///
    /// Fails like [`EmbeddingSet::to_matrix`], or with [`Error::PropertyMissing`] for
    /// the first member without `label`.
    pub fn to_x_y(&self, label: &str) -> Result<(Vec<Vec<f32>>, Vec<Value>)> {
        let x = self.to_matrix()?;
        let y = self
            .iter()
            .map(|e| {
                e.property(label).cloned().ok_or_else(|| Error::PropertyMissing {
                    entity: e.name().to_owned(),
                    property: label.to_owned(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((x, y))
    }
}

impl fmt::Display for EmbeddingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromIterator<Entity> for EmbeddingSet {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a EmbeddingSet {
    type Item = &'a Entity;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of an [`EmbeddingSet`] in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, Entity)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entity;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, entity)| entity)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn entity(name: &str, v: &[f32]) -> Entity {
        Entity::new(name, v.to_vec()).unwrap()
    }

    pub(super) fn foo_bar_buz() -> EmbeddingSet {
        EmbeddingSet::new([
            entity("foo", &[0.1, 0.3]),
            entity("bar", &[0.7, 0.2]),
            entity("buz", &[0.1, 0.9]),
        ])
    }

    #[test]
    fn construct_from_entities() {
        let emb = foo_bar_buz();
        assert_eq!(emb.name(), DEFAULT_SET_NAME);
        assert_eq!(emb.len(), 3);
        assert_eq!(emb.names().collect::<Vec<_>>(), ["foo", "bar", "buz"]);
        assert_eq!(emb.to_string(), "Emb");
    }

    #[test]
    fn construct_from_map_with_other_keys() {
        let emb = EmbeddingSet::from_map([
            ("first", entity("foo", &[1.0])),
            ("second", entity("bar", &[2.0])),
        ])
        .with_name("custom");
        assert_eq!(emb.name(), "custom");
        assert_eq!(emb.entity("first").unwrap().name(), "foo");
        assert!(emb.get("foo").is_none());
    }

    #[test]
    fn later_duplicate_wins_in_place() {
        let emb = EmbeddingSet::new([
            entity("foo", &[1.0]),
            entity("bar", &[2.0]),
            entity("foo", &[3.0]),
        ]);
        assert_eq!(emb.len(), 2);
        assert_eq!(emb.names().collect::<Vec<_>>(), ["foo", "bar"]);
        assert_eq!(emb.entity("foo").unwrap().vector().as_slice(), &[3.0]);
    }

    #[test]
    fn missing_lookup_names_key() {
        let err = foo_bar_buz().entity("dinosaur").unwrap_err();
        assert_eq!(err, Error::NotFound { name: "dinosaur".into(), set: "Emb".into() });
    }

    #[test]
    fn iteration_order() {
        let emb = foo_bar_buz();
        let names: Vec<&str> = (&emb).into_iter().map(Entity::name).collect();
        assert_eq!(names, ["foo", "bar", "buz"]);
        let collected: EmbeddingSet = emb.iter().cloned().collect();
        assert_eq!(collected, emb);
    }

    #[test]
    fn to_matrix_rows_follow_order() {
        let x = foo_bar_buz().to_x().unwrap();
        assert_eq!(x, vec![vec![0.1, 0.3], vec![0.7, 0.2], vec![0.1, 0.9]]);
    }

    #[test]
    fn to_matrix_of_empty_set_fails() {
        let empty = EmbeddingSet::new(Vec::<Entity>::new());
        assert_eq!(empty.to_matrix().unwrap_err(), Error::EmptySet { set: "Emb".into() });
    }

    #[test]
    fn ragged_set_fails_when_dimension_is_needed() {
        let ragged = EmbeddingSet::new([entity("a", &[1.0, 0.0]), entity("b", &[1.0])]);
        assert_eq!(ragged.len(), 2);
        assert!(ragged.dimension().unwrap_err().is_dimension_error());
        assert!(ragged.to_matrix().unwrap_err().is_dimension_error());
    }

    #[test]
    fn to_x_y_reads_labels() {
        let emb =
            foo_bar_buz().add_property("label", |e| if e.name() == "bar" { "b" } else { "other" });
        let (x, y) = emb.to_x_y("label").unwrap();
        assert_eq!(x.len(), 3);
        assert_eq!(y, vec![Value::from("other"), Value::from("b"), Value::from("other")]);

        let err = foo_bar_buz().to_x_y("label").unwrap_err();
        assert_eq!(err, Error::PropertyMissing { entity: "foo".into(), property: "label".into() });
    }
}
