//! Set composition: merge, filter, subset, properties, averaging and movement.

use std::cmp::Ordering;

use embedset_vector::{DistanceMetric, Embedding};
use serde::{Deserialize, Serialize};

use super::EmbeddingSet;
use crate::config::MovementConfig;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::transform::Transformer;
use crate::value::Value;

/// How far one shared key moved between two snapshots of a vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// The key present in both sets.
    pub name: String,
    /// Distance between the two vectors stored under `name`.
    pub distance: f32,
}

impl EmbeddingSet {
    /// Union of two sets. On a shared key the entity from `other` wins and keeps
    /// the slot it had in `self`; keys only in `other` follow in `other`'s order.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let name = format!("{}.merge({})", self.name(), other.name());
        let entries = self
            .entries()
            .chain(other.entries())
            .map(|(key, entity)| (key.to_owned(), entity.clone()));
        let merged = Self::derived(name, entries);
        tracing::debug!(
            left = self.len(),
            right = other.len(),
            merged = merged.len(),
            "merged embedding sets"
        );
        merged
    }

    /// Members for which `predicate` holds, in their original order.
    ///
    /// The result keeps this set's name.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&Entity) -> bool,
    {
        let entries = self
            .entries()
            .filter(|(_, entity)| predicate(entity))
            .map(|(key, entity)| (key.to_owned(), entity.clone()));
        let kept = Self::derived(self.name(), entries);
        tracing::debug!(set = %self.name(), before = self.len(), after = kept.len(), "filtered");
        kept
    }

    /// Exactly the given keys, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for the first key that is not a member.
    pub fn subset<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let entries = names
            .iter()
            .map(|key| {
                let key = key.as_ref();
                Ok((key.to_owned(), self.entity(key)?.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        let keys: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        Ok(Self::derived(format!("{}.subset({})", self.name(), keys.join(",")), entries))
    }

    /// Give every member the property `key = f(entity)`.
    ///
    /// Existing properties are kept, unlike the algebra operators which drop them.
    #[must_use]
    pub fn add_property<F, V>(&self, key: &str, f: F) -> Self
    where
        F: Fn(&Entity) -> V,
        V: Into<Value>,
    {
        let entries = self
            .entries()
            .map(|(name, entity)| (name.to_owned(), entity.add_property(key, &f)));
        Self::derived(self.name(), entries)
    }

    /// The coordinate-wise mean of all members, named `"<set>.average()"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySet`] when there are no members and a dimension
    /// mismatch when they disagree.
    pub fn average(&self) -> Result<Entity> {
        self.average_named(format!("{}.average()", self.name()))
    }

    /// Same as [`EmbeddingSet::average`] under an explicit name.
    ///
    /// # Errors
    ///
    /// Same as [`EmbeddingSet::average`].
    pub fn average_named(&self, name: impl Into<String>) -> Result<Entity> {
        if self.is_empty() {
            tracing::warn!(set = %self.name(), "average of empty embedding set");
            return Err(Error::EmptySet { set: self.name().to_owned() });
        }
        let vectors: Vec<&Embedding> = self.iter().map(Entity::vector).collect();
        Ok(Entity::from_embedding(name, Embedding::mean(&vectors)?))
    }

    /// Per-key distance between this set and `other` over the keys they share,
    /// largest first.
    ///
    /// # Errors
    ///
    /// Fails if a shared key holds vectors of different dimension.
    pub fn movement(&self, other: &Self, metric: DistanceMetric) -> Result<Vec<Movement>> {
        let mut moved = self
            .entries()
            .filter_map(|(key, entity)| other.get(key).map(|then| (key, entity, then)))
            .map(|(key, now, then)| {
                Ok(Movement { name: key.to_owned(), distance: now.distance(then, metric)? })
            })
            .collect::<Result<Vec<_>>>()?;
        moved.sort_by(|a, b| b.distance.partial_cmp(&a.distance).unwrap_or(Ordering::Equal));
        tracing::debug!(
            left = %self.name(),
            right = %other.name(),
            shared = moved.len(),
            %metric,
            "computed movement"
        );
        Ok(moved)
    }

    /// [`EmbeddingSet::movement`] with the metric taken from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`EmbeddingSet::movement`].
    pub fn movement_with(&self, other: &Self, config: &MovementConfig) -> Result<Vec<Movement>> {
        self.movement(other, config.metric)
    }

    /// Hand the whole set to an external transformer such as a dimensionality
    /// reducer.
    ///
    /// # Errors
    ///
    /// Whatever the transformer returns.
    pub fn transform<T: Transformer + ?Sized>(&self, transformer: &T) -> Result<Self> {
        let out = transformer.transform(self)?;
        tracing::debug!(set = %self.name(), result = %out.name(), "transformed");
        Ok(out)
    }

    /// Distances between every pair of members, rows and columns in iteration order.
    ///
    /// # Errors
    ///
    /// Fails on an empty set or on members of differing dimension.
    pub fn distance_matrix(&self, metric: DistanceMetric) -> Result<Vec<Vec<f32>>> {
        Ok(metric.pairwise(&self.to_matrix()?)?)
    }
}
