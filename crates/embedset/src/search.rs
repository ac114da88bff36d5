//! Similarity scoring over an embedding set.
//!
//! A query is either the name of a member or any [`Entity`]. It is resolved once,
//! then every member is scored against it and the `n` closest are returned in
//! ascending distance. Ties keep the set's iteration order.
//!
//! # Example
//!
//! ```
//! use embedset::{DistanceMetric, EmbeddingSet, Entity};
//!
//! let emb = EmbeddingSet::new([
//!     Entity::new("foo", vec![0.1, 0.3]).unwrap(),
//!     Entity::new("bar", vec![0.7, 0.2]).unwrap(),
//!     Entity::new("buz", vec![0.1, 0.9]).unwrap(),
//! ]);
//!
//! let hits = emb.score_similar("foo", 2, DistanceMetric::Cosine).unwrap();
//! assert_eq!(hits.len(), 2);
//! assert_eq!(hits[0].entity.name(), "foo");
//! ```

use std::cmp::Ordering;

use embedset_vector::DistanceMetric;
use serde::{Deserialize, Serialize};

use crate::collection::EmbeddingSet;
use crate::config::SimilarityConfig;
use crate::entity::Entity;
use crate::error::{Error, Result};

/// What to score a set against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Query<'a> {
    /// A key of the set being searched.
    Name(&'a str),
    /// An entity, which need not belong to the set.
    Entity(&'a Entity),
}

impl Query<'_> {
    /// Label used when naming derived sets.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Entity(entity) => entity.name(),
        }
    }
}

impl<'a> From<&'a str> for Query<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for Query<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a Entity> for Query<'a> {
    fn from(entity: &'a Entity) -> Self {
        Self::Entity(entity)
    }
}

/// A member of a set together with its distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    /// The matched entity.
    pub entity: Entity,
    /// Distance to the query; smaller is closer.
    pub distance: f32,
}

impl EmbeddingSet {
    /// Turn a query into the entity it refers to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if a named query is not a member.
    pub fn resolve<'a>(&'a self, query: Query<'a>) -> Result<&'a Entity> {
        match query {
            Query::Name(name) => self.entity(name),
            Query::Entity(entity) => Ok(entity),
        }
    }

    /// The `n` members closest to `query` under `metric`, nearest first.
    ///
    /// # Errors
    ///
    /// - [`Error::BoundsExceeded`] if `n` is larger than the set
    /// - [`Error::NotFound`] if a named query is not a member
    /// - a dimension mismatch if any member differs in length from the query
    /// - a non-finite error if a distance does not fit in an `f32`
    pub fn score_similar<'q>(
        &self,
        query: impl Into<Query<'q>>,
        n: usize,
        metric: DistanceMetric,
    ) -> Result<Vec<ScoredEntity>> {
        if n > self.len() {
            let len = self.len();
            tracing::warn!(set = %self.name(), n, len, "requested more than the set holds");
            return Err(Error::BoundsExceeded { requested: n, available: self.len() });
        }
        let query = self.resolve(query.into())?;

        let mut scored = self
            .iter()
            .map(|entity| Ok((entity, query.distance(entity, metric)?)))
            .collect::<Result<Vec<_>>>()?;
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        scored.truncate(n);

        tracing::debug!(set = %self.name(), query = %query.name(), n, %metric, "scored similarity");
        Ok(scored
            .into_iter()
            .map(|(entity, distance)| ScoredEntity { entity: entity.clone(), distance })
            .collect())
    }

    /// [`EmbeddingSet::score_similar`] with `n` and the metric taken from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`EmbeddingSet::score_similar`].
    pub fn score_similar_with<'q>(
        &self,
        query: impl Into<Query<'q>>,
        config: &SimilarityConfig,
    ) -> Result<Vec<ScoredEntity>> {
        self.score_similar(query, config.n, config.metric)
    }

    /// The `n` closest members as a new set in ranked order, named
    /// `"<set>.similar(<query>)"`.
    ///
    /// # Errors
    ///
    /// Same as [`EmbeddingSet::score_similar`].
    pub fn embset_similar<'q>(
        &self,
        query: impl Into<Query<'q>>,
        n: usize,
        metric: DistanceMetric,
    ) -> Result<Self> {
        let query = query.into();
        let name = format!("{}.similar({})", self.name(), query.label());
        let hits = self.score_similar(query, n, metric)?;
        Ok(Self::derived(
            name,
            hits.into_iter().map(|hit| (hit.entity.name().to_owned(), hit.entity)),
        ))
    }

    /// [`EmbeddingSet::embset_similar`] with `n` and the metric taken from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`EmbeddingSet::score_similar`].
    pub fn embset_similar_with<'q>(
        &self,
        query: impl Into<Query<'q>>,
        config: &SimilarityConfig,
    ) -> Result<Self> {
        self.embset_similar(query, config.n, config.metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn entity(name: &str, v: &[f32]) -> Entity {
        Entity::new(name, v.to_vec()).unwrap()
    }

    fn foo_bar_buz() -> EmbeddingSet {
        EmbeddingSet::new([
            entity("foo", &[0.1, 0.3]),
            entity("bar", &[0.7, 0.2]),
            entity("buz", &[0.1, 0.9]),
        ])
    }

    #[test]
    fn query_conversions() {
        let foo = entity("foo", &[1.0]);
        let owned = String::from("bar");
        assert_eq!(Query::from("x"), Query::Name("x"));
        assert_eq!(Query::from(&owned).label(), "bar");
        assert_eq!(Query::from(&foo).label(), "foo");
    }

    #[test]
    fn score_similar_by_name() {
        let hits = foo_bar_buz().score_similar("foo", 2, DistanceMetric::Cosine).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity.name(), "foo");
        assert!(hits[0].distance.abs() < EPSILON);
        assert_eq!(hits[1].entity.name(), "buz");
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn score_similar_by_outside_entity() {
        let outside = entity("outside", &[1.0, 0.0]);
        let hits = foo_bar_buz().score_similar(&outside, 3, DistanceMetric::Euclidean).unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.entity.name()).collect();
        assert_eq!(names, ["bar", "foo", "buz"]);
    }

    #[test]
    fn score_similar_all_members_is_allowed() {
        let emb = foo_bar_buz();
        assert_eq!(emb.score_similar("bar", emb.len(), DistanceMetric::Cosine).unwrap().len(), 3);
        assert!(emb.score_similar("bar", 0, DistanceMetric::Cosine).unwrap().is_empty());
    }

    #[test]
    fn score_similar_out_of_bounds() {
        let err = foo_bar_buz().score_similar("foo", 4, DistanceMetric::Cosine).unwrap_err();
        assert_eq!(err, Error::BoundsExceeded { requested: 4, available: 3 });
    }

    #[test]
    fn bounds_are_checked_before_lookup() {
        let err = foo_bar_buz().score_similar("dinosaur", 4, DistanceMetric::Cosine).unwrap_err();
        assert!(matches!(err, Error::BoundsExceeded { .. }));
    }

    #[test]
    fn score_similar_missing_name() {
        let err = foo_bar_buz().score_similar("dinosaur", 1, DistanceMetric::Cosine).unwrap_err();
        assert_eq!(err, Error::NotFound { name: "dinosaur".into(), set: "Emb".into() });
    }

    #[test]
    fn score_similar_dimension_mismatch() {
        let outside = entity("outside", &[1.0, 0.0, 0.0]);
        let err = foo_bar_buz().score_similar(&outside, 1, DistanceMetric::Cosine).unwrap_err();
        assert!(err.is_dimension_error());
    }

    #[test]
    fn huge_vectors_rank_by_direction() {
        let emb = EmbeddingSet::new([
            entity("big", &[1e20, 0.0]),
            entity("other", &[0.0, 1e20]),
            entity("small", &[1.0, 0.0]),
        ]);
        let hits = emb.score_similar("big", 3, DistanceMetric::Cosine).unwrap();

        assert!(hits.iter().all(|h| h.distance.is_finite()));
        let mut nearest: Vec<&str> = hits[..2].iter().map(|h| h.entity.name()).collect();
        nearest.sort_unstable();
        assert_eq!(nearest, ["big", "small"]);
        assert!(hits[0].distance.abs() < EPSILON);
        assert!(hits[1].distance.abs() < EPSILON);
        assert_eq!(hits[2].entity.name(), "other");
        assert!((hits[2].distance - 1.0).abs() < EPSILON);
    }

    #[test]
    fn overflowing_metric_fails_loudly() {
        let emb = EmbeddingSet::new([entity("big", &[1e20, 0.0]), entity("small", &[1.0, 0.0])]);
        let err = emb.score_similar("big", 1, DistanceMetric::DotProduct).unwrap_err();
        assert!(matches!(err, Error::Vector(embedset_vector::VectorError::NonFinite { .. })));
    }

    #[test]
    fn ties_keep_iteration_order() {
        let emb = EmbeddingSet::new([
            entity("c", &[2.0, 0.0]),
            entity("a", &[1.0, 0.0]),
            entity("b", &[3.0, 0.0]),
        ]);
        let hits = emb.score_similar("a", 3, DistanceMetric::Cosine).unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.entity.name()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn embset_similar_builds_ranked_set() {
        let config = SimilarityConfig::top(2);
        let similar = foo_bar_buz().embset_similar_with("foo", &config).unwrap();

        assert_eq!(similar.name(), "Emb.similar(foo)");
        assert_eq!(similar.names().collect::<Vec<_>>(), ["foo", "buz"]);
    }

    #[test]
    fn score_similar_with_config() {
        let config = SimilarityConfig::top(1).with_metric(DistanceMetric::Manhattan);
        let outside = entity("outside", &[0.1, 1.0]);
        let hits = foo_bar_buz().score_similar_with(&outside, &config).unwrap();
        assert_eq!(hits[0].entity.name(), "buz");
        assert!((hits[0].distance - 0.1).abs() < EPSILON);
    }
}
