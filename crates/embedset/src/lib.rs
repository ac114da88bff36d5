//! `embedset`
//!
//! Named embedding collections with vector algebra and exact similarity retrieval.
//!
//! # Overview
//!
//! - **Entities**: [`Entity`], a named vector with properties and an origin token
//! - **Sets**: [`EmbeddingSet`], an ordered, key-unique collection of entities
//! - **Algebra**: add, subtract, orthogonalize and project, on entities and lifted
//!   over whole sets against one fixed operand
//! - **Retrieval**: [`EmbeddingSet::score_similar`] ranks members against a query
//!   under any [`DistanceMetric`]
//! - **Composition**: merge, filter, subset, properties, averaging and movement
//!   between two snapshots of a vocabulary
//!
//! Every operation returns a new value; nothing is mutated in place.
//!
//! # Example
//!
//! ```
//! use embedset::{DistanceMetric, EmbeddingSet, Entity};
//!
//! let emb = EmbeddingSet::new([
//!     Entity::new("king", vec![0.9, 0.8, 0.1]).unwrap(),
//!     Entity::new("queen", vec![0.9, 0.1, 0.8]).unwrap(),
//!     Entity::new("man", vec![0.2, 0.9, 0.0]).unwrap(),
//!     Entity::new("woman", vec![0.2, 0.0, 0.9]).unwrap(),
//! ]);
//!
//! let king = emb.entity("king").unwrap();
//! let man = emb.entity("man").unwrap();
//! let woman = emb.entity("woman").unwrap();
//! let guess = king.subtract(man).unwrap().add(woman).unwrap();
//! assert_eq!(guess.name(), "((king - man) + woman)");
//!
//! let hits = emb.score_similar(&guess, 1, DistanceMetric::Cosine).unwrap();
//! assert_eq!(hits[0].entity.name(), "queen");
//!
//! let centred = emb.subtract(&emb.average().unwrap()).unwrap();
//! assert_eq!(centred.name(), "(Emb - Emb.average())");
//! ```
//!
//! # Modules
//!
//! - [`entity`] - [`Entity`] and its algebra
//! - [`collection`] - [`EmbeddingSet`], lifting and composition
//! - [`search`] - Similarity scoring
//! - [`transform`] - The [`Transformer`] hook
//! - [`config`] - Scoring defaults
//! - [`error`] - Error types

#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod search;
pub mod transform;
pub mod value;

pub use collection::{AxisPoint, EmbeddingSet, Iter, Movement};
pub use config::{MovementConfig, SimilarityConfig};
pub use entity::Entity;
pub use error::{Error, Result};
pub use search::{Query, ScoredEntity};
pub use transform::Transformer;
pub use value::Value;

pub use embedset_vector::{DistanceMetric, Embedding, VectorError};
