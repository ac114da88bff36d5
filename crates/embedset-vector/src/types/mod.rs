//! Core types for vector data.
//!
//! - [`Embedding`] - A validated dense vector embedding with dimension checks

mod embedding;

pub use embedding::Embedding;
