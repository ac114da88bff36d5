//! Hook for external set-to-set transformations.

use crate::collection::EmbeddingSet;
use crate::error::Result;

/// Maps one embedding set to another, e.g. a dimensionality reducer.
///
/// Any closure `Fn(&EmbeddingSet) -> Result<EmbeddingSet>` is a transformer.
pub trait Transformer {
    /// Produce the transformed set.
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn transform(&self, set: &EmbeddingSet) -> Result<EmbeddingSet>;
}

impl<F> Transformer for F
where
    F: Fn(&EmbeddingSet) -> Result<EmbeddingSet>,
{
    fn transform(&self, set: &EmbeddingSet) -> Result<EmbeddingSet> {
        self(set)
    }
}
