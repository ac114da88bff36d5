//! Defaults for scoring and comparison.

use embedset_vector::DistanceMetric;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name given to a set constructed without one.
pub const DEFAULT_SET_NAME: &str = "Emb";

/// Configuration for similarity scoring.
///
/// # Example
///
/// ```
/// use embedset::config::SimilarityConfig;
/// use embedset::DistanceMetric;
///
/// let config = SimilarityConfig::top(3).with_metric_name("euclidean").unwrap();
/// assert_eq!(config.n, 3);
/// assert_eq!(config.metric, DistanceMetric::Euclidean);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Number of results to return. Must not exceed the set size.
    pub n: usize,
    /// Metric used to rank members against the query.
    pub metric: DistanceMetric,
}

impl SimilarityConfig {
    /// Return the `n` closest members under cosine distance.
    #[must_use]
    pub const fn top(n: usize) -> Self {
        Self { n, metric: DistanceMetric::Cosine }
    }

    /// Set the distance metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the distance metric by identifier.
    ///
    /// # Errors
    ///
    /// Fails if `name` is not a known metric identifier.
    pub fn with_metric_name(self, name: &str) -> Result<Self> {
        Ok(self.with_metric(name.parse()?))
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self::top(10)
    }
}

/// Configuration for comparing two snapshots of the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Metric used to measure how far each shared member moved.
    pub metric: DistanceMetric,
}

impl MovementConfig {
    /// Create a movement configuration with the given metric.
    #[must_use]
    pub const fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self::new(DistanceMetric::Euclidean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SimilarityConfig::default();
        assert_eq!(config.n, 10);
        assert_eq!(config.metric, DistanceMetric::Cosine);
        assert_eq!(MovementConfig::default().metric, DistanceMetric::Euclidean);
    }

    #[test]
    fn unknown_metric_name_is_rejected() {
        assert!(SimilarityConfig::top(2).with_metric_name("jaccard").is_err());
    }

    #[test]
    fn deserialize_partial_config() {
        let config: SimilarityConfig = serde_json::from_str(r#"{"n": 3}"#).unwrap();
        assert_eq!(config, SimilarityConfig::top(3));

        let config: SimilarityConfig =
            serde_json::from_str(r#"{"n": 2, "metric": "manhattan"}"#).unwrap();
        assert_eq!(config.metric, DistanceMetric::Manhattan);
    }
}
