//! Freshness policy.

use crate::types::{ContentMetadata, ServiceParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreshnessConfig {
    pub cache_duration_hours: f64,
    pub min_confidence_for_regen: f64,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            cache_duration_hours: 24.0,
            min_confidence_for_regen: 0.6,
        }
    }
}

impl FreshnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_cache_duration_hours(mut self, hours: f64) -> Self {
        self.cache_duration_hours = hours;
        self
    }
    pub fn with_min_confidence(mut self, min: f64) -> Self {
        self.min_confidence_for_regen = min;
        self
    }
}

/// Regenerate-or-serve decision over cached metadata. Holds only the two
/// thresholds; every method is side-effect free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreshnessPolicy {
    config: FreshnessConfig,
}

impl FreshnessPolicy {
    pub fn new(config: FreshnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FreshnessConfig {
        &self.config
    }

    /// Decide against the current wall clock.
    pub fn should_regenerate(
        &self,
        metadata: Option<&ContentMetadata>,
        client_confidence: Option<f64>,
    ) -> bool {
        self.should_regenerate_at(metadata, client_confidence, Utc::now())
    }

    pub fn should_regenerate_at(
        &self,
        metadata: Option<&ContentMetadata>,
        client_confidence: Option<f64>,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(meta) = metadata else {
            return true;
        };
        self.is_stale(meta, now) || self.is_low_confidence(meta.confidence_score, client_confidence)
    }

    fn is_stale(&self, meta: &ContentMetadata, now: DateTime<Utc>) -> bool {
        meta.age_hours(now) > self.config.cache_duration_hours
    }

    // Client confidence replaces the stored score outright.
    fn is_low_confidence(&self, stored: f64, client: Option<f64>) -> bool {
        client.unwrap_or(stored) < self.config.min_confidence_for_regen
    }

    /// Metadata for freshly generated content, stamped now.
    pub fn new_metadata(params: &ServiceParams, confidence: f64) -> ContentMetadata {
        Self::new_metadata_at(params, confidence, Utc::now())
    }

    pub fn new_metadata_at(
        params: &ServiceParams,
        confidence: f64,
        generated_at: DateTime<Utc>,
    ) -> ContentMetadata {
        ContentMetadata {
            generated_at,
            confidence_score: confidence.clamp(0.0, 1.0),
            topic_id: params.topic_id.clone(),
            level: params.level.clone(),
            title: params.title.clone(),
            description: params.description.clone(),
        }
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(FreshnessConfig::default())
    }
}
