//! Orchestrator outcome counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// How one get-or-create call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Served from the store without generating.
    FreshHit,
    /// Generated and persisted new content.
    Regenerated,
    /// Generation failed; cached content served with a warning.
    StaleFallback,
    /// Generation failed with nothing to fall back on, or the store failed.
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentStats {
    pub fresh_hits: u64,
    pub misses: u64,
    pub regenerations: u64,
    pub stale_fallbacks: u64,
    pub failures: u64,
}

impl ContentStats {
    /// Share of lookups answered from the store without generating.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.fresh_hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.fresh_hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
pub struct StatsRecorder {
    fresh_hits: AtomicU64,
    misses: AtomicU64,
    regenerations: AtomicU64,
    stale_fallbacks: AtomicU64,
    failures: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lookup that did not produce a servable document (absent, stale or low confidence).
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::FreshHit => &self.fresh_hits,
            Outcome::Regenerated => &self.regenerations,
            Outcome::StaleFallback => &self.stale_fallbacks,
            Outcome::Failed => &self.failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ContentStats {
        ContentStats {
            fresh_hits: self.fresh_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            regenerations: self.regenerations.load(Ordering::Relaxed),
            stale_fallbacks: self.stale_fallbacks.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_counts_only_lookups() {
        let rec = StatsRecorder::new();
        assert_eq!(rec.snapshot().hit_ratio(), 0.0);

        rec.record(Outcome::FreshHit);
        rec.record(Outcome::FreshHit);
        rec.record(Outcome::FreshHit);
        rec.record_miss();
        rec.record(Outcome::StaleFallback);

        let s = rec.snapshot();
        assert_eq!(s.fresh_hits, 3);
        assert_eq!(s.stale_fallbacks, 1);
        assert!((s.hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
