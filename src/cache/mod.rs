//! 缓存新鲜度模块：决定提供缓存内容还是重新生成。
//!
//! # Content Freshness Module
//!
//! Decides, per request, whether cached content may be served as-is or must
//! be regenerated, and counts how those decisions play out.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`FreshnessPolicy`] | Pure regenerate-or-serve decision and metadata stamping |
//! | [`FreshnessConfig`] | Cache duration and minimum confidence thresholds |
//! | [`ContentStats`] | Snapshot of orchestrator outcome counters |
//!
//! ## Decision Rules
//!
//! - No cached metadata: regenerate.
//! - Older than `cache_duration_hours` (fractional hours): regenerate.
//! - Confidence below `min_confidence_for_regen`: regenerate. A confidence
//!   sent by the client replaces the stored score for this check.
//!
//! ## Example
//!
//! ```rust
//! use ai_learn_content::cache::{FreshnessConfig, FreshnessPolicy};
//!
//! let policy = FreshnessPolicy::new(FreshnessConfig::default());
//! assert!(policy.should_regenerate(None, None));
//! ```

mod policy;
mod stats;

pub use policy::{FreshnessConfig, FreshnessPolicy};
pub use stats::{ContentStats, Outcome, StatsRecorder};
