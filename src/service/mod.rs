//! 内容服务模块：缓存新鲜度判断、生成、持久化与过期回退的编排。
//!
//! # Content Service
//!
//! One generic orchestrator, instantiated once per content kind:
//!
//! ```text
//! lookup ──► fresh? ──yes──► serve cached
//!               │
//!               no
//!               ▼
//!           generate ──ok──► parse ──ok──► persist ──► serve new
//!               │                  │
//!               └──── failed ──────┘
//!                       │
//!             cached? ──yes──► serve cached + warning
//!                       │
//!                       no ──► error
//! ```
//!
//! Store failures never take the fallback path; they propagate as
//! [`Error::Store`](crate::Error::Store).

mod content;

pub use content::ContentService;

use crate::processors::{ExerciseParser, QuizParser, StudyParser};

pub type QuizService = ContentService<QuizParser>;
pub type ExerciseService = ContentService<ExerciseParser>;
pub type StudyService = ContentService<StudyParser>;
