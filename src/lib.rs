// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod process;
pub mod sentiment;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate, AggregationResult, CategoryCount, ChartKind, DEFAULT_TOP_N};
pub use crate::api::create_router;
pub use crate::cache::{content_key, ResultCache};
pub use crate::classify::{classify, SentimentLabel};
pub use crate::config::PipelineConfig;
pub use crate::error::PipelineError;
pub use crate::normalize::{clean_all, clean_text};
pub use crate::process::{DatasetProcessor, EnrichedRecord, RawRecord, UNKNOWN_LANGUAGE};
pub use crate::sentiment::{LexiconScorer, PolarityScorer, SentimentScore};
