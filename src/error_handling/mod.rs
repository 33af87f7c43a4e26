//! Error handling and run statistics.
//!
//! This module provides:
//! - Error type definitions (initialization and provider failures)
//! - Run statistics tracking (queries, discoveries, detections)
//!
//! Provider failures never escape the operation that hit them; only
//! initialization errors can abort a run.

mod stats;
mod types;

// Re-export public API
pub use stats::{AnalysisStats, StatKind, StatsSnapshot};
pub use types::{InitializationError, ProviderError};
