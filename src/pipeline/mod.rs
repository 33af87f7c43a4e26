//! Per-subdomain processing.
//!
//! Each discovered name is claimed once per run, resolved, classified and
//! finally reported as redirected, historical or analyzed.

mod process;
mod types;

// Re-export public API
pub use process::process_discovery;
pub use types::{HistoricalRecord, HistoricalStatus, Subdomain, SubdomainState};
