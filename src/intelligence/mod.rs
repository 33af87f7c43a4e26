//! Passive subdomain discovery.
//!
//! This module provides:
//! - Intelligence sources (certificate transparency, passive DNS, host search)
//! - Hostname filtering shared by every source
//! - An aggregator that fans out to all sources concurrently and streams
//!   accepted names into the analysis pipeline as they arrive

mod aggregator;
mod filter;
pub mod sources;
mod types;

pub use aggregator::{DiscoveryContext, IntelligenceAggregator};
pub use filter::accept_candidate;
pub use sources::{default_sources, IntelligenceSource};
pub use types::{Candidate, CertificateInfo, Discovery};

#[cfg(test)]
mod tests;
