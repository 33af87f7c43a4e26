//! attack_surface library: passive attack-surface reconnaissance
//!
//! This library discovers the subdomains of a target domain from public
//! intelligence sources (certificate transparency, passive DNS, host search),
//! resolves each one through redundant DNS-over-HTTPS providers, identifies
//! third-party services and hosting vendors, and flags dangling CNAMEs that
//! could allow a subdomain takeover. Nothing is sent to the target itself.
//!
//! # Example
//!
//! ```no_run
//! use attack_surface::{Config, run_analysis};
//! use tokio;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     rate_limit_max_requests: 20,
//!     ..Default::default()
//! };
//!
//! let report = run_analysis(config).await?;
//! println!("Analyzed {} subdomains ({} historical)",
//!          report.subdomains.len(), report.historical.len());
//! # Ok(())
//! # }
//! ```
//!
//! Callers that want live events subscribe an observer to an [`Analyzer`]
//! before starting the run:
//!
//! ```no_run
//! use std::sync::Arc;
//! use attack_surface::{Analyzer, ChannelObserver, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::new(&Config::default()).await?;
//! let (observer, mut events) = ChannelObserver::channel();
//! analyzer.subscribe(Arc::new(observer));
//!
//! tokio::spawn(async move {
//!     while let Some(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//! });
//! let report = analyzer.start_analysis("example.com").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod events;
pub mod fingerprint;
pub mod geoip;
pub mod initialization;
pub mod intelligence;
pub mod pipeline;
pub mod rate_limiter;
mod run;
pub mod security;
pub mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{AnalysisStats, InitializationError, StatsSnapshot};
pub use events::{AnalysisEvent, AnalysisObserver, ApiStatus, ChannelObserver, EventBus};
pub use pipeline::{HistoricalRecord, Subdomain, SubdomainState};
pub use run::{run_analysis, AnalysisReport, Analyzer, RunContext};
