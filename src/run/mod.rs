//! Analysis runs.
//!
//! This module provides:
//! - [`Analyzer`], the lifecycle surface (start, reset, stats, history)
//! - [`RunContext`], the state owned by a single run
//! - [`run_analysis`], a one-shot entry point driven by [`Config`]

mod analyzer;
mod context;

use anyhow::{Context, Result};

use crate::config::Config;

// Re-export public API
pub use analyzer::{AnalysisReport, Analyzer};
pub use context::RunContext;

/// Runs a single analysis of `config.domain`.
///
/// # Errors
///
/// Returns an error if initialization fails (HTTP client, DoH endpoints,
/// rules file) or the domain is invalid.
///
/// # Example
///
/// ```no_run
/// use attack_surface::{run_analysis, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     domain: "example.com".to_string(),
///     ..Default::default()
/// };
/// let report = run_analysis(config).await?;
/// println!("{} subdomains analyzed", report.subdomains.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_analysis(config: Config) -> Result<AnalysisReport> {
    let analyzer = Analyzer::new(&config)
        .await
        .context("Failed to initialize analyzer")?;
    let report = analyzer
        .start_analysis(&config.domain)
        .await
        .with_context(|| format!("Failed to analyze {}", config.domain))?;
    Ok(report)
}
