//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DOH_PROVIDERS, DEFAULT_USER_AGENT, HTTP_TIMEOUT_SECS, RATE_LIMIT_MAX_REQUESTS,
    RATE_LIMIT_WINDOW_MS,
};

/// Verbosity of the crate's own log output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log line format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Colored, one human-readable line per event
    Plain,
    /// One JSON object per line
    Json,
}

/// Analysis configuration.
///
/// Used both by the CLI (via `clap`) and programmatically by library callers.
///
/// # Examples
///
/// ```no_run
/// use attack_surface::Config;
///
/// let config = Config {
///     domain: "example.com".to_string(),
///     rate_limit_max_requests: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "attack_surface", version, about)]
pub struct Config {
    /// Target domain to analyze
    pub domain: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Maximum DNS queries per sliding window
    #[arg(long, default_value_t = RATE_LIMIT_MAX_REQUESTS)]
    pub rate_limit_max_requests: usize,

    /// Sliding window length in milliseconds
    #[arg(long, default_value_t = RATE_LIMIT_WINDOW_MS)]
    pub rate_limit_window_ms: u64,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// DNS-over-HTTPS endpoints in priority order (repeatable)
    #[arg(long = "doh-provider", default_values_t = DEFAULT_DOH_PROVIDERS.iter().map(|s| s.to_string()))]
    pub doh_providers: Vec<String>,

    /// JSON file with additional service/infrastructure rules
    #[arg(long)]
    pub rules_file: Option<PathBuf>,
}

impl Config {
    /// Sliding window as a `Duration`.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_millis(self.rate_limit_window_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            rate_limit_max_requests: RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window_ms: RATE_LIMIT_WINDOW_MS,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            doh_providers: DEFAULT_DOH_PROVIDERS.iter().map(|s| s.to_string()).collect(),
            rules_file: None,
        }
    }
}
