//! Logger initialization.

use std::io::Write;

use chrono::{SecondsFormat, Utc};
use colored::*;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

// Dependencies that log every request at debug level.
const NOISY_MODULES: &[&str] = &["reqwest", "hyper", "hyper_util", "h2"];

/// Installs the global logger.
///
/// `RUST_LOG` is read first and `level` is applied on top, so per-module
/// directives still work while `--log-level` decides the crate's own level.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a global logger is already
/// installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=attack_surface::dns=debug attack_surface example.com --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for module in NOISY_MODULES {
        builder.filter_module(module, LevelFilter::Info.min(level));
    }
    builder.filter_module("attack_surface", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| writeln!(buf, "{}", json_line(record)));
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                writeln!(
                    buf,
                    "{} {} {} [{}] {}",
                    level_marker(level),
                    Utc::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    short_target(record.target()).cyan(),
                    colored_level(level),
                    record.args()
                )
            });
        }
    }

    builder.try_init()?;
    Ok(())
}

/// One JSON object per line: `ts` (RFC 3339, UTC), `level`, `target`, `msg`.
fn json_line(record: &Record<'_>) -> String {
    serde_json::json!({
        "ts": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    })
    .to_string()
}

fn short_target(target: &str) -> &str {
    target.strip_prefix("attack_surface::").unwrap_or(target)
}

fn colored_level(level: Level) -> ColoredString {
    let label = level.as_str();
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

fn level_marker(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "🛰️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}
