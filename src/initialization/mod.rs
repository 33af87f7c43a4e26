//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON output)
//! - HTTP client (timeouts and user agent)
//! - Target domain validation

mod client;
mod logger;

use crate::error_handling::InitializationError;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Normalizes and validates the target domain.
///
/// Lower-cases, trims whitespace and a trailing dot, and rejects anything
/// that is not a dotted hostname made of `[a-z0-9-]` labels.
///
/// # Errors
///
/// Returns `InitializationError::InvalidDomainError` for empty or malformed input.
pub fn normalize_target_domain(raw: &str) -> Result<String, InitializationError> {
    let domain = crate::utils::strip_trailing_dot(raw.trim()).to_ascii_lowercase();

    let valid_labels = domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    if domain.is_empty() || !domain.contains('.') || !valid_labels {
        return Err(InitializationError::InvalidDomainError(raw.to_string()));
    }

    Ok(domain)
}
