//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
///
/// These are the only errors that can abort an analysis run; everything
/// downstream degrades to "fewer results" instead.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The target domain is empty or not a plausible hostname.
    #[error("Invalid target domain: {0:?}")]
    InvalidDomainError(String),

    /// A DoH provider endpoint could not be parsed as a URL.
    #[error("Invalid DoH provider endpoint {endpoint:?}: {source}")]
    ProviderEndpointError {
        /// The endpoint string as configured
        endpoint: String,
        /// The URL parse failure
        source: url::ParseError,
    },

    /// The external rules file could not be read or parsed.
    #[error("Rules file error: {0}")]
    RulesFileError(String),
}

/// Failure talking to an external provider (DoH resolver, intelligence source, ASN API).
///
/// Provider errors are always handled locally: logged, reported to observers
/// where relevant, and followed by a fallback to the next provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),

    /// The provider answered with a non-2xx status.
    #[error("Service unavailable ({status})")]
    Status {
        /// HTTP status code returned by the provider
        status: u16,
    },

    /// The provider answered with a body we could not interpret.
    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A DNS provider answered with an rcode other than NOERROR or NXDOMAIN.
    #[error("DNS response code {0}")]
    Rcode(u32),

    /// The response parsed but carried no usable data.
    #[error("Unusable response: {0}")]
    Unusable(String),
}

impl ProviderError {
    /// Builds a `Status` error from an HTTP status code.
    pub fn status(status: reqwest::StatusCode) -> Self {
        ProviderError::Status {
            status: status.as_u16(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_status_message() {
        let err = ProviderError::status(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "Service unavailable (503)");
    }

    #[test]
    fn test_provider_error_parse_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ProviderError = serde_err.into();
        assert!(err.to_string().starts_with("Malformed response:"));
    }

    #[test]
    fn test_invalid_domain_message() {
        let err = InitializationError::InvalidDomainError("bad domain".to_string());
        assert_eq!(err.to_string(), "Invalid target domain: \"bad domain\"");
    }
}
