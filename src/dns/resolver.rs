//! Multi-provider DNS-over-HTTPS resolution.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::ACCEPT;

use crate::config::DNS_JSON_CONTENT_TYPE;
use crate::error_handling::{AnalysisStats, ProviderError, StatKind};
use crate::rate_limiter::RateLimiter;

use super::provider::DohEndpoint;
use super::records::{DohResponse, RecordType, ResolvedRecord};

/// Outcome of a resolution attempt across providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A provider returned at least one record.
    Answered(Vec<ResolvedRecord>),
    /// At least one provider answered successfully, with no records.
    Empty,
    /// Every consulted provider errored (or none was configured).
    Failed,
}

impl Resolution {
    pub fn into_records(self) -> Option<Vec<ResolvedRecord>> {
        match self {
            Resolution::Answered(records) => Some(records),
            Resolution::Empty | Resolution::Failed => None,
        }
    }
}

/// Resolves names through an ordered list of DoH providers.
///
/// Every query is throttled by the shared [`RateLimiter`] and counted in the
/// run's [`AnalysisStats`]. Providers are tried in order; the first non-empty
/// answer wins. A failing provider is skipped, never retried.
pub struct DnsResolver {
    client: Arc<reqwest::Client>,
    endpoints: Vec<DohEndpoint>,
    limiter: Arc<RateLimiter>,
    stats: Arc<AnalysisStats>,
}

impl DnsResolver {
    pub fn new(
        client: Arc<reqwest::Client>,
        endpoints: Vec<DohEndpoint>,
        limiter: Arc<RateLimiter>,
        stats: Arc<AnalysisStats>,
    ) -> Self {
        DnsResolver {
            client,
            endpoints,
            limiter,
            stats,
        }
    }

    /// Resolves `domain`, returning the records or `None` if nothing was found.
    ///
    /// With `server`, only that endpoint is consulted. An omitted
    /// `record_type` leaves the type to the provider (typically A plus any
    /// CNAME chain).
    pub async fn query(
        &self,
        domain: &str,
        record_type: Option<RecordType>,
        server: Option<&str>,
    ) -> Option<Vec<ResolvedRecord>> {
        self.resolve(domain, record_type, server)
            .await
            .into_records()
    }

    /// Like [`query`](Self::query) but keeps "no records" apart from "no
    /// provider could answer".
    pub async fn resolve(
        &self,
        domain: &str,
        record_type: Option<RecordType>,
        server: Option<&str>,
    ) -> Resolution {
        self.limiter.throttle().await;
        self.stats.increment(StatKind::DnsQueries);

        let type_label = record_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "any".to_string());
        debug!("Querying DNS for {domain} ({type_label})");

        let pinned;
        let endpoints: &[DohEndpoint] = match server {
            Some(server) => match DohEndpoint::parse(server) {
                Ok(endpoint) => {
                    pinned = [endpoint];
                    &pinned
                }
                Err(e) => {
                    warn!("Ignoring DNS query for {domain}: {e}");
                    return Resolution::Failed;
                }
            },
            None => &self.endpoints,
        };

        let mut answered_empty = false;
        for endpoint in endpoints {
            match self.query_endpoint(endpoint, domain, record_type).await {
                Ok(records) if !records.is_empty() => {
                    debug!(
                        "DoH provider {} returned {} records for {domain}",
                        endpoint.as_str(),
                        records.len()
                    );
                    return Resolution::Answered(records);
                }
                Ok(_) => {
                    debug!(
                        "DoH provider {} returned no records for {domain} ({type_label})",
                        endpoint.as_str()
                    );
                    answered_empty = true;
                }
                Err(e) => {
                    warn!(
                        "DoH provider {} failed for {domain} ({type_label}): {e}",
                        endpoint.as_str()
                    );
                }
            }
        }

        if answered_empty {
            Resolution::Empty
        } else {
            Resolution::Failed
        }
    }

    async fn query_endpoint(
        &self,
        endpoint: &DohEndpoint,
        domain: &str,
        record_type: Option<RecordType>,
    ) -> Result<Vec<ResolvedRecord>, ProviderError> {
        let response = self
            .client
            .get(endpoint.request_url(domain, record_type))
            .header(ACCEPT, DNS_JSON_CONTENT_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::status(status));
        }

        let body = response.text().await?;
        let parsed: DohResponse = serde_json::from_str(&body)?;
        if !parsed.is_definitive() {
            return Err(ProviderError::Rcode(parsed.status));
        }
        Ok(parsed.into_records())
    }
}
