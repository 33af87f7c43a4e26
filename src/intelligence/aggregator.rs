//! Concurrent multi-source subdomain discovery.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::{COMMON_PATTERNS_SOURCE, COMMON_SUBDOMAIN_LABELS};
use crate::dns::{DnsResolver, RecordType};
use crate::error_handling::{AnalysisStats, StatKind};
use crate::events::{ApiStatus, EventBus};
use crate::utils::settle_all;

use super::filter::accept_candidate;
use super::sources::IntelligenceSource;
use super::types::Discovery;

/// Shared state each source task reports into.
pub struct DiscoveryContext<'a> {
    pub domain: &'a str,
    pub resolver: &'a DnsResolver,
    pub stats: &'a AnalysisStats,
    pub events: &'a EventBus,
    pub sink: &'a UnboundedSender<Discovery>,
}

impl DiscoveryContext<'_> {
    fn send(&self, discovery: Discovery) {
        if self.sink.send(discovery).is_err() {
            debug!("Discovery channel closed; dropping result");
        }
    }
}

/// Queries every intelligence source concurrently.
pub struct IntelligenceAggregator {
    client: Arc<reqwest::Client>,
    sources: Vec<Arc<dyn IntelligenceSource>>,
}

impl IntelligenceAggregator {
    pub fn new(client: Arc<reqwest::Client>, sources: Vec<Arc<dyn IntelligenceSource>>) -> Self {
        IntelligenceAggregator { client, sources }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Discovers subdomains of `ctx.domain`, returning the deduplicated union.
    ///
    /// Every accepted name is also pushed into `ctx.sink` as soon as its
    /// source has been parsed. If no source yields anything, a fixed list
    /// of common labels is probed over DNS instead.
    pub async fn discover(&self, ctx: &DiscoveryContext<'_>) -> Vec<String> {
        info!(
            "Querying {} intelligence sources for {}",
            self.sources.len(),
            ctx.domain
        );

        let per_source = settle_all(
            self.sources
                .iter()
                .map(|source| self.run_source(source.as_ref(), ctx)),
        )
        .await;

        let mut seen = HashSet::new();
        let mut union = Vec::new();
        for name in per_source.into_iter().flatten() {
            if seen.insert(name.clone()) {
                union.push(name);
            }
        }

        if union.is_empty() {
            info!("No subdomains from intelligence sources, probing common labels");
            union = probe_common_labels(ctx).await;
        }

        info!("Total unique subdomains found: {}", union.len());
        union
    }

    async fn run_source(&self, source: &dyn IntelligenceSource, ctx: &DiscoveryContext<'_>) -> Vec<String> {
        ctx.stats.increment(StatKind::ApiCalls);
        debug!("Querying {} for subdomains of {}", source.name(), ctx.domain);

        let candidates = match source.fetch(&self.client, ctx.domain).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("{} failed: {e}", source.name());
                ctx.events
                    .emit_api_notification(source.name(), ApiStatus::Error, &e.to_string());
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut accepted = Vec::new();
        for candidate in candidates {
            let Some(name) = accept_candidate(&candidate.name, ctx.domain) else {
                if candidate.name.contains('*') {
                    debug!("Skipping wildcard from {}: {}", source.name(), candidate.name.trim());
                }
                continue;
            };
            if !seen.insert(name.clone()) {
                continue;
            }
            ctx.send(Discovery {
                name: name.clone(),
                source: source.name().to_string(),
                certificate: candidate.certificate,
            });
            accepted.push(name);
        }

        info!("Found {} subdomains from {}", accepted.len(), source.name());
        ctx.events.emit_api_notification(
            source.name(),
            ApiStatus::Success,
            &format!("Found {} subdomains", accepted.len()),
        );
        accepted
    }
}

/// Resolves `<label>.<domain>` for each common label; hits become discoveries.
async fn probe_common_labels(ctx: &DiscoveryContext<'_>) -> Vec<String> {
    let names: Vec<String> = COMMON_SUBDOMAIN_LABELS
        .iter()
        .map(|label| format!("{label}.{}", ctx.domain))
        .collect();

    let answers = settle_all(
        names
            .iter()
            .map(|name| ctx.resolver.query(name, Some(RecordType::A), None)),
    )
    .await;

    let mut found = Vec::new();
    for (name, answer) in names.into_iter().zip(answers) {
        if answer.is_some_and(|records| !records.is_empty()) {
            info!("Found common subdomain: {name}");
            ctx.send(Discovery {
                name: name.clone(),
                source: COMMON_PATTERNS_SOURCE.to_string(),
                certificate: None,
            });
            found.push(name);
        }
    }
    found
}
