//! Analysis lifecycle.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{info, warn};
use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::dns::{analyze_main_domain, parse_endpoints, DnsResolver, DohEndpoint, MainDomainProfile};
use crate::error_handling::{AnalysisStats, InitializationError, StatsSnapshot};
use crate::events::{AnalysisObserver, EventBus};
use crate::fingerprint::ServiceClassifier;
use crate::geoip::{AsnLookup, AsnProvider};
use crate::initialization::{init_client, normalize_target_domain};
use crate::intelligence::{default_sources, Discovery, DiscoveryContext, IntelligenceAggregator, IntelligenceSource};
use crate::pipeline::{process_discovery, HistoricalRecord, Subdomain};
use crate::rate_limiter::RateLimiter;

use super::context::RunContext;

/// Results of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Normalized target domain
    pub domain: String,
    /// Record profile of the target domain itself
    pub main_domain: MainDomainProfile,
    /// Every name returned by discovery, in discovery order
    pub discovered: Vec<String>,
    /// Processed subdomains, sorted by name
    pub subdomains: Vec<Subdomain>,
    /// Certificate-listed names with no live DNS
    pub historical: Vec<HistoricalRecord>,
    pub stats: StatsSnapshot,
}

/// Runs analyses against target domains.
///
/// Long-lived pieces (HTTP client, provider lists, rule tables, subscribers)
/// are built once. Every call to [`start_analysis`](Self::start_analysis)
/// gets a fresh [`RunContext`] with its own rate limiter, counters and
/// name sets.
pub struct Analyzer {
    client: Arc<reqwest::Client>,
    endpoints: Vec<DohEndpoint>,
    rate_limit_max_requests: usize,
    rate_limit_window: std::time::Duration,
    classifier: Arc<ServiceClassifier>,
    aggregator: IntelligenceAggregator,
    asn: Arc<AsnLookup>,
    events: EventBus,
    current: Mutex<Option<Arc<RunContext>>>,
}

impl Analyzer {
    /// Builds an analyzer from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built, a DoH endpoint is not a
    /// valid URL, or the rules file cannot be loaded.
    pub async fn new(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        let endpoints = parse_endpoints(config.doh_providers.as_slice())?;
        let classifier = match &config.rules_file {
            Some(path) => ServiceClassifier::with_rules_file(path).await?,
            None => ServiceClassifier::new(),
        };

        Ok(Analyzer {
            aggregator: IntelligenceAggregator::new(Arc::clone(&client), default_sources()),
            asn: Arc::new(AsnLookup::new(Arc::clone(&client), AsnProvider::defaults())),
            client,
            endpoints,
            rate_limit_max_requests: config.rate_limit_max_requests,
            rate_limit_window: config.rate_limit_window(),
            classifier: Arc::new(classifier),
            events: EventBus::new(),
            current: Mutex::new(None),
        })
    }

    /// Replaces the intelligence sources.
    pub fn with_sources(mut self, sources: Vec<Arc<dyn IntelligenceSource>>) -> Self {
        self.aggregator = IntelligenceAggregator::new(Arc::clone(&self.client), sources);
        self
    }

    /// Replaces the ASN providers.
    pub fn with_asn_providers(mut self, providers: Vec<AsnProvider>) -> Self {
        self.asn = Arc::new(AsnLookup::new(Arc::clone(&self.client), providers));
        self
    }

    pub fn subscribe(&self, observer: Arc<dyn AnalysisObserver>) {
        self.events.subscribe(observer);
    }

    /// Runs a complete analysis of `domain`.
    ///
    /// Resolves the main domain profile, queries every intelligence source
    /// and processes each discovered name as soon as its source reports it.
    /// Returns once all sources have settled and every subdomain has been
    /// processed. Provider failures only reduce the results.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidDomainError` if `domain` is not a
    /// plausible hostname.
    pub async fn start_analysis(&self, domain: &str) -> Result<AnalysisReport, InitializationError> {
        let domain = normalize_target_domain(domain)?;
        let ctx = Arc::new(self.new_context(domain.clone()));
        *self.lock_current() = Some(Arc::clone(&ctx));

        ctx.stats.mark_started();
        info!("Starting analysis for {domain}");

        let main_domain = analyze_main_domain(&ctx.resolver, &domain).await;

        let (sink, discoveries) = mpsc::unbounded_channel();
        let consumer = tokio::spawn(consume_discoveries(Arc::clone(&ctx), discoveries));

        let discovered = self
            .aggregator
            .discover(&DiscoveryContext {
                domain: &domain,
                resolver: &ctx.resolver,
                stats: &ctx.stats,
                events: &ctx.events,
                sink: &sink,
            })
            .await;

        // Closing the sink lets the consumer drain and exit.
        drop(sink);
        if let Err(e) = consumer.await {
            warn!("Discovery consumer task failed: {e}");
        }

        ctx.stats.mark_finished();
        ctx.stats.log_summary();

        Ok(AnalysisReport {
            domain,
            main_domain,
            discovered,
            subdomains: ctx.completed(),
            historical: ctx.historical_records(),
            stats: ctx.stats.snapshot(),
        })
    }

    /// Drops all state from the previous run.
    pub fn reset_state(&self) {
        if let Some(ctx) = self.lock_current().take() {
            ctx.stats.reset();
        }
    }

    /// Counters of the current or most recent run, if any.
    pub fn stats(&self) -> Option<StatsSnapshot> {
        self.lock_current().as_ref().map(|ctx| ctx.stats.snapshot())
    }

    pub fn historical_records(&self) -> Vec<HistoricalRecord> {
        self.lock_current()
            .as_ref()
            .map(|ctx| ctx.historical_records())
            .unwrap_or_default()
    }

    fn new_context(&self, domain: String) -> RunContext {
        let stats = Arc::new(AnalysisStats::new());
        let limiter = Arc::new(RateLimiter::new(
            self.rate_limit_max_requests,
            self.rate_limit_window,
        ));
        let resolver = Arc::new(DnsResolver::new(
            Arc::clone(&self.client),
            self.endpoints.clone(),
            limiter,
            Arc::clone(&stats),
        ));

        RunContext::new(
            domain,
            stats,
            resolver,
            Arc::clone(&self.classifier),
            Arc::clone(&self.asn),
            self.events.clone(),
        )
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<Arc<RunContext>>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Spawns a processing task per discovery until the channel closes, then
/// waits for every task to finish.
async fn consume_discoveries(ctx: Arc<RunContext>, mut discoveries: UnboundedReceiver<Discovery>) {
    let mut tasks = JoinSet::new();

    while let Some(discovery) = discoveries.recv().await {
        if ctx.record_discovered(&discovery.name) {
            info!(
                "New subdomain discovered: {} (from {})",
                discovery.name, discovery.source
            );
            ctx.events
                .emit_subdomain_discovered(&discovery.name, &discovery.source);
        }

        let ctx = Arc::clone(&ctx);
        tasks.spawn(async move {
            process_discovery(&ctx, discovery).await;
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!("Subdomain processing task failed: {e}");
        }
    }
}
