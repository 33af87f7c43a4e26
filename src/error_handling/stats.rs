//! Run statistics tracking.
//!
//! This module provides thread-safe counters for everything an analysis run
//! does: DNS queries, API calls, discoveries, analyses, ASN lookups, detected
//! services and takeovers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

/// Counters tracked for each analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum StatKind {
    /// Outbound DNS-over-HTTPS queries (after throttling)
    DnsQueries,
    /// Intelligence source API calls
    ApiCalls,
    /// Unique subdomain names discovered
    SubdomainsDiscovered,
    /// Subdomains that entered the pipeline
    SubdomainsAnalyzed,
    /// ASN/vendor classifications performed
    AsnLookups,
    /// Third-party services identified from CNAME targets
    ServicesDetected,
    /// Dangling-CNAME takeover findings
    TakeoversDetected,
}

impl StatKind {
    /// Returns a human-readable label for the counter.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::DnsQueries => "DNS queries",
            StatKind::ApiCalls => "API calls",
            StatKind::SubdomainsDiscovered => "Subdomains discovered",
            StatKind::SubdomainsAnalyzed => "Subdomains analyzed",
            StatKind::AsnLookups => "ASN lookups",
            StatKind::ServicesDetected => "Services detected",
            StatKind::TakeoversDetected => "Takeovers detected",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thread-safe run statistics.
///
/// All counters are initialized to zero on creation, so every `StatKind` is
/// always present in the map. Shared across tasks by reference from the run
/// context.
pub struct AnalysisStats {
    counters: HashMap<StatKind, AtomicUsize>,
    started_at: Mutex<Option<DateTime<Utc>>>,
    ended_at: Mutex<Option<DateTime<Utc>>>,
}

/// Point-in-time copy of the run counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub dns_queries: usize,
    pub api_calls: usize,
    pub subdomains_discovered: usize,
    pub subdomains_analyzed: usize,
    pub asn_lookups: usize,
    pub services_detected: usize,
    pub takeovers_detected: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Seconds between start and end (or now, if the run is still going)
    pub duration_seconds: f64,
    pub subdomains_per_second: f64,
}

impl AnalysisStats {
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for kind in StatKind::iter() {
            counters.insert(kind, AtomicUsize::new(0));
        }

        AnalysisStats {
            counters,
            started_at: Mutex::new(None),
            ended_at: Mutex::new(None),
        }
    }

    /// Increment a counter by one.
    pub fn increment(&self, kind: StatKind) {
        if let Some(counter) = self.counters.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter {:?} which is not in the map. \
                 This indicates a bug in AnalysisStats initialization.",
                kind
            );
        }
    }

    /// Get the current value of a counter.
    pub fn get(&self, kind: StatKind) -> usize {
        self.counters
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Marks the start of a run, clearing any previous end timestamp.
    pub fn mark_started(&self) {
        if let Ok(mut started) = self.started_at.lock() {
            *started = Some(Utc::now());
        }
        if let Ok(mut ended) = self.ended_at.lock() {
            *ended = None;
        }
    }

    /// Marks the end of a run.
    pub fn mark_finished(&self) {
        if let Ok(mut ended) = self.ended_at.lock() {
            *ended = Some(Utc::now());
        }
    }

    /// Resets every counter to zero and clears both timestamps.
    pub fn reset(&self) {
        for counter in self.counters.values() {
            counter.store(0, Ordering::SeqCst);
        }
        if let Ok(mut started) = self.started_at.lock() {
            *started = None;
        }
        if let Ok(mut ended) = self.ended_at.lock() {
            *ended = None;
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let started_at = self.started_at.lock().ok().and_then(|s| *s);
        let ended_at = self.ended_at.lock().ok().and_then(|e| *e);

        let duration_seconds = match started_at {
            Some(start) => {
                let end = ended_at.unwrap_or_else(Utc::now);
                #[allow(clippy::cast_precision_loss)]
                let millis = (end - start).num_milliseconds().max(0) as f64;
                millis / 1000.0
            }
            None => 0.0,
        };

        let subdomains_analyzed = self.get(StatKind::SubdomainsAnalyzed);
        #[allow(clippy::cast_precision_loss)]
        let subdomains_per_second = if subdomains_analyzed > 0 && duration_seconds > 0.0 {
            subdomains_analyzed as f64 / duration_seconds
        } else {
            0.0
        };

        StatsSnapshot {
            dns_queries: self.get(StatKind::DnsQueries),
            api_calls: self.get(StatKind::ApiCalls),
            subdomains_discovered: self.get(StatKind::SubdomainsDiscovered),
            subdomains_analyzed,
            asn_lookups: self.get(StatKind::AsnLookups),
            services_detected: self.get(StatKind::ServicesDetected),
            takeovers_detected: self.get(StatKind::TakeoversDetected),
            started_at,
            ended_at,
            duration_seconds,
            subdomains_per_second,
        }
    }

    /// Logs the end-of-run statistics table.
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!("{}", "=".repeat(60));
        info!("📊 ANALYSIS STATISTICS");
        info!("{}", "=".repeat(60));
        info!("Total duration: {:.2} seconds", snapshot.duration_seconds);
        for kind in StatKind::iter() {
            info!("   {}: {}", kind.as_str(), self.get(kind));
        }
        info!(
            "Performance: {:.2} subdomains/second",
            snapshot.subdomains_per_second
        );
        info!("{}", "=".repeat(60));
    }
}

impl Default for AnalysisStats {
    fn default() -> Self {
        Self::new()
    }
}
