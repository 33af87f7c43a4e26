//! Per-run state.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::dns::DnsResolver;
use crate::error_handling::{AnalysisStats, StatKind};
use crate::events::EventBus;
use crate::fingerprint::ServiceClassifier;
use crate::geoip::AsnLookup;
use crate::pipeline::{HistoricalRecord, Subdomain};

/// Everything one analysis run reads and writes.
///
/// Built fresh for each run and dropped (or replaced) afterwards, so no
/// name set, record list or counter ever leaks from one run into the next.
pub struct RunContext {
    pub domain: String,
    pub stats: Arc<AnalysisStats>,
    pub resolver: Arc<DnsResolver>,
    pub classifier: Arc<ServiceClassifier>,
    pub asn: Arc<AsnLookup>,
    pub events: EventBus,
    known: Mutex<HashSet<String>>,
    processed: Mutex<HashSet<String>>,
    historical: Mutex<Vec<HistoricalRecord>>,
    completed: Mutex<Vec<Subdomain>>,
}

// A poisoned lock only means another task panicked mid-push; the data is
// still a valid set or list.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RunContext {
    pub fn new(
        domain: String,
        stats: Arc<AnalysisStats>,
        resolver: Arc<DnsResolver>,
        classifier: Arc<ServiceClassifier>,
        asn: Arc<AsnLookup>,
        events: EventBus,
    ) -> Self {
        RunContext {
            domain,
            stats,
            resolver,
            classifier,
            asn,
            events,
            known: Mutex::new(HashSet::new()),
            processed: Mutex::new(HashSet::new()),
            historical: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
        }
    }

    /// Records a discovered name; `true` the first time it is seen this run.
    pub fn record_discovered(&self, name: &str) -> bool {
        let inserted = lock(&self.known).insert(name.to_string());
        if inserted {
            self.stats.increment(StatKind::SubdomainsDiscovered);
        }
        inserted
    }

    /// Claims `name` for processing; `true` only for the first caller.
    pub fn claim(&self, name: &str) -> bool {
        lock(&self.processed).insert(name.to_string())
    }

    pub fn is_processed(&self, name: &str) -> bool {
        lock(&self.processed).contains(name)
    }

    pub fn push_historical(&self, record: HistoricalRecord) {
        lock(&self.historical).push(record);
    }

    pub fn push_completed(&self, subdomain: Subdomain) {
        lock(&self.completed).push(subdomain);
    }

    pub fn historical_records(&self) -> Vec<HistoricalRecord> {
        lock(&self.historical).clone()
    }

    /// Completed subdomains sorted by name.
    pub fn completed(&self) -> Vec<Subdomain> {
        let mut subdomains = lock(&self.completed).clone();
        subdomains.sort_by(|a, b| a.name.cmp(&b.name));
        subdomains
    }
}
