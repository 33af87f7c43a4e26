//! Per-subdomain analysis records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dns::{CnameChain, RecordType, ResolvedRecord};
use crate::fingerprint::ServiceDescriptor;
use crate::geoip::{AsnInfo, VendorClassification};
use crate::intelligence::{CertificateInfo, Discovery};
use crate::security::TakeoverFinding;

/// Lifecycle of a subdomain within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdomainState {
    Discovered,
    Processing,
    /// CNAME points back at the run's target domain; analysis stopped early.
    RedirectToMain,
    /// Seen in certificate logs but has no A or CNAME record today.
    Historical,
    Analyzed,
}

impl SubdomainState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubdomainState::RedirectToMain | SubdomainState::Historical | SubdomainState::Analyzed
        )
    }
}

/// Everything learned about one subdomain.
#[derive(Debug, Clone, Serialize)]
pub struct Subdomain {
    pub name: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateInfo>,
    pub records: BTreeMap<RecordType, Vec<ResolvedRecord>>,
    pub resolved_ip: Option<String>,
    pub cname_target: Option<String>,
    pub cname_chain: CnameChain,
    pub primary_service: Option<ServiceDescriptor>,
    pub infrastructure: Option<ServiceDescriptor>,
    pub asn: Option<AsnInfo>,
    pub vendor: VendorClassification,
    pub takeover: Option<TakeoverFinding>,
    pub is_redirect_to_main: bool,
    pub redirect_target: Option<String>,
    pub historical_only: bool,
    pub state: SubdomainState,
}

impl Subdomain {
    pub fn new(discovery: Discovery) -> Self {
        Subdomain {
            name: discovery.name,
            source: discovery.source,
            certificate: discovery.certificate,
            records: BTreeMap::new(),
            resolved_ip: None,
            cname_target: None,
            cname_chain: Vec::new(),
            primary_service: None,
            infrastructure: None,
            asn: None,
            vendor: VendorClassification::default(),
            takeover: None,
            is_redirect_to_main: false,
            redirect_target: None,
            historical_only: false,
            state: SubdomainState::Discovered,
        }
    }

    pub fn records_of(&self, record_type: RecordType) -> &[ResolvedRecord] {
        self.records
            .get(&record_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_records(&self, record_type: RecordType) -> bool {
        !self.records_of(record_type).is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HistoricalStatus {
    #[serde(rename = "Historical/Obsolete")]
    Historical,
}

/// A certificate-listed subdomain that no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalRecord {
    pub subdomain: String,
    pub source: String,
    pub certificate_info: CertificateInfo,
    pub discovered_at: DateTime<Utc>,
    pub status: HistoricalStatus,
}
