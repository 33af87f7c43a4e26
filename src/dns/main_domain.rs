//! Record profile of the bare target domain.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;

use super::extract::{extract_dmarc_records, extract_spf_records};
use super::records::{RecordType, ResolvedRecord};
use super::resolver::DnsResolver;

/// DNS profile of the target domain itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MainDomainProfile {
    pub domain: String,
    /// Only non-empty record kinds are present
    pub records: BTreeMap<RecordType, Vec<ResolvedRecord>>,
}

impl MainDomainProfile {
    pub fn records_of(&self, record_type: RecordType) -> &[ResolvedRecord] {
        self.records
            .get(&record_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Queries A, CNAME, TXT, MX and NS for `domain` concurrently, then derives
/// SPF from the TXT answers and DMARC from `_dmarc.<domain>`.
pub async fn analyze_main_domain(resolver: &DnsResolver, domain: &str) -> MainDomainProfile {
    let dmarc_name = format!("_dmarc.{domain}");
    let (a, cname, txt, mx, ns, dmarc_txt) = tokio::join!(
        resolver.query(domain, Some(RecordType::A), None),
        resolver.query(domain, Some(RecordType::Cname), None),
        resolver.query(domain, Some(RecordType::Txt), None),
        resolver.query(domain, Some(RecordType::Mx), None),
        resolver.query(domain, Some(RecordType::Ns), None),
        resolver.query(&dmarc_name, Some(RecordType::Txt), None),
    );

    let mut profile = MainDomainProfile {
        domain: domain.to_string(),
        records: BTreeMap::new(),
    };

    for (record_type, records) in [
        (RecordType::A, a),
        (RecordType::Cname, cname),
        (RecordType::Txt, txt),
        (RecordType::Mx, mx),
        (RecordType::Ns, ns),
    ] {
        if let Some(records) = records.filter(|r| !r.is_empty()) {
            debug!("Found {} {record_type} records for {domain}", records.len());
            profile.records.insert(record_type, records);
        }
    }

    let spf = extract_spf_records(profile.records_of(RecordType::Txt));
    if !spf.is_empty() {
        profile.records.insert(RecordType::Spf, spf);
    }

    let dmarc = extract_dmarc_records(&dmarc_txt.unwrap_or_default());
    if !dmarc.is_empty() {
        profile.records.insert(RecordType::Dmarc, dmarc);
    }

    info!(
        "Main domain {domain}: {} record kinds resolved",
        profile.records.len()
    );
    profile
}
