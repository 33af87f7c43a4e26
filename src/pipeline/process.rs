//! Single-pass processing of one discovered subdomain.

use log::{debug, info};

use crate::config::{MX_HINT_KEYWORDS, TXT_HINT_KEYWORDS};
use crate::dns::{extract_spf_records, follow_chain, RecordType};
use crate::error_handling::StatKind;
use crate::geoip::classify_vendor;
use crate::intelligence::Discovery;
use crate::run::RunContext;
use crate::security::check_takeover;
use crate::utils::{is_ipv4_literal, same_host, settle_all, strip_trailing_dot};

use super::types::{HistoricalRecord, HistoricalStatus, Subdomain, SubdomainState};

/// Runs a discovery through the pipeline.
///
/// Returns `None` when the name was already processed in this run; the
/// second call then performs no queries and emits nothing. Otherwise the
/// subdomain ends in one of the terminal states, is recorded in the run
/// context and is announced to every observer.
pub async fn process_discovery(ctx: &RunContext, discovery: Discovery) -> Option<Subdomain> {
    if !ctx.claim(&discovery.name) {
        debug!("Skipping already processed subdomain: {}", discovery.name);
        return None;
    }
    ctx.stats.increment(StatKind::SubdomainsAnalyzed);

    let mut subdomain = Subdomain::new(discovery);
    subdomain.state = SubdomainState::Processing;
    info!(
        "Processing subdomain: {} (from {})",
        subdomain.name, subdomain.source
    );

    // No explicit type: providers answer with A records plus any CNAME chain.
    if let Some(answers) = ctx.resolver.query(&subdomain.name, None, None).await {
        for record in answers {
            subdomain
                .records
                .entry(record.record_type)
                .or_default()
                .push(record);
        }
    }

    subdomain.resolved_ip = subdomain
        .records_of(RecordType::A)
        .first()
        .map(|r| r.data.clone());
    let first_cname = subdomain
        .records_of(RecordType::Cname)
        .first()
        .map(|r| r.data.clone());
    subdomain.cname_target = first_cname
        .as_deref()
        .map(|target| strip_trailing_dot(target).to_string());

    if let Some(raw_target) = first_cname {
        if same_host(&raw_target, &ctx.domain) {
            info!(
                "Redirect detected: {} -> {raw_target} (main domain), skipping detailed analysis",
                subdomain.name
            );
            subdomain.is_redirect_to_main = true;
            subdomain.redirect_target = Some(raw_target);
            subdomain.state = SubdomainState::RedirectToMain;
            return Some(complete(ctx, subdomain));
        }
    }

    if !subdomain.records.is_empty() {
        enrich(ctx, &mut subdomain).await;
    }

    let live = subdomain.has_records(RecordType::A) || subdomain.has_records(RecordType::Cname);
    subdomain.state = match (&subdomain.certificate, live) {
        (Some(certificate), false) => {
            info!(
                "Historical record found: {} (no active DNS, certificate from {})",
                subdomain.name, subdomain.source
            );
            ctx.push_historical(HistoricalRecord {
                subdomain: subdomain.name.clone(),
                source: subdomain.source.clone(),
                certificate_info: certificate.clone(),
                discovered_at: chrono::Utc::now(),
                status: HistoricalStatus::Historical,
            });
            subdomain.historical_only = true;
            SubdomainState::Historical
        }
        _ => SubdomainState::Analyzed,
    };

    Some(complete(ctx, subdomain))
}

/// Service classification, opportunistic record queries, ASN and takeover.
async fn enrich(ctx: &RunContext, subdomain: &mut Subdomain) {
    if let Some(target) = subdomain.cname_target.clone() {
        let chain = follow_chain(&ctx.resolver, &subdomain.name).await;
        match (chain.first(), chain.last()) {
            (Some(first), Some(last)) => {
                subdomain.primary_service = ctx.classifier.match_service(&first.to);
                subdomain.infrastructure = ctx.classifier.match_infrastructure(&last.to);
            }
            _ => subdomain.primary_service = ctx.classifier.match_cname_service(&target),
        }
        subdomain.cname_chain = chain;

        if let Some(service) = &subdomain.primary_service {
            info!("Service detected for {}: {}", subdomain.name, service.name);
            ctx.stats.increment(StatKind::ServicesDetected);
        }
    }

    let extra_types = opportunistic_types(&subdomain.name, &ctx.domain);
    let lookups = extra_types
        .iter()
        .copied()
        .map(|record_type| ctx.resolver.query(&subdomain.name, Some(record_type), None))
        .collect::<Vec<_>>();
    let answers = settle_all(lookups).await;
    for (record_type, records) in extra_types.into_iter().zip(answers) {
        match records {
            Some(records) if !records.is_empty() => {
                subdomain.records.insert(record_type, records);
            }
            _ => debug!("No {record_type} records for {}", subdomain.name),
        }
    }

    let spf = extract_spf_records(subdomain.records_of(RecordType::Txt));
    if !spf.is_empty() {
        subdomain.records.insert(RecordType::Spf, spf);
    }

    if let Some(ip) = subdomain.resolved_ip.clone().filter(|ip| is_ipv4_literal(ip)) {
        ctx.stats.increment(StatKind::AsnLookups);
        let info = ctx.asn.lookup(&ip).await;
        subdomain.vendor = classify_vendor(&info);
        debug!(
            "ASN info for {ip}: {} ({})",
            info.organization().unwrap_or("Unknown"),
            subdomain.vendor.vendor
        );
        subdomain.asn = Some(info);
    }

    if let Some(target) = subdomain.cname_target.clone() {
        if let Some(finding) = check_takeover(&ctx.resolver, &subdomain.name, &target).await {
            ctx.stats.increment(StatKind::TakeoversDetected);
            subdomain.takeover = Some(finding);
        }
    }
}

/// TXT for the bare domain, its `www` alias and verification-looking names;
/// MX for the bare domain and mail-looking names; NS always.
pub(crate) fn opportunistic_types(name: &str, domain: &str) -> Vec<RecordType> {
    let is_bare = name == domain;
    let mut types = Vec::with_capacity(3);

    if is_bare
        || name == format!("www.{domain}")
        || TXT_HINT_KEYWORDS.iter().any(|k| name.contains(k))
    {
        types.push(RecordType::Txt);
    }
    if is_bare || MX_HINT_KEYWORDS.iter().any(|k| name.contains(k)) {
        types.push(RecordType::Mx);
    }
    types.push(RecordType::Ns);
    types
}

fn complete(ctx: &RunContext, subdomain: Subdomain) -> Subdomain {
    debug!(
        "Analysis complete: {} ({:?}, IP: {})",
        subdomain.name,
        subdomain.state,
        subdomain.resolved_ip.as_deref().unwrap_or("none")
    );
    ctx.events.emit_analysis_complete(&subdomain);
    ctx.push_completed(subdomain.clone());
    subdomain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opportunistic_types_for_bare_domain() {
        assert_eq!(
            opportunistic_types("example.com", "example.com"),
            vec![RecordType::Txt, RecordType::Mx, RecordType::Ns]
        );
    }

    #[test]
    fn test_opportunistic_types_for_www_alias() {
        assert_eq!(
            opportunistic_types("www.example.com", "example.com"),
            vec![RecordType::Txt, RecordType::Ns]
        );
    }

    #[test]
    fn test_opportunistic_types_keyword_hints() {
        assert_eq!(
            opportunistic_types("auth.example.com", "example.com"),
            vec![RecordType::Txt, RecordType::Ns]
        );
        assert_eq!(
            opportunistic_types("smtp.example.com", "example.com"),
            vec![RecordType::Mx, RecordType::Ns]
        );
        assert_eq!(
            opportunistic_types("api.example.com", "example.com"),
            vec![RecordType::Ns]
        );
    }
}
