//! Aggregator tests against mock intelligence sources and DoH providers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::sources::{CertSpotter, CrtSh, HackerTarget, Otx};
use super::*;
use crate::dns::{parse_endpoints, DnsResolver};
use crate::error_handling::{AnalysisStats, StatKind};
use crate::events::{AnalysisObserver, ApiStatus, EventBus};
use crate::rate_limiter::RateLimiter;

#[derive(Default)]
struct Notifications(Mutex<Vec<(String, ApiStatus, String)>>);

impl AnalysisObserver for Notifications {
    fn on_api_notification(
        &self,
        source: &str,
        status: ApiStatus,
        message: &str,
    ) -> anyhow::Result<()> {
        self.0
            .lock()
            .unwrap()
            .push((source.to_string(), status, message.to_string()));
        Ok(())
    }
}

impl Notifications {
    fn for_source(&self, source: &str) -> (ApiStatus, String) {
        let all = self.0.lock().unwrap();
        let (_, status, message) = all
            .iter()
            .find(|(name, _, _)| name == source)
            .unwrap_or_else(|| panic!("no notification for {source}"));
        (*status, message.clone())
    }
}

fn create_test_resolver(doh_uri: &str, stats: &Arc<AnalysisStats>) -> DnsResolver {
    DnsResolver::new(
        Arc::new(reqwest::Client::new()),
        parse_endpoints(&[format!("{doh_uri}/resolve")]).unwrap(),
        Arc::new(RateLimiter::new(1000, Duration::from_secs(1))),
        Arc::clone(stats),
    )
}

async fn mount_all_sources(server: &MockServer) -> Vec<Arc<dyn IntelligenceSource>> {
    Mock::given(method("GET"))
        .and(path("/crtsh/"))
        .and(query_param("q", "%.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1001,
                "issuer_name": "C=US, O=Let's Encrypt, CN=R3",
                "name_value": "api.example.com\n*.example.com\nexample.com",
                "not_before": "2023-01-01T00:00:00",
                "not_after": "2023-04-01T00:00:00"
            },
            {
                "id": 1002,
                "issuer_name": "C=US, O=Let's Encrypt, CN=R3",
                "name_value": "API.example.com,legacy.example.com"
            }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/certspotter/v1/issuances"))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/otx/api/v1/indicators/domain/example.com/passive_dns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "passive_dns": [
                {"hostname": "mail.example.com"},
                {"hostname": "example.com.evil.net"},
                {"hostname": "api.example.com"}
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hackertarget/hostsearch/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("shop.example.com,192.0.2.7\nbad_name.example.com,192.0.2.8\n"),
        )
        .mount(server)
        .await;

    vec![
        Arc::new(CrtSh::new(format!("{}/crtsh", server.uri()))),
        Arc::new(CertSpotter::new(format!("{}/certspotter", server.uri()))),
        Arc::new(Otx::new(format!("{}/otx", server.uri()))),
        Arc::new(HackerTarget::new(format!("{}/hackertarget", server.uri()))),
    ]
}

#[tokio::test]
async fn test_discover_merges_sources_and_streams_discoveries() {
    let server = MockServer::start().await;
    let sources = mount_all_sources(&server).await;

    let stats = Arc::new(AnalysisStats::new());
    let resolver = create_test_resolver(&server.uri(), &stats);
    let events = EventBus::new();
    let notifications = Arc::new(Notifications::default());
    events.subscribe(notifications.clone());
    let (sink, mut discoveries) = mpsc::unbounded_channel();

    let aggregator = IntelligenceAggregator::new(Arc::new(reqwest::Client::new()), sources);
    let mut found = aggregator
        .discover(&DiscoveryContext {
            domain: "example.com",
            resolver: &resolver,
            stats: &stats,
            events: &events,
            sink: &sink,
        })
        .await;
    drop(sink);

    found.sort();
    assert_eq!(
        found,
        vec![
            "api.example.com",
            "legacy.example.com",
            "mail.example.com",
            "shop.example.com"
        ]
    );
    assert_eq!(stats.get(StatKind::ApiCalls), 4);
    // No fallback probing when sources produced names.
    assert_eq!(stats.get(StatKind::DnsQueries), 0);

    let mut streamed = Vec::new();
    while let Some(discovery) = discoveries.recv().await {
        streamed.push(discovery);
    }
    // Each source dedupes its own names; overlap across sources is left to the pipeline.
    assert_eq!(streamed.len(), 5);

    let legacy = streamed
        .iter()
        .find(|d| d.name == "legacy.example.com")
        .unwrap();
    assert_eq!(legacy.source, "crt.sh");
    let certificate = legacy.certificate.as_ref().unwrap();
    assert_eq!(certificate.issuer, "C=US, O=Let's Encrypt, CN=R3");
    assert_eq!(certificate.certificate_id.as_deref(), Some("1002"));

    let api_from_crtsh = streamed
        .iter()
        .find(|d| d.name == "api.example.com" && d.source == "crt.sh")
        .unwrap();
    assert_eq!(
        api_from_crtsh.certificate.as_ref().unwrap().certificate_id.as_deref(),
        Some("1001")
    );
    assert!(streamed
        .iter()
        .any(|d| d.name == "api.example.com" && d.source == "OTX AlienVault" && d.certificate.is_none()));

    assert_eq!(
        notifications.for_source("crt.sh"),
        (ApiStatus::Success, "Found 2 subdomains".to_string())
    );
    assert_eq!(
        notifications.for_source("Cert Spotter"),
        (ApiStatus::Error, "Service unavailable (503)".to_string())
    );
    assert_eq!(
        notifications.for_source("OTX AlienVault"),
        (ApiStatus::Success, "Found 2 subdomains".to_string())
    );
    assert_eq!(
        notifications.for_source("HackerTarget"),
        (ApiStatus::Success, "Found 1 subdomains".to_string())
    );
}

#[tokio::test]
async fn test_discover_falls_back_to_common_labels() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crtsh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", "www.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": 0,
            "Answer": [{"name": "www.example.com.", "type": 1, "TTL": 60, "data": "192.0.2.1"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": 3})))
        .mount(&server)
        .await;

    let stats = Arc::new(AnalysisStats::new());
    let resolver = create_test_resolver(&server.uri(), &stats);
    let events = EventBus::new();
    let (sink, mut discoveries) = mpsc::unbounded_channel();

    let aggregator = IntelligenceAggregator::new(
        Arc::new(reqwest::Client::new()),
        vec![Arc::new(CrtSh::new(format!("{}/crtsh", server.uri())))],
    );
    let found = aggregator
        .discover(&DiscoveryContext {
            domain: "example.com",
            resolver: &resolver,
            stats: &stats,
            events: &events,
            sink: &sink,
        })
        .await;
    drop(sink);

    assert_eq!(found, vec!["www.example.com"]);
    assert_eq!(
        stats.get(StatKind::DnsQueries),
        crate::config::COMMON_SUBDOMAIN_LABELS.len()
    );

    let discovery = discoveries.recv().await.unwrap();
    assert_eq!(discovery.name, "www.example.com");
    assert_eq!(discovery.source, "Common Patterns");
    assert!(discovery.certificate.is_none());
    assert!(discoveries.recv().await.is_none());
}

#[tokio::test]
async fn test_discover_with_every_source_failing_returns_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let stats = Arc::new(AnalysisStats::new());
    let resolver = create_test_resolver(&server.uri(), &stats);
    let events = EventBus::new();
    let (sink, _discoveries) = mpsc::unbounded_channel();

    let aggregator = IntelligenceAggregator::new(
        Arc::new(reqwest::Client::new()),
        vec![
            Arc::new(CrtSh::new(format!("{}/crtsh", server.uri()))),
            Arc::new(Otx::new(format!("{}/otx", server.uri()))),
        ],
    );
    let found = aggregator
        .discover(&DiscoveryContext {
            domain: "example.com",
            resolver: &resolver,
            stats: &stats,
            events: &events,
            sink: &sink,
        })
        .await;

    assert!(found.is_empty());
    assert_eq!(stats.get(StatKind::ApiCalls), 2);
}
