// Shared test helpers for mock providers and analyzer setup.
//
// Every scenario runs against a single wiremock server that plays the DoH
// resolver, the intelligence sources and the ASN provider at once.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use attack_surface::geoip::{AsnProvider, AsnProviderKind};
use attack_surface::intelligence::sources::{CrtSh, Otx};
use attack_surface::intelligence::IntelligenceSource;
use attack_surface::{Analyzer, Config};

/// Builds an analyzer whose DoH, source and ASN endpoints all point at `server`.
pub async fn create_test_analyzer(
    server: &MockServer,
    sources: Vec<Arc<dyn IntelligenceSource>>,
) -> Analyzer {
    let config = Config {
        domain: "example.com".to_string(),
        rate_limit_max_requests: 1000,
        doh_providers: vec![format!("{}/resolve", server.uri())],
        timeout_seconds: 5,
        ..Default::default()
    };

    Analyzer::new(&config)
        .await
        .expect("analyzer should initialize")
        .with_sources(sources)
        .with_asn_providers(vec![AsnProvider::new(
            AsnProviderKind::IpInfo,
            format!("{}/asn", server.uri()),
        )])
}

#[allow(dead_code)] // Not every scenario file uses every source
pub fn crtsh_source(server: &MockServer) -> Arc<dyn IntelligenceSource> {
    Arc::new(CrtSh::new(format!("{}/crtsh", server.uri())))
}

#[allow(dead_code)]
pub fn otx_source(server: &MockServer) -> Arc<dyn IntelligenceSource> {
    Arc::new(Otx::new(format!("{}/otx", server.uri())))
}

/// crt.sh response listing `names`, one certificate each.
pub async fn mount_crtsh(server: &MockServer, names: &[&str]) {
    let entries: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "id": 5000 + i,
                "issuer_name": "C=US, O=Let's Encrypt, CN=R3",
                "name_value": name,
                "not_before": "2021-06-01T00:00:00",
                "not_after": "2021-08-30T00:00:00"
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/crtsh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_otx(server: &MockServer, names: &[&str]) {
    let entries: Vec<Value> = names.iter().map(|name| json!({"hostname": name})).collect();
    Mock::given(method("GET"))
        .and(path("/otx/api/v1/indicators/domain/example.com/passive_dns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"passive_dns": entries})))
        .mount(server)
        .await;
}

pub fn answer(name: &str, record_type: u16, data: &str) -> Value {
    json!({"name": name, "type": record_type, "TTL": 300, "data": data})
}

fn doh_body(answers: Vec<Value>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"Status": 0, "Answer": answers}))
}

/// Answers `name` for one record type, or for the untyped query when
/// `record_type` is `None`.
#[allow(dead_code)]
pub async fn mount_doh(
    server: &MockServer,
    name: &str,
    record_type: Option<&str>,
    answers: Vec<Value>,
) {
    let mock = Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", name));
    let mock = match record_type {
        Some(record_type) => mock.and(query_param("type", record_type)),
        None => mock.and(query_param_is_missing("type")),
    };
    mock.respond_with(doh_body(answers)).mount(server).await;
}

/// Every other DoH query gets a successful empty answer (NXDOMAIN).
pub async fn mount_doh_nxdomain(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": 3})))
        .with_priority(10)
        .mount(server)
        .await;
}
