//! End-to-end analysis runs against mock providers.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use attack_surface::dns::RecordType;
use attack_surface::fingerprint::ServiceCategory;
use attack_surface::geoip::VendorCategory;
use attack_surface::security::RiskLevel;
use attack_surface::{AnalysisEvent, ChannelObserver, SubdomainState};

#[path = "helpers.rs"]
mod helpers;

use helpers::{
    answer, create_test_analyzer, crtsh_source, mount_crtsh, mount_doh, mount_doh_nxdomain,
    mount_otx, otx_source,
};

#[tokio::test]
async fn test_certificate_only_name_becomes_historical() {
    let server = MockServer::start().await;
    mount_crtsh(&server, &["legacy.example.com"]).await;
    mount_doh_nxdomain(&server).await;

    let analyzer = create_test_analyzer(&server, vec![crtsh_source(&server)]).await;
    let report = analyzer.start_analysis("example.com").await.unwrap();

    assert_eq!(report.discovered, vec!["legacy.example.com"]);
    assert_eq!(report.subdomains.len(), 1);
    let legacy = &report.subdomains[0];
    assert_eq!(legacy.state, SubdomainState::Historical);
    assert!(legacy.historical_only);

    assert_eq!(report.historical.len(), 1);
    let record = &report.historical[0];
    assert_eq!(record.subdomain, "legacy.example.com");
    assert_eq!(record.source, "crt.sh");
    assert_eq!(record.certificate_info.issuer, "C=US, O=Let's Encrypt, CN=R3");
    assert_eq!(
        serde_json::to_value(record).unwrap()["status"],
        json!("Historical/Obsolete")
    );

    assert_eq!(analyzer.historical_records().len(), 1);
    assert_eq!(report.stats.api_calls, 1);
    assert_eq!(report.stats.subdomains_analyzed, 1);
}

#[tokio::test]
async fn test_cname_to_main_domain_stops_at_redirect() {
    let server = MockServer::start().await;
    mount_crtsh(&server, &["www.example.com"]).await;
    mount_doh(
        &server,
        "www.example.com",
        None,
        vec![
            answer("www.example.com.", 5, "example.com."),
            answer("example.com.", 1, "192.0.2.80"),
        ],
    )
    .await;
    mount_doh_nxdomain(&server).await;
    Mock::given(method("GET"))
        .and(path_regex("^/asn/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = create_test_analyzer(&server, vec![crtsh_source(&server)]).await;
    let report = analyzer.start_analysis("example.com").await.unwrap();

    let www = &report.subdomains[0];
    assert_eq!(www.state, SubdomainState::RedirectToMain);
    assert!(www.is_redirect_to_main);
    assert_eq!(www.redirect_target.as_deref(), Some("example.com."));
    assert!(www.takeover.is_none());
    assert!(!www.records.contains_key(&RecordType::Ns));
    assert_eq!(report.stats.asn_lookups, 0);
    assert!(report.historical.is_empty());
}

#[tokio::test]
async fn test_same_name_from_two_sources_is_processed_once() {
    let server = MockServer::start().await;
    mount_crtsh(&server, &["api.example.com"]).await;
    mount_otx(&server, &["api.example.com", "API.example.com."]).await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", "api.example.com"))
        .and(query_param_is_missing("type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": 3})))
        .expect(1)
        .mount(&server)
        .await;
    mount_doh_nxdomain(&server).await;

    let analyzer =
        create_test_analyzer(&server, vec![crtsh_source(&server), otx_source(&server)]).await;
    let (observer, mut events) = ChannelObserver::channel();
    analyzer.subscribe(Arc::new(observer));

    let report = analyzer.start_analysis("example.com").await.unwrap();

    assert_eq!(report.discovered, vec!["api.example.com"]);
    assert_eq!(report.subdomains.len(), 1);
    assert_eq!(report.stats.subdomains_discovered, 1);
    assert_eq!(report.stats.subdomains_analyzed, 1);

    let mut discovered_events = 0;
    let mut complete_events = 0;
    let mut notifications = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            AnalysisEvent::SubdomainDiscovered { .. } => discovered_events += 1,
            AnalysisEvent::AnalysisComplete(_) => complete_events += 1,
            AnalysisEvent::ApiNotification { .. } => notifications += 1,
        }
    }
    assert_eq!(discovered_events, 1);
    assert_eq!(complete_events, 1);
    assert_eq!(notifications, 2);
}

#[tokio::test]
async fn test_dangling_cname_is_flagged_as_takeover() {
    let server = MockServer::start().await;
    mount_crtsh(&server, &["old.example.com"]).await;
    mount_doh(
        &server,
        "old.example.com",
        None,
        vec![answer("old.example.com.", 5, "gone-app.herokuapp.com.")],
    )
    .await;
    mount_doh(
        &server,
        "old.example.com",
        Some("CNAME"),
        vec![answer("old.example.com.", 5, "gone-app.herokuapp.com.")],
    )
    .await;
    mount_doh_nxdomain(&server).await;

    let analyzer = create_test_analyzer(&server, vec![crtsh_source(&server)]).await;
    let report = analyzer.start_analysis("example.com").await.unwrap();

    let old = &report.subdomains[0];
    assert_eq!(old.state, SubdomainState::Analyzed);
    assert_eq!(old.cname_target.as_deref(), Some("gone-app.herokuapp.com"));
    assert_eq!(old.cname_chain.len(), 1);
    assert_eq!(old.primary_service.as_ref().unwrap().name, "Heroku");

    let finding = old.takeover.as_ref().expect("dangling CNAME should be flagged");
    assert_eq!(finding.risk, RiskLevel::High);
    assert_eq!(finding.cname, "gone-app.herokuapp.com");
    assert_eq!(finding.description, "CNAME target does not resolve");
    assert_eq!(report.stats.takeovers_detected, 1);
    assert!(report.historical.is_empty());
}

#[tokio::test]
async fn test_cname_chain_classifies_service_and_vendor() {
    let server = MockServer::start().await;
    mount_crtsh(&server, &["login.example.com"]).await;
    mount_doh(
        &server,
        "login.example.com",
        None,
        vec![
            answer("login.example.com.", 5, "svc.okta.com."),
            answer("svc.okta.com.", 5, "edge.okta-proxy.net."),
            answer("edge.okta-proxy.net.", 1, "192.0.2.50"),
        ],
    )
    .await;
    mount_doh(
        &server,
        "login.example.com",
        Some("CNAME"),
        vec![answer("login.example.com.", 5, "svc.okta.com.")],
    )
    .await;
    mount_doh(
        &server,
        "svc.okta.com",
        Some("CNAME"),
        vec![answer("svc.okta.com.", 5, "edge.okta-proxy.net.")],
    )
    .await;
    mount_doh(
        &server,
        "svc.okta.com",
        Some("A"),
        vec![answer("edge.okta-proxy.net.", 1, "192.0.2.50")],
    )
    .await;
    mount_doh_nxdomain(&server).await;
    Mock::given(method("GET"))
        .and(path("/asn/192.0.2.50/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "192.0.2.50",
            "org": "AS16509 Amazon.com, Inc.",
            "country": "US",
            "city": "Seattle"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = create_test_analyzer(&server, vec![crtsh_source(&server)]).await;
    let report = analyzer.start_analysis("example.com").await.unwrap();

    let login = &report.subdomains[0];
    assert_eq!(login.state, SubdomainState::Analyzed);
    assert_eq!(login.cname_chain.len(), 2);
    assert_eq!(login.cname_chain[0].to, "svc.okta.com");
    assert_eq!(login.cname_chain[1].to, "edge.okta-proxy.net");

    let service = login.primary_service.as_ref().unwrap();
    assert_eq!(service.name, "Okta");
    assert_eq!(service.category, ServiceCategory::Security);
    assert!(login.infrastructure.is_none());

    assert_eq!(login.resolved_ip.as_deref(), Some("192.0.2.50"));
    assert_eq!(login.vendor.vendor, "Amazon Web Services");
    assert_eq!(login.vendor.category, VendorCategory::Cloud);
    assert!(login.takeover.is_none());

    assert_eq!(report.stats.services_detected, 1);
    assert_eq!(report.stats.asn_lookups, 1);
    assert_eq!(report.stats.takeovers_detected, 0);
}

#[tokio::test]
async fn test_main_domain_profile_is_reported() {
    let server = MockServer::start().await;
    mount_crtsh(&server, &[]).await;
    mount_doh(
        &server,
        "example.com",
        Some("TXT"),
        vec![
            answer("example.com.", 16, "\"v=spf1 include:_spf.google.com ~all\""),
            answer("example.com.", 16, "\"google-site-verification=abc\""),
        ],
    )
    .await;
    mount_doh(
        &server,
        "_dmarc.example.com",
        Some("TXT"),
        vec![answer("_dmarc.example.com.", 16, "\"v=DMARC1; p=reject\"")],
    )
    .await;
    mount_doh_nxdomain(&server).await;

    let analyzer = create_test_analyzer(&server, vec![crtsh_source(&server)]).await;
    let report = analyzer.start_analysis("Example.COM.").await.unwrap();

    assert_eq!(report.domain, "example.com");
    assert_eq!(report.main_domain.records_of(RecordType::Txt).len(), 2);
    assert_eq!(report.main_domain.records_of(RecordType::Spf).len(), 1);
    assert_eq!(report.main_domain.records_of(RecordType::Dmarc).len(), 1);
    assert!(report.subdomains.is_empty());
}

#[tokio::test]
async fn test_each_run_starts_with_fresh_state() {
    let server = MockServer::start().await;
    mount_crtsh(&server, &["legacy.example.com"]).await;
    mount_doh_nxdomain(&server).await;

    let analyzer = create_test_analyzer(&server, vec![crtsh_source(&server)]).await;
    assert!(analyzer.stats().is_none());

    let first = analyzer.start_analysis("example.com").await.unwrap();
    let second = analyzer.start_analysis("example.com").await.unwrap();

    // The processed set is per run, so the name is analyzed again.
    assert_eq!(first.stats.subdomains_analyzed, 1);
    assert_eq!(second.stats.subdomains_analyzed, 1);
    assert_eq!(second.historical.len(), 1);
    assert_eq!(analyzer.stats().unwrap().api_calls, 1);

    analyzer.reset_state();
    assert!(analyzer.stats().is_none());
    assert!(analyzer.historical_records().is_empty());
}

#[tokio::test]
async fn test_invalid_domain_is_rejected() {
    let server = MockServer::start().await;
    let analyzer = create_test_analyzer(&server, vec![crtsh_source(&server)]).await;

    let result = analyzer.start_analysis("not a domain").await;
    assert!(result.is_err());
    assert!(analyzer.stats().is_none());
}
