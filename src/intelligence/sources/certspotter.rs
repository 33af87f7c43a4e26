//! Cert Spotter certificate transparency API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{CERTSPOTTER_BASE_URL, UNKNOWN};
use crate::error_handling::ProviderError;
use crate::intelligence::types::{id_to_string, Candidate, CertificateInfo};

use super::{get_text, IntelligenceSource};

#[derive(Debug, Deserialize)]
struct Issuance {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    dns_names: Vec<String>,
    #[serde(default)]
    issuer: Option<Issuer>,
    #[serde(default)]
    not_before: Option<String>,
    #[serde(default)]
    not_after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Issuer {
    #[serde(default)]
    name: Option<String>,
}

pub struct CertSpotter {
    base_url: String,
}

impl CertSpotter {
    pub fn new(base_url: impl Into<String>) -> Self {
        CertSpotter {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for CertSpotter {
    fn default() -> Self {
        Self::new(CERTSPOTTER_BASE_URL)
    }
}

#[async_trait]
impl IntelligenceSource for CertSpotter {
    fn name(&self) -> &str {
        "Cert Spotter"
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        domain: &str,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let url = format!(
            "{}/v1/issuances?domain={domain}&include_subdomains=true&expand=dns_names",
            self.base_url
        );
        let body = get_text(client, &url, true).await?;
        let issuances: Vec<Issuance> = serde_json::from_str(&body)?;

        let mut candidates = Vec::new();
        for issuance in issuances {
            let certificate = CertificateInfo {
                issuer: issuance
                    .issuer
                    .and_then(|issuer| issuer.name)
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                not_before: issuance.not_before,
                not_after: issuance.not_after,
                certificate_id: id_to_string(issuance.id),
            };
            candidates.extend(issuance.dns_names.into_iter().map(|name| Candidate {
                name,
                certificate: Some(certificate.clone()),
            }));
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_attaches_issuer_to_every_dns_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/issuances"))
            .and(query_param("domain", "example.com"))
            .and(query_param("include_subdomains", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "3202001",
                "dns_names": ["example.com", "vpn.example.com"],
                "issuer": {"name": "C=US, O=DigiCert Inc"},
                "not_before": "2022-02-01T00:00:00Z",
                "not_after": "2023-02-01T23:59:59Z"
            }])))
            .mount(&server)
            .await;

        let source = CertSpotter::new(server.uri());
        let candidates = source
            .fetch(&reqwest::Client::new(), "example.com")
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].name, "vpn.example.com");
        let certificate = candidates[1].certificate.as_ref().unwrap();
        assert_eq!(certificate.issuer, "C=US, O=DigiCert Inc");
        assert_eq!(certificate.certificate_id.as_deref(), Some("3202001"));
        assert_eq!(certificate.not_after.as_deref(), Some("2023-02-01T23:59:59Z"));
    }

    #[tokio::test]
    async fn test_fetch_reports_rate_limit_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = CertSpotter::new(server.uri())
            .fetch(&reqwest::Client::new(), "example.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Service unavailable (429)");
    }
}
