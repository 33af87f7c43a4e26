//! AlienVault OTX passive DNS.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::OTX_BASE_URL;
use crate::error_handling::ProviderError;
use crate::intelligence::types::Candidate;

use super::{get_text, IntelligenceSource};

#[derive(Debug, Deserialize)]
struct PassiveDnsResponse {
    #[serde(default)]
    passive_dns: Vec<PassiveDnsEntry>,
}

#[derive(Debug, Deserialize)]
struct PassiveDnsEntry {
    #[serde(default)]
    hostname: Option<String>,
}

pub struct Otx {
    base_url: String,
}

impl Otx {
    pub fn new(base_url: impl Into<String>) -> Self {
        Otx {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Otx {
    fn default() -> Self {
        Self::new(OTX_BASE_URL)
    }
}

#[async_trait]
impl IntelligenceSource for Otx {
    fn name(&self) -> &str {
        "OTX AlienVault"
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        domain: &str,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let url = format!(
            "{}/api/v1/indicators/domain/{domain}/passive_dns",
            self.base_url
        );
        let body = get_text(client, &url, true).await?;
        let response: PassiveDnsResponse = serde_json::from_str(&body)?;

        Ok(response
            .passive_dns
            .into_iter()
            .filter_map(|entry| entry.hostname)
            .map(Candidate::plain)
            .collect())
    }
}
