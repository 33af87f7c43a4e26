//! crt.sh certificate transparency search.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::CRTSH_BASE_URL;
use crate::error_handling::ProviderError;
use crate::intelligence::types::{id_to_string, Candidate, CertificateInfo};

use super::{get_text, IntelligenceSource};

#[derive(Debug, Deserialize)]
struct CrtShEntry {
    #[serde(default)]
    name_value: Option<String>,
    #[serde(default)]
    issuer_name: Option<String>,
    #[serde(default)]
    not_before: Option<String>,
    #[serde(default)]
    not_after: Option<String>,
    #[serde(default)]
    id: Option<serde_json::Value>,
}

pub struct CrtSh {
    base_url: String,
}

impl CrtSh {
    pub fn new(base_url: impl Into<String>) -> Self {
        CrtSh {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for CrtSh {
    fn default() -> Self {
        Self::new(CRTSH_BASE_URL)
    }
}

#[async_trait]
impl IntelligenceSource for CrtSh {
    fn name(&self) -> &str {
        "crt.sh"
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        domain: &str,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let url = format!("{}/?q=%25.{domain}&output=json", self.base_url);
        let body = get_text(client, &url, true).await?;
        let entries: Vec<CrtShEntry> = serde_json::from_str(&body)?;
        Ok(parse_entries(entries))
    }
}

/// One entry may list several names separated by newlines or commas.
fn parse_entries(entries: Vec<CrtShEntry>) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for entry in entries {
        let Some(name_value) = entry.name_value.as_deref() else {
            continue;
        };
        let certificate = CertificateInfo {
            issuer: entry
                .issuer_name
                .clone()
                .unwrap_or_else(|| crate::config::UNKNOWN.to_string()),
            not_before: entry.not_before.clone(),
            not_after: entry.not_after.clone(),
            certificate_id: id_to_string(entry.id.clone()),
        };
        for name in name_value.split(['\n', ',']) {
            candidates.push(Candidate {
                name: name.to_string(),
                certificate: Some(certificate.clone()),
            });
        }
    }
    candidates
}
