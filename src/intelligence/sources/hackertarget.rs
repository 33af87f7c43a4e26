//! HackerTarget host search (CSV: `hostname,ip` per line).

use async_trait::async_trait;

use crate::config::HACKERTARGET_BASE_URL;
use crate::error_handling::ProviderError;
use crate::intelligence::types::Candidate;

use super::{get_text, IntelligenceSource};

pub struct HackerTarget {
    base_url: String,
}

impl HackerTarget {
    pub fn new(base_url: impl Into<String>) -> Self {
        HackerTarget {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for HackerTarget {
    fn default() -> Self {
        Self::new(HACKERTARGET_BASE_URL)
    }
}

#[async_trait]
impl IntelligenceSource for HackerTarget {
    fn name(&self) -> &str {
        "HackerTarget"
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        domain: &str,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let url = format!("{}/hostsearch/?q={domain}", self.base_url);
        let body = get_text(client, &url, false).await?;
        parse_hostsearch(&body)
    }
}

/// Errors come back as a single plain-text line with status 200.
fn parse_hostsearch(body: &str) -> Result<Vec<Candidate>, ProviderError> {
    let trimmed = body.trim();
    if !trimmed.contains(',') {
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("error") || lowered.starts_with("api count") {
            return Err(ProviderError::Unusable(trimmed.to_string()));
        }
    }

    Ok(body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| line.split(',').next())
        .map(Candidate::plain)
        .collect())
}
