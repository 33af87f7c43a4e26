//! Passive subdomain intelligence sources.
//!
//! Each source queries one public dataset and returns raw hostname
//! candidates; filtering and deduplication happen in the aggregator.

mod certspotter;
mod crtsh;
mod hackertarget;
mod otx;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error_handling::ProviderError;

use super::types::Candidate;

pub use certspotter::CertSpotter;
pub use crtsh::CrtSh;
pub use hackertarget::HackerTarget;
pub use otx::Otx;

/// A public dataset that can list hostnames under a domain.
#[async_trait]
pub trait IntelligenceSource: Send + Sync {
    /// Label used in events and discovery provenance
    fn name(&self) -> &str;

    /// Fetches raw candidates for `domain`.
    async fn fetch(
        &self,
        client: &reqwest::Client,
        domain: &str,
    ) -> Result<Vec<Candidate>, ProviderError>;
}

/// crt.sh, Cert Spotter, OTX AlienVault and HackerTarget at their public
/// endpoints.
pub fn default_sources() -> Vec<Arc<dyn IntelligenceSource>> {
    vec![
        Arc::new(CrtSh::default()),
        Arc::new(CertSpotter::default()),
        Arc::new(Otx::default()),
        Arc::new(HackerTarget::default()),
    ]
}

/// GETs `url` and returns the body, mapping non-2xx statuses to errors.
pub(crate) async fn get_text(
    client: &reqwest::Client,
    url: &str,
    accept_json: bool,
) -> Result<String, ProviderError> {
    let mut request = client.get(url);
    if accept_json {
        request = request.header(reqwest::header::ACCEPT, "application/json");
    }
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::status(status));
    }
    Ok(response.text().await?)
}
