//! IP to ASN lookups across providers.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::ACCEPT;

use crate::error_handling::ProviderError;

use super::providers::AsnProvider;
use super::types::{AsnInfo, RawAsnResponse, VendorClassification};
use super::vendor::classify_vendor;

/// Looks up ASN ownership through an ordered list of providers.
///
/// The first usable response wins. Lookup never fails: if every provider
/// errors or answers without ASN/organization data, the result is
/// all-`Unknown`.
pub struct AsnLookup {
    client: Arc<reqwest::Client>,
    providers: Vec<AsnProvider>,
}

impl AsnLookup {
    pub fn new(client: Arc<reqwest::Client>, providers: Vec<AsnProvider>) -> Self {
        AsnLookup { client, providers }
    }

    pub async fn lookup(&self, ip: &str) -> AsnInfo {
        for provider in &self.providers {
            match self.query_provider(provider, ip).await {
                Ok(info) => {
                    debug!("ASN info for {ip} from {}: {info:?}", provider.name());
                    return info;
                }
                Err(e) => {
                    warn!("ASN provider {} failed for {ip}: {e}", provider.name());
                }
            }
        }

        warn!("All ASN providers failed for {ip}");
        AsnInfo::default()
    }

    /// Looks up `ip` and classifies its hosting vendor.
    pub async fn classify_ip(&self, ip: &str) -> VendorClassification {
        classify_vendor(&self.lookup(ip).await)
    }

    async fn query_provider(
        &self,
        provider: &AsnProvider,
        ip: &str,
    ) -> Result<AsnInfo, ProviderError> {
        let response = self
            .client
            .get(provider.url_for(ip))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::status(status));
        }

        let body = response.text().await?;
        let raw: RawAsnResponse = serde_json::from_str(&body)?;
        if !raw.is_usable() {
            return Err(ProviderError::Unusable(
                "no asn, org or as field".to_string(),
            ));
        }
        Ok(provider.normalize(raw))
    }
}
