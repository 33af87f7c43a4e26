//! ASN and vendor data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::UNKNOWN;

/// Network ownership of an IP, normalized across providers.
///
/// Fields no provider could fill hold `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsnInfo {
    pub asn: String,
    pub isp: String,
    /// Country code or name, as the provider reported it
    pub location: String,
    pub city: String,
}

impl Default for AsnInfo {
    fn default() -> Self {
        AsnInfo {
            asn: UNKNOWN.to_string(),
            isp: UNKNOWN.to_string(),
            location: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
        }
    }
}

impl AsnInfo {
    /// Organization string used for vendor matching: the ISP, else the ASN.
    pub fn organization(&self) -> Option<&str> {
        [self.isp.as_str(), self.asn.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|value| !value.is_empty() && *value != UNKNOWN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorCategory {
    Cloud,
    #[serde(rename = "CDN")]
    Cdn,
    Other,
    Unknown,
}

impl fmt::Display for VendorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VendorCategory::Cloud => "Cloud",
            VendorCategory::Cdn => "CDN",
            VendorCategory::Other => "Other",
            VendorCategory::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Hosting vendor behind an IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorClassification {
    pub vendor: String,
    pub category: VendorCategory,
}

impl Default for VendorClassification {
    fn default() -> Self {
        VendorClassification {
            vendor: UNKNOWN.to_string(),
            category: VendorCategory::Unknown,
        }
    }
}

/// Union of the fields the supported ASN providers return.
///
/// Each provider fills a different subset; see `AsnProviderKind::normalize`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawAsnResponse {
    pub asn: Option<String>,
    pub org: Option<String>,
    #[serde(rename = "as")]
    pub as_name: Option<String>,
    pub isp: Option<String>,
    pub country: Option<String>,
    /// ipapi.co
    pub country_code: Option<String>,
    /// ip-api.com
    #[serde(rename = "countryCode")]
    pub country_code_camel: Option<String>,
    pub city: Option<String>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl RawAsnResponse {
    /// A response is usable when it names an ASN or an organization.
    pub(crate) fn is_usable(&self) -> bool {
        present(&self.asn) || present(&self.org) || present(&self.as_name)
    }
}

/// Fills an `AsnInfo` field, falling back to `"Unknown"`.
pub(crate) fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
