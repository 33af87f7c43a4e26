//! ASN lookup providers and their response shapes.

use crate::config::{IPAPI_CO_BASE_URL, IP_API_BASE_URL, IPINFO_BASE_URL};

use super::types::{or_unknown, AsnInfo, RawAsnResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsnProviderKind {
    /// ipinfo.io: `org`, `country`, `city`
    IpInfo,
    /// ip-api.com: `as`, `isp`, `countryCode`, `city`
    IpApi,
    /// ipapi.co: `asn`, `org`, `country_code`, `city`
    IpApiCo,
}

/// One ASN provider endpoint.
#[derive(Debug, Clone)]
pub struct AsnProvider {
    pub kind: AsnProviderKind,
    base_url: String,
}

impl AsnProvider {
    pub fn new(kind: AsnProviderKind, base_url: impl Into<String>) -> Self {
        AsnProvider {
            kind,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// ipinfo.io, ip-api.com, ipapi.co, in that order.
    pub fn defaults() -> Vec<AsnProvider> {
        vec![
            AsnProvider::new(AsnProviderKind::IpInfo, IPINFO_BASE_URL),
            AsnProvider::new(AsnProviderKind::IpApi, IP_API_BASE_URL),
            AsnProvider::new(AsnProviderKind::IpApiCo, IPAPI_CO_BASE_URL),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            AsnProviderKind::IpInfo => "ipinfo.io",
            AsnProviderKind::IpApi => "ip-api.com",
            AsnProviderKind::IpApiCo => "ipapi.co",
        }
    }

    pub fn url_for(&self, ip: &str) -> String {
        match self.kind {
            AsnProviderKind::IpInfo => format!("{}/{ip}/json", self.base_url),
            AsnProviderKind::IpApi => format!("{}/json/{ip}", self.base_url),
            AsnProviderKind::IpApiCo => format!("{}/{ip}/json/", self.base_url),
        }
    }

    /// Maps this provider's fields onto `AsnInfo`.
    pub(crate) fn normalize(&self, raw: RawAsnResponse) -> AsnInfo {
        match self.kind {
            AsnProviderKind::IpInfo => AsnInfo {
                asn: or_unknown(raw.org.clone()),
                isp: or_unknown(raw.org),
                location: or_unknown(raw.country),
                city: or_unknown(raw.city),
            },
            AsnProviderKind::IpApi => AsnInfo {
                asn: or_unknown(raw.as_name),
                isp: or_unknown(raw.isp),
                location: or_unknown(raw.country_code_camel),
                city: or_unknown(raw.city),
            },
            AsnProviderKind::IpApiCo => AsnInfo {
                asn: or_unknown(raw.asn),
                isp: or_unknown(raw.org),
                location: or_unknown(raw.country_code),
                city: or_unknown(raw.city),
            },
        }
    }
}
