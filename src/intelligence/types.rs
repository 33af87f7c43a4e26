//! Discovery data structures.

use serde::Serialize;

/// Certificate that listed a subdomain, from certificate transparency logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateInfo {
    pub issuer: String,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
    pub certificate_id: Option<String>,
}

/// A hostname reported by a source, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub certificate: Option<CertificateInfo>,
}

impl Candidate {
    pub fn plain(name: impl Into<String>) -> Self {
        Candidate {
            name: name.into(),
            certificate: None,
        }
    }
}

/// An accepted subdomain, as pushed into the discovery channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub name: String,
    pub source: String,
    pub certificate: Option<CertificateInfo>,
}

/// Renders a JSON certificate id (crt.sh uses numbers, Cert Spotter strings).
pub(crate) fn id_to_string(id: Option<serde_json::Value>) -> Option<String> {
    match id? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
