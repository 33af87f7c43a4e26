//! Takeover finding types.

use serde::Serialize;

/// Severity attached to a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
        }
    }
}

/// A subdomain whose CNAME points at a target that no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TakeoverFinding {
    pub subdomain: String,
    pub cname: String,
    pub risk: RiskLevel,
    pub description: String,
}
