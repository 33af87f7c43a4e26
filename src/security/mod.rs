//! Subdomain takeover detection.
//!
//! A subdomain whose CNAME points at a name that no longer resolves can
//! often be claimed by whoever registers the target (an abandoned Heroku
//! app, a deleted S3 bucket). Such subdomains are reported as high risk.

mod takeover;
mod types;

pub use takeover::{check_takeover, DANGLING_CNAME_DESCRIPTION};
pub use types::{RiskLevel, TakeoverFinding};
