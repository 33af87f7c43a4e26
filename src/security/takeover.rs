//! Dangling-CNAME takeover detection.

use log::{debug, warn};

use crate::dns::{DnsResolver, RecordType, Resolution};
use crate::utils::strip_trailing_dot;

use super::types::{RiskLevel, TakeoverFinding};

pub const DANGLING_CNAME_DESCRIPTION: &str = "CNAME target does not resolve";

/// Flags `subdomain` when its CNAME target has no A records.
///
/// Only a successful empty answer counts as dangling. If every DoH provider
/// errors the state is unknown and no finding is produced.
pub async fn check_takeover(
    resolver: &DnsResolver,
    subdomain: &str,
    cname_target: &str,
) -> Option<TakeoverFinding> {
    let target = strip_trailing_dot(cname_target);

    match resolver.resolve(target, Some(RecordType::A), None).await {
        Resolution::Empty => {
            warn!("Possible subdomain takeover: {subdomain} -> {target} does not resolve");
            Some(TakeoverFinding {
                subdomain: subdomain.to_string(),
                cname: target.to_string(),
                risk: RiskLevel::High,
                description: DANGLING_CNAME_DESCRIPTION.to_string(),
            })
        }
        Resolution::Failed => {
            debug!("Takeover check for {subdomain} inconclusive: {target} could not be queried");
            None
        }
        Resolution::Answered(_) => None,
    }
}
