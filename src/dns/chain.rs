//! CNAME chain following.

use serde::Serialize;

use crate::config::MAX_CNAME_HOPS;
use crate::utils::strip_trailing_dot;

use super::records::RecordType;
use super::resolver::DnsResolver;

/// One step in a CNAME chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CnameHop {
    pub from: String,
    /// Target with the trailing dot removed
    pub to: String,
    pub ttl: u32,
}

/// Ordered hops from the queried name, at most `MAX_CNAME_HOPS` long.
pub type CnameChain = Vec<CnameHop>;

/// Follows CNAME records starting at `start`.
///
/// Stops when a name has no CNAME, when resolution fails, or after
/// `MAX_CNAME_HOPS` hops. Loops are not detected, only truncated.
pub async fn follow_chain(resolver: &DnsResolver, start: &str) -> CnameChain {
    let mut chain = CnameChain::new();
    let mut current = start.to_string();

    while chain.len() < MAX_CNAME_HOPS {
        let Some(records) = resolver
            .query(&current, Some(RecordType::Cname), None)
            .await
        else {
            break;
        };

        let Some(cname) = records
            .iter()
            .find(|record| record.record_type == RecordType::Cname)
        else {
            break;
        };

        let target = strip_trailing_dot(&cname.data).to_string();
        chain.push(CnameHop {
            from: current,
            to: target.clone(),
            ttl: cname.ttl,
        });
        current = target;
    }

    if chain.len() == MAX_CNAME_HOPS {
        log::debug!("CNAME chain for {start} truncated at {MAX_CNAME_HOPS} hops");
    }

    chain
}
