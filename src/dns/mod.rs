//! DNS resolution over HTTPS.
//!
//! This module provides:
//! - Record types and the JSON DoH wire format
//! - Provider adapters (Google, Cloudflare, DoH.pub, AliDNS, generic)
//! - A rate-limited resolver with ordered provider fallback
//! - CNAME chain following
//! - SPF/DMARC extraction and the main-domain profile

mod chain;
mod extract;
mod main_domain;
mod provider;
mod records;
mod resolver;

// Re-export public API
pub use chain::{follow_chain, CnameChain, CnameHop};
pub use extract::{extract_dmarc_records, extract_spf_records};
pub use main_domain::{analyze_main_domain, MainDomainProfile};
pub use provider::{parse_endpoints, DohEndpoint, ProviderKind};
pub use records::{RecordType, ResolvedRecord};
pub use resolver::{DnsResolver, Resolution};
