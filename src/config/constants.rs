//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including provider endpoints, rate limits, timeouts, and the fallback
//! subdomain dictionary.

// Rate limiting
/// Maximum DNS queries allowed inside one sliding window
pub const RATE_LIMIT_MAX_REQUESTS: usize = 10;
/// Sliding window length in milliseconds for DNS query throttling
pub const RATE_LIMIT_WINDOW_MS: u64 = 1000;

// Network operation timeouts
/// Per-request HTTP timeout in seconds (DoH, intelligence sources, ASN lookups)
pub const HTTP_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for outbound API requests.
pub const DEFAULT_USER_AGENT: &str = "attack_surface/0.1 (+passive reconnaissance)";

// DNS-over-HTTPS
/// Primary DoH providers, queried in this order.
pub const DEFAULT_DOH_PROVIDERS: &[&str] = &[
    "https://dns.google/resolve",
    "https://cloudflare-dns.com/dns-query",
];
/// Accept header value for JSON DoH APIs
pub const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

// CNAME chains
/// Maximum hops followed in a CNAME chain, whether or not it terminates
pub const MAX_CNAME_HOPS: usize = 10;

// Intelligence sources
pub const CRTSH_BASE_URL: &str = "https://crt.sh";
pub const CERTSPOTTER_BASE_URL: &str = "https://api.certspotter.com";
pub const OTX_BASE_URL: &str = "https://otx.alienvault.com";
pub const HACKERTARGET_BASE_URL: &str = "https://api.hackertarget.com";

/// Source label used for names found by dictionary probing
pub const COMMON_PATTERNS_SOURCE: &str = "Common Patterns";

/// Labels probed when every intelligence source comes back empty.
pub const COMMON_SUBDOMAIN_LABELS: &[&str] = &[
    "www", "mail", "ftp", "admin", "blog", "api", "dev", "test", "staging", "cdn", "static",
    "assets", "img", "images", "media", "support", "help", "docs", "wiki", "forum", "shop",
    "store",
];

// ASN providers
pub const IPINFO_BASE_URL: &str = "https://ipinfo.io";
pub const IP_API_BASE_URL: &str = "http://ip-api.com";
pub const IPAPI_CO_BASE_URL: &str = "https://ipapi.co";

/// Placeholder for fields no provider could fill
pub const UNKNOWN: &str = "Unknown";

// Pipeline keyword heuristics
/// Name fragments that make a TXT lookup worthwhile
pub const TXT_HINT_KEYWORDS: &[&str] = &["verify", "auth", "security"];
/// Name fragments that make an MX lookup worthwhile
pub const MX_HINT_KEYWORDS: &[&str] = &["mail", "smtp", "email", "mx"];

/// Capacity of the event channel handed out by `ChannelObserver::channel`
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;
