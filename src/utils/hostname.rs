//! Hostname normalization helpers.

/// Removes a single trailing dot from a fully-qualified name.
pub fn strip_trailing_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Compares two hostnames ignoring case and a trailing dot.
pub fn same_host(a: &str, b: &str) -> bool {
    strip_trailing_dot(a.trim()).eq_ignore_ascii_case(strip_trailing_dot(b.trim()))
}

/// Returns `true` if `candidate` looks like an IPv4 literal.
pub fn is_ipv4_literal(candidate: &str) -> bool {
    candidate.parse::<std::net::Ipv4Addr>().is_ok()
}
