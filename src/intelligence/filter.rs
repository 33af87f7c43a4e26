//! Hostname acceptance rules for discovered names.

use std::sync::LazyLock;

use regex::Regex;

static HOSTNAME_CHARS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[a-z0-9.-]+$").ok());

/// Normalizes a candidate and accepts it only if it is a proper subdomain
/// of `domain`.
///
/// Candidates are trimmed and lower-cased; they must end with `.domain`,
/// differ from `domain`, contain no wildcard and use only `[a-z0-9.-]`.
pub fn accept_candidate(raw: &str, domain: &str) -> Option<String> {
    let name = raw.trim().to_ascii_lowercase();
    let suffix = format!(".{domain}");

    let valid = name.ends_with(&suffix)
        && name.len() > suffix.len()
        && name != domain
        && !name.contains('*')
        && HOSTNAME_CHARS
            .as_ref()
            .is_some_and(|re| re.is_match(&name));

    valid.then_some(name)
}
