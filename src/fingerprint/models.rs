//! Data structures for service fingerprint rules.
//!
//! - `ServiceDescriptor`: what a CNAME target was identified as
//! - `MatchRule`: one substring predicate plus the descriptor it yields
//! - `RuleTable`: an ordered, versioned list of rules
//! - `RulesFile`: the on-disk JSON shape for extra rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of an identified third-party service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Security,
    Email,
    Cloud,
    Analytics,
    Feedback,
    Documentation,
    Other,
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceCategory::Security => "security",
            ServiceCategory::Email => "email",
            ServiceCategory::Cloud => "cloud",
            ServiceCategory::Analytics => "analytics",
            ServiceCategory::Feedback => "feedback",
            ServiceCategory::Documentation => "documentation",
            ServiceCategory::Other => "other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub category: ServiceCategory,
    pub description: String,
}

/// A rule matches when the lower-cased host contains any `any_of` fragment
/// and every `all_of` fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRule {
    #[serde(deserialize_with = "deserialize_string_or_array")]
    pub any_of: Vec<String>,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_or_array")]
    pub all_of: Vec<String>,
    /// Ordering hint for rules loaded from a file; higher sorts first
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(flatten)]
    pub service: ServiceDescriptor,
}

impl MatchRule {
    pub(crate) fn new(
        any_of: &[&str],
        all_of: &[&str],
        name: &str,
        category: ServiceCategory,
        description: &str,
    ) -> Self {
        MatchRule {
            any_of: any_of.iter().map(|s| s.to_string()).collect(),
            all_of: all_of.iter().map(|s| s.to_string()).collect(),
            priority: None,
            service: ServiceDescriptor {
                name: name.to_string(),
                category,
                description: description.to_string(),
            },
        }
    }

    /// Lower-cases every fragment so matching only has to lower-case the host.
    pub(crate) fn normalized(mut self) -> Self {
        for fragment in self.any_of.iter_mut().chain(self.all_of.iter_mut()) {
            *fragment = fragment.to_ascii_lowercase();
        }
        self
    }

    /// A rule needs at least one non-blank `any_of` fragment; an empty
    /// fragment would match every host.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.any_of.is_empty()
            && self
                .any_of
                .iter()
                .chain(self.all_of.iter())
                .all(|fragment| !fragment.trim().is_empty())
    }

    /// `host` must already be lower-case.
    pub fn matches(&self, host: &str) -> bool {
        self.any_of.iter().any(|fragment| host.contains(fragment.as_str()))
            && self.all_of.iter().all(|fragment| host.contains(fragment.as_str()))
    }
}

/// Ordered rule list; the first matching rule wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleTable {
    pub version: String,
    pub rules: Vec<MatchRule>,
}

impl RuleTable {
    pub fn find(&self, host: &str) -> Option<&ServiceDescriptor> {
        let host = host.trim().to_ascii_lowercase();
        if host.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(&host))
            .map(|rule| &rule.service)
    }

    /// New table with `extra` placed ahead of this table's rules.
    ///
    /// `extra` is sorted by descending priority (missing priority counts as
    /// zero); the sort is stable so equal priorities keep file order.
    pub(crate) fn prepend(&self, extra: Vec<MatchRule>, extra_version: &str) -> RuleTable {
        let mut extra: Vec<MatchRule> = extra.into_iter().map(MatchRule::normalized).collect();
        extra.sort_by_key(|rule| std::cmp::Reverse(rule.priority.unwrap_or(0)));

        let mut rules = extra;
        rules.extend(self.rules.iter().cloned());
        RuleTable {
            version: format!("{}+{}", self.version, extra_version),
            rules,
        }
    }
}

/// JSON rules file: `{"version": "...", "service": [...], "infrastructure": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesFile {
    #[serde(default = "default_rules_version")]
    pub version: String,
    #[serde(default)]
    pub service: Vec<MatchRule>,
    #[serde(default)]
    pub infrastructure: Vec<MatchRule>,
}

fn default_rules_version() -> String {
    "local".to_string()
}

/// Deserializes a field that can be either a string or an array of strings
fn deserialize_string_or_array<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct StringOrArrayVisitor;

    impl<'de> Visitor<'de> for StringOrArrayVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or an array of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(elem) = seq.next_element::<String>()? {
                vec.push(elem);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrArrayVisitor)
}
