//! Service and infrastructure fingerprinting from CNAME targets.
//!
//! Classification is an ordered substring-rule lookup: the first hop of a
//! CNAME chain identifies the third-party service, the last hop identifies
//! the hosting infrastructure. Built-in tables can be extended from a JSON
//! rules file, whose rules take precedence.

mod classifier;
mod local;
mod models;
mod rules;

pub use classifier::ServiceClassifier;
pub use models::{MatchRule, RuleTable, RulesFile, ServiceCategory, ServiceDescriptor};
pub use rules::BUILTIN_RULES_VERSION;
