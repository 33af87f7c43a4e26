//! CNAME target classification.

use std::path::Path;

use log::debug;

use crate::error_handling::InitializationError;

use super::local::load_rules_file;
use super::models::{RuleTable, ServiceDescriptor};
use super::rules::{BUILTIN_INFRASTRUCTURE_RULES, BUILTIN_SERVICE_RULES};

/// Maps CNAME targets to services and hosting infrastructure.
///
/// Pure lookups over two ordered tables; every method returns `None` when
/// nothing matches.
#[derive(Debug, Clone)]
pub struct ServiceClassifier {
    service: RuleTable,
    infrastructure: RuleTable,
}

impl ServiceClassifier {
    /// Classifier over the built-in tables only.
    pub fn new() -> Self {
        ServiceClassifier {
            service: BUILTIN_SERVICE_RULES.clone(),
            infrastructure: BUILTIN_INFRASTRUCTURE_RULES.clone(),
        }
    }

    /// Classifier with the rules from `path` placed ahead of the built-ins.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::RulesFileError` if the file cannot be
    /// read or parsed.
    pub async fn with_rules_file(path: &Path) -> Result<Self, InitializationError> {
        let file = load_rules_file(path)
            .await
            .map_err(|e| InitializationError::RulesFileError(format!("{e:#}")))?;

        Ok(ServiceClassifier {
            service: BUILTIN_SERVICE_RULES.prepend(file.service, &file.version),
            infrastructure: BUILTIN_INFRASTRUCTURE_RULES.prepend(file.infrastructure, &file.version),
        })
    }

    /// Service behind the first hop of a CNAME chain.
    pub fn match_service(&self, host: &str) -> Option<ServiceDescriptor> {
        self.service.find(host).cloned()
    }

    /// Hosting infrastructure behind the last hop of a CNAME chain.
    pub fn match_infrastructure(&self, host: &str) -> Option<ServiceDescriptor> {
        self.infrastructure.find(host).cloned()
    }

    /// Single-hop lookup used when no chain could be followed: the service
    /// table first, then the infrastructure table.
    pub fn match_cname_service(&self, host: &str) -> Option<ServiceDescriptor> {
        let matched = self
            .match_service(host)
            .or_else(|| self.match_infrastructure(host));
        debug!(
            "Single-hop classification of {host}: {}",
            matched.as_ref().map(|s| s.name.as_str()).unwrap_or("none")
        );
        matched
    }

    pub fn service_rules(&self) -> &RuleTable {
        &self.service
    }

    pub fn infrastructure_rules(&self) -> &RuleTable {
        &self.infrastructure
    }
}

impl Default for ServiceClassifier {
    fn default() -> Self {
        Self::new()
    }
}
