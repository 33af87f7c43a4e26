//! Loading extra rules from a local JSON file.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tokio::fs;

use super::models::RulesFile;

/// Reads and parses a rules file.
pub(crate) async fn load_rules_file(path: &Path) -> Result<RulesFile> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read rules file {}", path.display()))?;
    let rules: RulesFile =
        serde_json::from_str(&content).context("Failed to parse rules JSON")?;

    let sections = [("service", &rules.service), ("infrastructure", &rules.infrastructure)];
    for (section, section_rules) in sections {
        if let Some(rule) = section_rules.iter().find(|rule| !rule.is_well_formed()) {
            bail!(
                "Rule {:?} in {section} has an empty match fragment",
                rule.service.name
            );
        }
    }

    log::info!(
        "Loaded rules file {} (version {}): {} service, {} infrastructure rules",
        path.display(),
        rules.version,
        rules.service.len(),
        rules.infrastructure.len()
    );
    Ok(rules)
}
