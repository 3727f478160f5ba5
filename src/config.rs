//! Configuration for the license audit

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Main configuration for the audit process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// License policy configuration
    pub license_policy: LicensePolicy,
    /// Packages left out of the flattened dependency list
    pub ignored_dependencies: HashSet<String>,
}

/// License policy configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicensePolicy {
    /// Allowed (normalized) license identifiers. Absent means nothing is allowed.
    pub whitelist: Option<Vec<String>>,
}

impl LicensePolicy {
    /// Whitelist as a lookup set; an absent whitelist is the empty set
    pub fn whitelist_set(&self) -> HashSet<String> {
        self.whitelist.iter().flatten().cloned().collect()
    }

    /// Add an identifier to the whitelist, creating it if absent
    pub fn allow(&mut self, license: impl Into<String>) {
        self.whitelist.get_or_insert_with(Vec::new).push(license.into());
    }
}

impl AuditConfig {
    /// Create a new builder for AuditConfig
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AuditConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject whitelist entries that can never match a normalized license
    pub fn validate(&self) -> Result<()> {
        for license in self.license_policy.whitelist.iter().flatten() {
            if license.trim().is_empty() || license.trim() != license {
                return Err(AuditError::config(format!(
                    "Whitelist entry {:?} must be a non-empty identifier without surrounding whitespace",
                    license
                )));
            }
        }
        Ok(())
    }
}

/// Builder for AuditConfig
#[derive(Default)]
pub struct AuditConfigBuilder {
    license_policy: Option<LicensePolicy>,
    ignored_dependencies: HashSet<String>,
}

impl AuditConfigBuilder {
    pub fn license_policy(mut self, policy: LicensePolicy) -> Self {
        self.license_policy = Some(policy);
        self
    }

    pub fn allow_license(mut self, license: impl Into<String>) -> Self {
        self.license_policy
            .get_or_insert_with(LicensePolicy::default)
            .allow(license);
        self
    }

    pub fn ignore_dependency(mut self, name: String) -> Self {
        self.ignored_dependencies.insert(name);
        self
    }

    pub fn build(self) -> AuditConfig {
        AuditConfig {
            license_policy: self.license_policy.unwrap_or_default(),
            ignored_dependencies: self.ignored_dependencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let config = AuditConfig::from_toml_str(
            r#"
            ignored_dependencies = ["internal-tool"]

            [license_policy]
            whitelist = ["MIT", "Apache-2.0"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.license_policy.whitelist_set(),
            HashSet::from(["MIT".to_string(), "Apache-2.0".to_string()])
        );
        assert!(config.ignored_dependencies.contains("internal-tool"));
    }

    #[test]
    fn test_missing_whitelist_is_empty() {
        let config = AuditConfig::from_toml_str("").unwrap();
        assert_eq!(config.license_policy.whitelist, None);
        assert!(config.license_policy.whitelist_set().is_empty());
    }

    #[test]
    fn test_rejects_blank_entries() {
        let err = AuditConfig::from_toml_str("[license_policy]\nwhitelist = [\" MIT\"]").unwrap_err();
        assert!(matches!(err, AuditError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = AuditConfig::from_toml_str("license_policy = 3").unwrap_err();
        assert!(matches!(err, AuditError::TomlError(_)));
    }

    #[test]
    fn test_builder() {
        let config = AuditConfig::builder()
            .allow_license("MIT")
            .allow_license("ISC")
            .ignore_dependency("left-pad".to_string())
            .build();

        assert_eq!(
            config.license_policy.whitelist,
            Some(vec!["MIT".to_string(), "ISC".to_string()])
        );
        assert!(config.ignored_dependencies.contains("left-pad"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.toml");
        std::fs::write(&path, "[license_policy]\nwhitelist = [\"MIT\"]\n").unwrap();

        let config = AuditConfig::load(&path).unwrap();
        assert_eq!(config.license_policy.whitelist, Some(vec!["MIT".to_string()]));
    }
}
