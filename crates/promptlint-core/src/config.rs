//! `promptlint.yaml` loading.

use crate::errors::{ConfigError, ConfigResult};
use crate::lint::engine::LintOptions;
use crate::lint::rules::rule_by_id;
use crate::lint::Severity;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "promptlint.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    #[serde(default)]
    pub min_severity: Option<Severity>,
    /// Lowest severity that makes a lint run fail.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_fail_on() -> Severity {
    Severity::Warning
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            disabled_rules: Vec::new(),
            min_severity: None,
            fail_on: default_fail_on(),
        }
    }
}

impl LintConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            disabled = config.disabled_rules.len(),
            "loaded lint config"
        );
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> ConfigResult<Self> {
        // An empty file is a valid, all-defaults config.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: LintConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_CONFIG_VERSION,
            });
        }
        if let Some(unknown) = self
            .disabled_rules
            .iter()
            .find(|id| rule_by_id(id).is_none())
        {
            return Err(ConfigError::UnknownRule {
                rule_id: unknown.clone(),
            });
        }
        Ok(())
    }

    pub fn lint_options(&self) -> LintOptions {
        LintOptions {
            disabled_rules: self.disabled_rules.iter().cloned().collect(),
            min_severity: self.min_severity,
        }
    }
}
