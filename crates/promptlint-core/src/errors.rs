//! Error types for lint configuration loading and severity parsing.
//!
//! Evaluation itself has no error type: rules abstain instead of failing.

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A disabled rule id does not exist in the registry.
    #[error("unknown rule id '{rule_id}'")]
    UnknownRule { rule_id: String },
}

/// Severity name that is not one of `info`, `suggestion` or `warning`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity '{input}' (expected info, suggestion or warning)")]
pub struct ParseSeverityError {
    pub input: String,
}
