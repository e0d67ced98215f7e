//! Build and logging configuration.
//!
//! # Invariants
//! - Every field has a default, so partial documents deserialize.
//! - `LoggingConfig::from_env` never fails; unset variables keep defaults.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};

const LOG_LEVEL_ENV: &str = "FLUENTMAP_LOG_LEVEL";
const LOG_DIR_ENV: &str = "FLUENTMAP_LOG_DIR";

/// Options for `PersistenceInstructions::build_mappings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Require every top-level class to map an id or composite id.
    pub validate_identity: bool,
    /// Append the built-in naming conventions after user conventions.
    pub default_conventions: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            validate_identity: true,
            default_conventions: false,
        }
    }
}

/// Logging backend settings consumed by `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rotated log files; logging stays off when
    /// empty.
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: String::new(),
        }
    }
}

impl LoggingConfig {
    /// Reads `FLUENTMAP_LOG_LEVEL` and `FLUENTMAP_LOG_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(level) = non_empty_env(LOG_LEVEL_ENV) {
            config.level = level;
        }
        if let Some(log_dir) = non_empty_env(LOG_DIR_ENV) {
            config.log_dir = log_dir;
        }
        config
    }

    /// Whether a log directory is configured.
    pub fn is_enabled(&self) -> bool {
        !self.log_dir.trim().is_empty()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{BuildOptions, LoggingConfig};
    use crate::logging::default_log_level;

    #[test]
    fn build_options_default_to_validation_without_builtins() {
        let options = BuildOptions::default();
        assert!(options.validate_identity);
        assert!(!options.default_conventions);
    }

    #[test]
    fn logging_config_defaults_to_disabled() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, default_log_level());
        assert!(!config.is_enabled());
    }
}
