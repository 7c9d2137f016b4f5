//! Configuration for the linter engine and completion
//!
//! Reads configuration from `.zenlintrc.yaml` / `.zenlintrc.yml` /
//! `.zenlintrc.json` in the current directory, or an explicit path.

use crate::completion::CompletionLexicon;
use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Disabled rules
    pub disabled: Vec<String>,

    /// Enabled rules (empty = all)
    pub enabled: Vec<String>,

    /// Severity overrides (rule_id -> severity)
    pub severity: HashMap<String, Severity>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule configuration
    pub rules: RulesConfig,

    /// Keywords and type labels offered by completion
    pub completion: CompletionLexicon,
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the current directory, or defaults
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."))
    }

    /// Load the first config file found in `dir`, or defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let config_names = [".zenlintrc.yaml", ".zenlintrc.yml", ".zenlintrc.json"];

        for name in &config_names {
            let path: PathBuf = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }

    /// Merge CLI arguments into configuration
    pub fn merge_cli(
        &mut self,
        disabled_rules: Option<Vec<String>>,
        enabled_rules: Option<Vec<String>>,
    ) {
        if let Some(disabled) = disabled_rules {
            self.rules.disabled.extend(disabled);
        }
        if let Some(enabled) = enabled_rules {
            self.rules.enabled = enabled;
        }
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.rules.disabled.iter().any(|r| r == rule_id) {
            return false;
        }

        if !self.rules.enabled.is_empty() {
            return self.rules.enabled.iter().any(|r| r == rule_id);
        }

        true
    }

    /// Get severity override for a rule
    pub fn get_severity_override(&self, rule_id: &str) -> Option<Severity> {
        self.rules.severity.get(rule_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert!(config.rules.disabled.is_empty());
        assert!(config.is_rule_enabled("any-rule"));
        assert!(!config.completion.keywords.is_empty());
    }

    #[test]
    fn test_rule_enabled() {
        let mut config = Config::new();

        config.rules.disabled.push("empty-block".to_string());
        assert!(!config.is_rule_enabled("empty-block"));
        assert!(config.is_rule_enabled("invalid-color"));

        config.rules.enabled = vec!["invalid-color".to_string()];
        assert!(config.is_rule_enabled("invalid-color"));
        assert!(!config.is_rule_enabled("syntax-error"));
    }

    #[test]
    fn test_config_merge_cli() {
        let mut config = Config::new();
        config.merge_cli(Some(vec!["empty-condition".to_string()]), None);
        assert!(!config.is_rule_enabled("empty-condition"));

        config.merge_cli(None, Some(vec!["syntax-error".to_string()]));
        assert!(config.is_rule_enabled("syntax-error"));
        assert!(!config.is_rule_enabled("invalid-color"));
    }

    #[test]
    fn test_severity_override() {
        let mut config = Config::new();
        config
            .rules
            .severity
            .insert("empty-block".to_string(), Severity::Warning);

        assert_eq!(
            config.get_severity_override("empty-block"),
            Some(Severity::Warning)
        );
        assert_eq!(config.get_severity_override("invalid-color"), None);
    }

    #[test]
    fn test_yaml_deserialize() {
        let yaml = r#"
rules:
  disabled:
    - empty-block
  severity:
    message-endpoint: error
completion:
  keywords: [title, participant]
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.rules.disabled, vec!["empty-block"]);
        assert_eq!(
            config.get_severity_override("message-endpoint"),
            Some(Severity::Error)
        );
        assert_eq!(config.completion.keywords, vec!["title", "participant"]);
        // Unspecified lexicon sections keep their defaults
        assert!(!config.completion.types.is_empty());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".zenlintrc.json"),
            r#"{ "rules": { "enabled": ["invalid-color"] } }"#,
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert!(config.is_rule_enabled("invalid-color"));
        assert!(!config.is_rule_enabled("empty-block"));
    }

    #[test]
    fn test_load_from_empty_dir_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert!(config.is_rule_enabled("empty-block"));
    }

    #[test]
    fn test_load_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zenlint.toml");
        std::fs::write(&path, "").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
