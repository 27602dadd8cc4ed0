//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a Shentu node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Chain the node serves. Genesis files for other chains are refused.
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Genesis file to load when none is given on the command line.
    #[serde(default)]
    pub genesis_path: Option<PathBuf>,

    /// Stop before processing any block above this height (0 = never).
    #[serde(default)]
    pub halt_height: u64,

    /// Upgrade plans this binary knows how to apply.
    #[serde(default)]
    pub upgrade_handlers: Vec<String>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_chain_id() -> String {
    "shentu-dev".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            genesis_path: None,
            halt_height: 0,
            upgrade_handlers: Vec::new(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NodeConfig {
            genesis_path: Some(PathBuf::from("/tmp/genesis.json")),
            upgrade_handlers: vec!["v2".to_string()],
            ..NodeConfig::default()
        };
        let toml_str = config.to_toml_string().expect("serializes");
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.chain_id, "shentu-dev");
        assert_eq!(config.halt_height, 0);
        assert_eq!(config.log_format().unwrap(), LogFormat::Human);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            chain_id = "shentu-2.2"
            halt_height = 120
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.chain_id, "shentu-2.2");
        assert_eq!(config.halt_height, 120);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn unknown_log_format_is_a_config_error() {
        let config = NodeConfig {
            log_format: "xml".to_string(),
            ..NodeConfig::default()
        };
        assert!(matches!(config.log_format(), Err(NodeError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("shentu.toml");
        std::fs::write(&path, "chain_id = \"shentu-file\"\nlog_format = \"json\"\n").unwrap();
        let config = NodeConfig::from_toml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.chain_id, "shentu-file");
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/shentu.toml");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }
}
