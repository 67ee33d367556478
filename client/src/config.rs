//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use vaultlink_protocol::version::{
    DEFAULT_BRANCH_ID, DEFAULT_BUILD_ID, DEFAULT_BUILD_TYPE, LIVE_PRODUCT_ID,
};
use vaultlink_protocol::ClientInfo;
use vaultlink_types::Guid;

use crate::{ClientError, LogFormat};

/// Configuration for an [`AuthClient`](crate::AuthClient).
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Auth server host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Auth server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Build id announced in the register request.
    #[serde(default = "default_build_id")]
    pub build_id: u32,

    #[serde(default = "default_build_type")]
    pub build_type: u32,

    #[serde(default = "default_branch_id")]
    pub branch_id: u32,

    /// Product GUID announced in the register request.
    #[serde(default = "default_product_id")]
    pub product_id: Guid,

    /// Seconds a request may stay unanswered before it is expired.
    #[serde(default = "default_transaction_timeout_secs")]
    pub transaction_timeout_secs: u64,

    /// How often the service sweeps for expired transactions.
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,

    /// Capacity of the service's input queue.
    #[serde(default = "default_command_queue_size")]
    pub command_queue_size: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    14617
}

fn default_build_id() -> u32 {
    DEFAULT_BUILD_ID
}

fn default_build_type() -> u32 {
    DEFAULT_BUILD_TYPE
}

fn default_branch_id() -> u32 {
    DEFAULT_BRANCH_ID
}

fn default_product_id() -> Guid {
    LIVE_PRODUCT_ID
}

fn default_transaction_timeout_secs() -> u64 {
    60
}

fn default_sweep_interval_ms() -> u64 {
    1000
}

fn default_command_queue_size() -> usize {
    256
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ClientError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ClientError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ClientError> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn client_info(&self) -> ClientInfo {
        ClientInfo {
            build_id: self.build_id,
            build_type: self.build_type,
            branch_id: self.branch_id,
            product_id: self.product_id,
        }
    }

    pub fn transaction_timeout(&self) -> Duration {
        Duration::from_secs(self.transaction_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms.max(1))
    }

    /// Unrecognized formats fall back to human-readable output.
    pub fn log_format(&self) -> LogFormat {
        match self.log_format.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            build_id: default_build_id(),
            build_type: default_build_type(),
            branch_id: default_branch_id(),
            product_id: default_product_id(),
            transaction_timeout_secs: default_transaction_timeout_secs(),
            sweep_interval_ms: default_sweep_interval_ms(),
            command_queue_size: default_command_queue_size(),
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
        let config = ClientConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = ClientConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.product_id, config.product_id);
        assert_eq!(parsed.transaction_timeout_secs, 60);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 14617);
        assert_eq!(config.log_format(), LogFormat::Human);
        assert_eq!(config.client_info(), ClientInfo::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            host = "auth.example.net"
            port = 8080
            product_id = "00000000-0000-0000-0000-000000000001"
            log_format = "json"
        "#;
        let config = ClientConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.host, "auth.example.net");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(
            config.product_id.to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
        assert_eq!(config.build_type, 50); // default
    }

    #[test]
    fn bad_guid_is_a_config_error() {
        let result = ClientConfig::from_toml_str(r#"product_id = "nope""#);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("vaultlink.toml");
        std::fs::write(&path, "port = 1234\ntransaction_timeout_secs = 5\n").unwrap();
        let config = ClientConfig::from_toml_file(path.to_str().unwrap()).expect("load");
        assert_eq!(config.port, 1234);
        assert_eq!(config.transaction_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ClientConfig::from_toml_file("/nonexistent/vaultlink.toml");
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
