//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults. It is read once at
//! startup and injected into the domain services.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default base path of the e-Stat REST API (version 3.0, XML responses).
pub const DEFAULT_ESTAT_BASE_URL: &str = "https://api.e-stat.go.jp/rest/3.0/app";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// e-Stat API access configuration.
    pub estat: EStatConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the e-Stat API.
#[derive(Clone, Serialize, Deserialize)]
pub struct EStatConfig {
    /// Application ID issued by e-Stat.
    /// Absence is not validated locally; the API rejects the call instead.
    pub app_id: Option<String>,

    /// Base URL the endpoint names are appended to.
    pub base_url: String,

    /// Timeout applied to each outbound request, in seconds.
    pub timeout_secs: u64,

    /// Attach `dataSetId` to reference dataset lookups.
    ///
    /// Off by default: the lookup has historically ignored the identifier and
    /// always returned the full dataset listing.
    pub forward_ref_dataset_id: bool,
}

/// Custom Debug implementation to redact the application ID from logs.
impl std::fmt::Debug for EStatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EStatConfig")
            .field("app_id", &self.app_id.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("forward_ref_dataset_id", &self.forward_ref_dataset_id)
            .finish()
    }
}

impl Default for EStatConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            base_url: DEFAULT_ESTAT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            forward_ref_dataset_id: false,
        }
    }
}

impl EStatConfig {
    /// Create an e-Stat configuration with the given application ID.
    pub fn with_app_id(app_id: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            ..Default::default()
        }
    }

    /// Whether an application ID has been configured.
    pub fn has_app_id(&self) -> bool {
        self.app_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Load the e-Stat section from environment variables.
    fn from_env() -> Self {
        let mut estat = Self::default();

        if let Some(app_id) = std::env::var("E_STAT_APP_ID")
            .ok()
            .filter(|id| !id.is_empty())
        {
            estat.app_id = Some(app_id);
            info!("e-Stat application ID loaded from environment");
        }

        if let Ok(base_url) = std::env::var("MCP_ESTAT_BASE_URL") {
            estat.base_url = base_url;
            info!("e-Stat base URL overridden: {}", estat.base_url);
        }

        if let Ok(timeout) = std::env::var("MCP_ESTAT_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => estat.timeout_secs = secs,
                Err(_) => warn!(
                    "Invalid MCP_ESTAT_TIMEOUT_SECS '{}', using default of {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        if let Ok(forward) = std::env::var("MCP_ESTAT_FORWARD_REF_DATASET_ID") {
            estat.forward_ref_dataset_id = forward.parse().unwrap_or(false);
            info!(
                "Reference dataset ID forwarding: {}",
                estat.forward_ref_dataset_id
            );
        }

        estat
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "estat-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            estat: EStatConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a default configuration pointing at the given e-Stat settings.
    pub fn with_estat(estat: EStatConfig) -> Self {
        Self {
            estat,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured. Server settings use
    /// the `MCP_` prefix; the application ID uses `E_STAT_APP_ID`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.estat = EStatConfig::from_env();

        config
    }
}
