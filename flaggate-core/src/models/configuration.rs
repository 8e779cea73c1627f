//! Client configuration data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Logging level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "info")]
    #[default]
    Info,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Options consumed once when a factory is built.
///
/// Shared read-only with the factory after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfiguration {
    /// Base URL the synchronization engine fetches rule snapshots from
    pub sdk_endpoint: String,
    /// Seconds between rule refreshes
    pub features_refresh_secs: u64,
    /// Seconds between segment membership refreshes
    pub segments_refresh_secs: u64,
    /// Per-request connection timeout in milliseconds
    pub connection_timeout_ms: u64,
    /// How long the command line waits for readiness before evaluating (None = don't wait)
    pub ready_timeout_ms: Option<u64>,
    /// Logging verbosity level
    pub log_level: LogLevel,
}

impl Default for ClientConfiguration {
    fn default() -> Self {
        Self {
            sdk_endpoint: "https://sdk.split.io/api".to_string(),
            features_refresh_secs: 60,
            segments_refresh_secs: 60,
            connection_timeout_ms: 15_000,
            ready_timeout_ms: None,
            log_level: LogLevel::Info,
        }
    }
}

impl ClientConfiguration {
    /// Load configuration from file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: ClientConfiguration = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Return default configuration if file doesn't exist
            Ok(ClientConfiguration::default())
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn default_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir().ok_or("Could not determine config directory")?;
        Ok(config_dir.join("flaggate").join("config.toml"))
    }

    /// Snapshot polling interval; rules and segments arrive together, so the shorter wins
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.features_refresh_secs.min(self.segments_refresh_secs))
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    pub fn ready_timeout(&self) -> Option<Duration> {
        self.ready_timeout_ms.map(Duration::from_millis)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = validate_endpoint(&self.sdk_endpoint) {
            errors.push(format!("sdk_endpoint {}", e));
        }

        if self.features_refresh_secs == 0 {
            errors.push("features_refresh_secs must be at least 1".to_string());
        }
        if self.segments_refresh_secs == 0 {
            errors.push("segments_refresh_secs must be at least 1".to_string());
        }

        if self.connection_timeout_ms == 0 {
            errors.push("connection_timeout_ms must be greater than 0".to_string());
        }

        if self.ready_timeout_ms == Some(0) {
            errors.push("ready_timeout_ms must be greater than 0 when set".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Endpoints must be absolute http(s) URLs
fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    let parsed = url::Url::parse(endpoint.trim()).map_err(|e| format!("is not a valid URL: {}", e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("must use http or https, got {}", scheme)),
    }
}
