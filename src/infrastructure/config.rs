//! Configuration infrastructure
//!
//! Small two-section configuration: fetch behavior and logging. Defaults are
//! usable as-is; a JSON file can override them. The loaded configuration is
//! immutable for the process lifetime.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP fetch behavior
    pub fetch: FetchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Fetch behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Hard deadline for the single fetch attempt, in seconds
    pub timeout_seconds: u64,

    /// User agent sent with every request. Plantix rejects default library
    /// client identifiers, so this must look like a real browser.
    pub user_agent: String,

    /// Whether to follow redirects (bounded to 10 hops)
    pub follow_redirects: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            follow_redirects: true,
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, falling back to defaults when the
    /// file does not exist
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_pipeline_contract() {
        let config = AppConfig::default();
        assert_eq!(config.fetch.timeout_seconds, 10);
        assert!(config.fetch.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            tokio_test::block_on(AppConfig::load("/nonexistent/plantix-live.json")).unwrap();
        assert_eq!(config.fetch.timeout_seconds, 10);
    }

    #[tokio::test]
    async fn partial_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"fetch": {{"timeout_seconds": 3}}}}"#).unwrap();

        let config = AppConfig::load(file.path()).await.unwrap();
        assert_eq!(config.fetch.timeout_seconds, 3);
        // Untouched sections keep their defaults
        assert!(config.fetch.follow_redirects);
        assert_eq!(config.logging.level, "info");
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(AppConfig::load(file.path()).await.is_err());
    }
}
