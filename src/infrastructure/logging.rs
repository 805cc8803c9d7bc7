//! Logging system initialization
//!
//! Console logging via tracing-subscriber. The configured level acts as the
//! default filter; a RUST_LOG environment variable overrides it.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use super::config::LoggingConfig;

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize the logging system from configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    // try_init so tests and embedding callers can initialize repeatedly
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_does_not_panic() {
        assert!(init_logging().is_ok());
        assert!(init_logging().is_ok());
    }

    #[test]
    fn custom_level_is_accepted() {
        let config = LoggingConfig {
            level: "debug".to_string(),
        };
        assert!(init_logging_with_config(&config).is_ok());
    }
}
