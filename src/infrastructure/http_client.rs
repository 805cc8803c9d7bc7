//! HTTP fetcher for source detail pages
//!
//! One bounded-deadline attempt per request: no retries, no backoff, no rate
//! limiting. Failures are classified into a closed set so the composer can
//! report them distinctly. A realistic browser user agent is mandatory; the
//! source rejects default library client identifiers.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::FetchConfig;
use crate::domain::catalog::SourceLocation;

/// Terminal fetch failure kinds. Any of these short-circuits both extractors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out after {budget_seconds}s")]
    Timeout { budget_seconds: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

/// Seam for fetching a source page, mockable in tests
#[async_trait]
pub trait DetailPageFetcher: Send + Sync {
    /// Fetch the page body at `location` with exactly one attempt
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with a client-level timeout budget
pub struct HttpPageFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpPageFetcher {
    pub fn new(config: FetchConfig) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                budget_seconds: self.config.timeout_seconds,
            }
        } else if let Some(status) = error.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl DetailPageFetcher for HttpPageFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError> {
        info!("Fetching source page: {}", location.as_str());

        let response = self
            .client
            .get(location.url().clone())
            .send()
            .await
            .map_err(|e| {
                warn!("Fetch failed for {}: {}", location.as_str(), e);
                self.classify(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error {} for {}", status, location.as_str());
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!(
            "Fetched {} ({} chars)",
            location.as_str(),
            body.len()
        );
        Ok(body)
    }
}
