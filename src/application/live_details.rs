//! Live-detail pipeline orchestration and result composition
//!
//! One request runs: resolve key -> fetch page -> structured extraction ->
//! markup fallback (only when both primary fields came back empty) -> compose.
//! Failures during resolution or fetching jump straight to composition with a
//! degraded payload. The composer is the single boundary that converts every
//! failure kind into a fully shaped response; nothing propagates to callers.

use chrono::Utc;
use scraper::Html;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::catalog::Catalog;
use crate::domain::details::{
    ExtractedDetails, LiveDetailOutcome, ProductRecommendation, SymptomSection,
};
use crate::domain::disease::DiseaseKey;
use crate::domain::recommend::recommend_products;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http_client::{DetailPageFetcher, FetchError, HttpPageFetcher};
use crate::infrastructure::parsing::{MarkupFallbackExtractor, StructuredExtractor};

/// Message for identifiers absent from the catalog
const MSG_NOT_IN_CATALOG: &str = "Disease information not available for live scraping";
/// Message for a fetch exceeding its deadline
const MSG_TIMEOUT: &str = "Request timeout - Plantix.net took too long to respond";
/// Message for a successful run
const MSG_SUCCESS: &str = "Successfully fetched live data from Plantix.net";

/// Source labels reported in the outcome and envelope
const SOURCE_LIVE: &str = "Live";
const SOURCE_DEGRADED: &str = "Cached/Generated";
const ENVELOPE_SOURCE_LIVE: &str = "Plantix.net (Live)";

/// Generic sentences substituted for still-empty fields on a successful run
const DEFAULT_TRIGGER: &str = "Information not available";
const DEFAULT_ORGANIC: &str = "Use neem oil or copper-based fungicides";
const DEFAULT_CHEMICAL: &str = "Consult with local agricultural extension service";
const DEFAULT_PREVENTIVE: &str = "Practice crop rotation and maintain plant hygiene";

/// Generic payload texts for the degraded envelope
const DEGRADED_TRIGGER: &str = "Live data unavailable - check database";
const DEGRADED_ORGANIC: &str = "General organic treatments available";
const DEGRADED_CHEMICAL: &str = "Consult agricultural expert";

/// Closed set of pipeline failures. ParseError never appears here: malformed
/// embedded payloads are recovered inside the extractor with default fills.
#[derive(Error, Debug)]
pub enum LiveDetailError {
    #[error("{MSG_NOT_IN_CATALOG}")]
    NotFoundInCatalog { key: DiseaseKey },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Catch-all converted to a degraded envelope at the composer boundary
    #[error("unexpected failure: {0}")]
    Unexpected(#[from] anyhow::Error),
}

/// Inbound request to the pipeline
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveDetailRequest {
    /// Display name, e.g. "Late blight"; drives product recommendation
    pub disease_name: String,
    /// Compound catalog key, e.g. "Tomato___Late_blight"; falls back to
    /// `disease_name` when absent
    pub disease_label: Option<String>,
    pub plant_name: Option<String>,
}

impl LiveDetailRequest {
    pub fn catalog_key(&self) -> DiseaseKey {
        DiseaseKey::new(self.disease_label.as_deref().unwrap_or(&self.disease_name))
    }
}

/// Fully shaped detail payload; present on every response, degraded or not
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DetailPayload {
    pub trigger: String,
    pub organic_control: String,
    pub chemical_control: String,
    pub preventive_measures: String,
    pub recommended_products: Vec<ProductRecommendation>,
    pub additional_info: Vec<SymptomSection>,
    pub source: String,
    pub fetched_at: String,
}

/// Caller-facing response envelope
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LiveDetailResponse {
    pub ok: bool,
    pub message: String,
    pub data: DetailPayload,
}

/// Orchestrates one live-detail resolution per call.
///
/// The catalog and extractors are immutable after construction, so one
/// service instance can serve concurrent requests.
pub struct LiveDetailService {
    catalog: Arc<Catalog>,
    fetcher: Arc<dyn DetailPageFetcher>,
    structured: StructuredExtractor,
    markup: MarkupFallbackExtractor,
}

impl LiveDetailService {
    pub fn new(catalog: Arc<Catalog>, fetcher: Arc<dyn DetailPageFetcher>) -> anyhow::Result<Self> {
        Ok(Self {
            catalog,
            fetcher,
            structured: StructuredExtractor::new()?,
            markup: MarkupFallbackExtractor::new()?,
        })
    }

    /// Build a service with the bundled catalog and a real HTTP fetcher
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let catalog = Arc::new(Catalog::bundled()?);
        let fetcher = Arc::new(HttpPageFetcher::new(config.fetch.clone())?);
        Self::new(catalog, fetcher)
    }

    /// Run the full pipeline. Never fails and never panics past this boundary;
    /// every failure kind is folded into a degraded but fully shaped response.
    pub async fn fetch_live_details(&self, request: &LiveDetailRequest) -> LiveDetailResponse {
        let key = request.catalog_key();
        info!("Live detail request for '{}'", key);

        let extraction = self.resolve_and_extract(&key).await;
        let products = recommend_products(&request.disease_name, request.plant_name.as_deref());
        let outcome = compose(extraction, products);

        LiveDetailResponse::from_outcome(outcome)
    }

    /// ResolvingURL -> Fetching -> StructuredParse -> [MarkupFallback]
    async fn resolve_and_extract(
        &self,
        key: &DiseaseKey,
    ) -> Result<ExtractedDetails, LiveDetailError> {
        let location = self
            .catalog
            .resolve_url(key)
            .ok_or_else(|| LiveDetailError::NotFoundInCatalog { key: key.clone() })?;

        let body = self.fetcher.fetch(location).await?;
        let document = Html::parse_document(&body);

        let mut details = self.structured.extract(&document);
        if details.needs_markup_fallback() {
            debug!("Structured extraction empty, running markup fallback");
            self.markup.extract_into(&document, &mut details);
        }

        Ok(details)
    }
}

/// Merge extraction outcome and recommendations into one composed result.
/// This is the single point that absorbs every failure kind.
fn compose(
    extraction: Result<ExtractedDetails, LiveDetailError>,
    products: Vec<ProductRecommendation>,
) -> LiveDetailOutcome {
    let fetched_at = Utc::now();

    match extraction {
        Ok(details) => LiveDetailOutcome {
            succeeded: true,
            message: MSG_SUCCESS.to_string(),
            data: Some(fill_success_defaults(details)),
            products,
            source_label: SOURCE_LIVE.to_string(),
            fetched_at,
        },
        Err(error) => {
            warn!("Pipeline degraded: {error}");
            let message = match &error {
                LiveDetailError::NotFoundInCatalog { .. } => MSG_NOT_IN_CATALOG.to_string(),
                LiveDetailError::Fetch(FetchError::Timeout { .. }) => MSG_TIMEOUT.to_string(),
                LiveDetailError::Fetch(fetch) => format!("Failed to fetch data: {fetch}"),
                LiveDetailError::Unexpected(e) => format!("Error composing live details: {e}"),
            };
            LiveDetailOutcome {
                succeeded: false,
                message,
                data: None,
                products,
                source_label: SOURCE_DEGRADED.to_string(),
                fetched_at,
            }
        }
    }
}

/// Replace still-empty textual fields with the fixed generic sentences
fn fill_success_defaults(mut details: ExtractedDetails) -> ExtractedDetails {
    let fills = [
        (&mut details.trigger, DEFAULT_TRIGGER),
        (&mut details.organic_control, DEFAULT_ORGANIC),
        (&mut details.chemical_control, DEFAULT_CHEMICAL),
        (&mut details.preventive_measures, DEFAULT_PREVENTIVE),
    ];
    for (field, default) in fills {
        if field.is_empty() {
            *field = default.to_string();
        }
    }
    details
}

impl LiveDetailResponse {
    /// Flatten a composed outcome into the external envelope. Degraded
    /// outcomes keep a fully shaped payload; only `ok` and `message` signal
    /// the difference.
    pub fn from_outcome(outcome: LiveDetailOutcome) -> Self {
        let fetched_at = outcome.fetched_at.to_rfc3339();

        let data = match outcome.data {
            Some(details) => DetailPayload {
                trigger: details.trigger,
                organic_control: details.organic_control,
                chemical_control: details.chemical_control,
                preventive_measures: details.preventive_measures,
                recommended_products: outcome.products,
                additional_info: details.symptom_sections,
                source: ENVELOPE_SOURCE_LIVE.to_string(),
                fetched_at,
            },
            None => DetailPayload {
                trigger: DEGRADED_TRIGGER.to_string(),
                organic_control: DEGRADED_ORGANIC.to_string(),
                chemical_control: DEGRADED_CHEMICAL.to_string(),
                preventive_measures: DEFAULT_PREVENTIVE.to_string(),
                recommended_products: outcome.products,
                additional_info: Vec::new(),
                source: SOURCE_DEGRADED.to_string(),
                fetched_at,
            },
        };

        Self {
            ok: outcome.succeeded,
            message: outcome.message,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_success_fills_empty_fields_with_generic_text() {
        let details = ExtractedDetails {
            trigger: "Fungus overwinters in crop residue".to_string(),
            ..Default::default()
        };
        let outcome = compose(Ok(details), Vec::new());

        assert!(outcome.succeeded);
        assert_eq!(outcome.message, MSG_SUCCESS);
        assert_eq!(outcome.source_label, "Live");

        let data = outcome.data.unwrap();
        assert_eq!(data.trigger, "Fungus overwinters in crop residue");
        assert_eq!(data.organic_control, DEFAULT_ORGANIC);
        assert_eq!(data.chemical_control, DEFAULT_CHEMICAL);
        assert_eq!(data.preventive_measures, DEFAULT_PREVENTIVE);
    }

    #[test]
    fn compose_catalog_miss_keeps_products() {
        let products = recommend_products("Tomato___Late_blight", Some("Tomato"));
        let outcome = compose(
            Err(LiveDetailError::NotFoundInCatalog {
                key: DiseaseKey::new("Banana___Panama_disease"),
            }),
            products,
        );

        assert!(!outcome.succeeded);
        assert_eq!(outcome.message, MSG_NOT_IN_CATALOG);
        assert!(outcome.data.is_none());
        assert_eq!(outcome.products.len(), 2);
    }

    #[test]
    fn compose_timeout_message_names_the_condition() {
        let outcome = compose(
            Err(LiveDetailError::Fetch(FetchError::Timeout {
                budget_seconds: 10,
            })),
            Vec::new(),
        );
        assert!(!outcome.succeeded);
        assert!(outcome.message.to_lowercase().contains("timeout"));
        assert!(outcome.data.is_none());
    }

    #[test]
    fn compose_http_status_message_reports_fetch_failure() {
        let outcome = compose(
            Err(LiveDetailError::Fetch(FetchError::HttpStatus(503))),
            Vec::new(),
        );
        assert!(outcome.message.starts_with("Failed to fetch data:"));
        assert!(outcome.message.contains("503"));
    }

    #[test]
    fn compose_unexpected_is_absorbed() {
        let outcome = compose(
            Err(LiveDetailError::Unexpected(anyhow::anyhow!("boom"))),
            Vec::new(),
        );
        assert!(!outcome.succeeded);
        assert!(outcome.message.contains("boom"));
        assert!(outcome.data.is_none());
    }

    #[test]
    fn degraded_envelope_is_fully_shaped() {
        let products = recommend_products("Foo___Unknown_issue", None);
        let outcome = compose(
            Err(LiveDetailError::NotFoundInCatalog {
                key: DiseaseKey::new("Foo___Unknown_issue"),
            }),
            products,
        );
        let response = LiveDetailResponse::from_outcome(outcome);

        assert!(!response.ok);
        assert_eq!(response.data.trigger, DEGRADED_TRIGGER);
        assert_eq!(response.data.source, "Cached/Generated");
        assert_eq!(response.data.recommended_products.len(), 2);
        assert!(response.data.additional_info.is_empty());
        assert!(!response.data.fetched_at.is_empty());
    }

    #[test]
    fn request_key_prefers_label_over_display_name() {
        let request = LiveDetailRequest {
            disease_name: "Late blight".to_string(),
            disease_label: Some("Tomato___Late_blight".to_string()),
            plant_name: Some("Tomato".to_string()),
        };
        assert_eq!(request.catalog_key().as_str(), "Tomato___Late_blight");

        let without_label = LiveDetailRequest {
            disease_name: "Late blight".to_string(),
            disease_label: None,
            plant_name: None,
        };
        assert_eq!(without_label.catalog_key().as_str(), "Late blight");
    }
}
