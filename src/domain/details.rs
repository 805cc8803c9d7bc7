//! Extraction and composition entities for the live-detail pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One titled block of supplementary information (currently only "Symptoms")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSection {
    pub title: String,
    pub content: String,
}

/// Normalized treatment details extracted from a source page.
///
/// Every textual field defaults to an empty string and the section list to an
/// empty vec; callers never see a missing field, only an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDetails {
    pub trigger: String,
    pub organic_control: String,
    pub chemical_control: String,
    pub preventive_measures: String,
    pub symptom_sections: Vec<SymptomSection>,
}

impl ExtractedDetails {
    /// True when both primary fields are empty, which is the (conjunctive)
    /// condition for running the markup fallback extractor. A single empty
    /// field must not discard partial structured data.
    pub fn needs_markup_fallback(&self) -> bool {
        self.trigger.is_empty() && self.organic_control.is_empty()
    }
}

/// Product category used by the recommendation tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    Organic,
    Chemical,
    Biological,
}

/// A single recommended treatment product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecommendation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProductType,
    pub description: String,
}

impl ProductRecommendation {
    pub fn new(name: &str, kind: ProductType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
        }
    }
}

/// Composed result of one pipeline run.
///
/// Invariant: `data` is `None` exactly when `succeeded` is false. Whenever
/// extraction ran at all, `data` carries every [`ExtractedDetails`] field with
/// a default fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveDetailOutcome {
    pub succeeded: bool,
    pub message: String,
    pub data: Option<ExtractedDetails>,
    pub products: Vec<ProductRecommendation>,
    pub source_label: String,
    pub fetched_at: DateTime<Utc>,
}
