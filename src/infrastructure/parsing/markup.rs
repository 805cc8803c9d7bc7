//! Rendered-markup fallback extraction strategy
//!
//! Used only when the structured pass produced neither a trigger nor an
//! organic control. Reads the three `data-cy` cards of the rendered page;
//! any missing card or paragraph leaves its field at the empty default.

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::details::ExtractedDetails;

const TRIGGER_CARD: &str = r#"div[data-cy="trigger-card"]"#;
const ORGANIC_CARD: &str = r#"div[data-cy="biological-control-card"]"#;
const CHEMICAL_CARD: &str = r#"div[data-cy="chemical-control-card"]"#;

/// Extractor for the rendered card markup
pub struct MarkupFallbackExtractor {
    trigger_selector: Selector,
    organic_selector: Selector,
    chemical_selector: Selector,
    paragraph_selector: Selector,
}

impl MarkupFallbackExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            trigger_selector: Self::compile(TRIGGER_CARD)?,
            organic_selector: Self::compile(ORGANIC_CARD)?,
            chemical_selector: Self::compile(CHEMICAL_CARD)?,
            paragraph_selector: Self::compile("p")?,
        })
    }

    fn compile(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| anyhow::anyhow!("Invalid selector '{selector}': {e}"))
    }

    /// Extract details from the rendered cards alone. Never fails.
    pub fn extract(&self, document: &Html) -> ExtractedDetails {
        let mut details = ExtractedDetails::default();
        self.extract_into(document, &mut details);
        details
    }

    /// Merge card data into an existing extraction. Trigger and organic
    /// control are assigned when their cards yield text; chemical control is
    /// overwritten only when its card produced non-empty text; every other
    /// field is left untouched, so partial structured data survives the
    /// fallback.
    pub fn extract_into(&self, document: &Html, details: &mut ExtractedDetails) {
        if let Some(card) = document.select(&self.trigger_selector).next() {
            if let Some(text) = self.first_paragraph_text(card) {
                details.trigger = text;
            }
        }

        if let Some(card) = document.select(&self.organic_selector).next() {
            if let Some(text) = self.first_paragraph_text(card) {
                details.organic_control = text;
            }
        }

        if let Some(card) = document.select(&self.chemical_selector).next() {
            let text = self.all_paragraph_text(card);
            if !text.is_empty() {
                details.chemical_control = text;
            }
        }

        debug!(
            trigger_found = !details.trigger.is_empty(),
            organic_found = !details.organic_control.is_empty(),
            chemical_found = !details.chemical_control.is_empty(),
            "Markup fallback extraction complete"
        );
    }

    fn first_paragraph_text(&self, card: ElementRef<'_>) -> Option<String> {
        card.select(&self.paragraph_selector)
            .next()
            .map(|p| p.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Concatenate the trimmed text of every paragraph with single spaces
    fn all_paragraph_text(&self, card: ElementRef<'_>) -> String {
        card.select(&self.paragraph_selector)
            .map(|p| p.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
