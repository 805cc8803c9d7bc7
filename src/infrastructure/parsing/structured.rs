//! Embedded-state extraction strategy
//!
//! Plantix pages ship their data in a `script#quokka-state` element whose JSON
//! payload escapes quotes as `&q;` and ampersands as `&a;`. This extractor
//! un-escapes the payload, parses it into a typed structure, and default-fills
//! once after parsing. Absent script, malformed payload and missing keys are
//! all non-fatal.

use anyhow::Result;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::details::{ExtractedDetails, SymptomSection};

/// Element id of the embedded state script
const STATE_SCRIPT_SELECTOR: &str = "script#quokka-state";

/// Top-level embedded state; only the pathogen object is of interest
#[derive(Debug, Deserialize)]
struct EmbeddedState {
    #[serde(rename = "pathogen-details")]
    pathogen_details: Option<PathogenDetails>,
}

/// Pathogen object inside the embedded state. All keys are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PathogenDetails {
    trigger: Option<String>,
    alternative_treatment: Option<String>,
    chemical_treatment: Option<String>,
    preventive_measures: Option<StringOrList>,
    symptoms: Option<String>,
}

/// `preventive_measures` arrives either as one string or as a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// A list becomes one newline-joined string with bullet-prefixed items;
    /// a single string passes through unchanged
    fn into_bulleted_text(self) -> String {
        match self {
            Self::One(text) => text,
            Self::Many(items) => items
                .into_iter()
                .map(|measure| format!("• {measure}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Extractor for the embedded JSON state payload
pub struct StructuredExtractor {
    script_selector: Selector,
}

impl StructuredExtractor {
    pub fn new() -> Result<Self> {
        let script_selector = Selector::parse(STATE_SCRIPT_SELECTOR)
            .map_err(|e| anyhow::anyhow!("Invalid state script selector: {e}"))?;
        Ok(Self { script_selector })
    }

    /// Extract details from the embedded state. Never fails: any absent or
    /// malformed piece leaves the corresponding fields at their defaults.
    pub fn extract(&self, document: &Html) -> ExtractedDetails {
        let Some(script) = document.select(&self.script_selector).next() else {
            debug!("No embedded state script found");
            return ExtractedDetails::default();
        };

        let raw = script.text().collect::<String>();
        let json_text = raw.replace("&q;", "\"").replace("&a;", "&");

        let state: EmbeddedState = match serde_json::from_str(&json_text) {
            Ok(state) => state,
            Err(e) => {
                warn!("Embedded state payload did not parse, using defaults: {e}");
                return ExtractedDetails::default();
            }
        };

        let Some(pathogen) = state.pathogen_details else {
            debug!("Embedded state has no pathogen-details object");
            return ExtractedDetails::default();
        };

        let mut details = ExtractedDetails {
            trigger: pathogen.trigger.unwrap_or_default(),
            organic_control: pathogen.alternative_treatment.unwrap_or_default(),
            chemical_control: pathogen.chemical_treatment.unwrap_or_default(),
            preventive_measures: pathogen
                .preventive_measures
                .map(StringOrList::into_bulleted_text)
                .unwrap_or_default(),
            symptom_sections: Vec::new(),
        };

        if let Some(symptoms) = pathogen.symptoms.filter(|s| !s.is_empty()) {
            details.symptom_sections.push(SymptomSection {
                title: "Symptoms".to_string(),
                content: symptoms,
            });
        }

        debug!(
            trigger_len = details.trigger.len(),
            organic_len = details.organic_control.len(),
            chemical_len = details.chemical_control.len(),
            "Structured extraction complete"
        );
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_state(payload: &str) -> Html {
        Html::parse_document(&format!(
            "<html><body><script id=\"quokka-state\">{payload}</script></body></html>"
        ))
    }

    #[test]
    fn full_payload_maps_field_for_field() {
        let document = page_with_state(
            r#"{&q;pathogen-details&q;: {&q;trigger&q;:&q;X&q;,&q;alternative_treatment&q;:&q;Y&q;,&q;chemical_treatment&q;:&q;Z&q;,&q;preventive_measures&q;:[&q;A&q;,&q;B&q;]}}"#,
        );
        let details = StructuredExtractor::new().unwrap().extract(&document);

        assert_eq!(details.trigger, "X");
        assert_eq!(details.organic_control, "Y");
        assert_eq!(details.chemical_control, "Z");
        assert_eq!(details.preventive_measures, "• A\n• B");
        assert!(details.symptom_sections.is_empty());
    }

    #[test]
    fn ampersand_entity_is_unescaped() {
        let document = page_with_state(
            r#"{&q;pathogen-details&q;: {&q;trigger&q;:&q;heat &a; humidity&q;}}"#,
        );
        let details = StructuredExtractor::new().unwrap().extract(&document);
        assert_eq!(details.trigger, "heat & humidity");
    }

    #[test]
    fn missing_script_yields_defaults() {
        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let details = StructuredExtractor::new().unwrap().extract(&document);
        assert_eq!(details, ExtractedDetails::default());
    }

    #[test]
    fn malformed_payload_yields_defaults() {
        let document = page_with_state("{&q;pathogen-details&q;: not json at all");
        let details = StructuredExtractor::new().unwrap().extract(&document);
        assert_eq!(details, ExtractedDetails::default());
    }

    #[test]
    fn missing_pathogen_object_yields_defaults() {
        let document = page_with_state(r#"{&q;some-other-state&q;: {&q;x&q;: 1}}"#);
        let details = StructuredExtractor::new().unwrap().extract(&document);
        assert_eq!(details, ExtractedDetails::default());
    }

    #[test]
    fn preventive_measures_as_single_string_passes_through() {
        let document = page_with_state(
            r#"{&q;pathogen-details&q;: {&q;preventive_measures&q;:&q;Rotate crops yearly&q;}}"#,
        );
        let details = StructuredExtractor::new().unwrap().extract(&document);
        assert_eq!(details.preventive_measures, "Rotate crops yearly");
    }

    #[test]
    fn non_empty_symptoms_become_a_section() {
        let document = page_with_state(
            r#"{&q;pathogen-details&q;: {&q;trigger&q;:&q;X&q;,&q;symptoms&q;:&q;Brown lesions on leaves&q;}}"#,
        );
        let details = StructuredExtractor::new().unwrap().extract(&document);
        assert_eq!(details.symptom_sections.len(), 1);
        assert_eq!(details.symptom_sections[0].title, "Symptoms");
        assert_eq!(details.symptom_sections[0].content, "Brown lesions on leaves");
    }

    #[test]
    fn empty_symptoms_are_skipped() {
        let document = page_with_state(
            r#"{&q;pathogen-details&q;: {&q;trigger&q;:&q;X&q;,&q;symptoms&q;:&q;&q;}}"#,
        );
        let details = StructuredExtractor::new().unwrap().extract(&document);
        assert!(details.symptom_sections.is_empty());
    }

    #[test]
    fn unknown_extra_keys_are_ignored() {
        let document = page_with_state(
            r#"{&q;pathogen-details&q;: {&q;trigger&q;:&q;X&q;,&q;host_plants&q;:[&q;tomato&q;]},&q;nav&q;:{}}"#,
        );
        let details = StructuredExtractor::new().unwrap().extract(&document);
        assert_eq!(details.trigger, "X");
    }
}
