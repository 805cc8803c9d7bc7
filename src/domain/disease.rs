//! Compound disease identifier used as the catalog lookup key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the plant and disease parts of a compound key
pub const KEY_SEPARATOR: &str = "___";

/// Compound key in the form `<Plant>___<Disease>`, e.g. `Tomato___Late_blight`.
///
/// The key is treated as opaque for catalog lookups; it is only ever split on
/// the triple-underscore separator when a plant-only or disease-only name is
/// needed (product recommendation, display).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseKey(String);

impl DiseaseKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Disease part of the compound key; falls back to the whole key when no
    /// separator is present (plain display names are passed through as-is)
    pub fn disease_part(&self) -> &str {
        self.0
            .split_once(KEY_SEPARATOR)
            .map_or(self.0.as_str(), |(_, disease)| disease)
    }
}

impl fmt::Display for DiseaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DiseaseKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DiseaseKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_triple_underscore_only() {
        let key = DiseaseKey::new("Tomato___Late_blight");
        assert_eq!(key.disease_part(), "Late_blight");
    }

    #[test]
    fn plain_name_passes_through() {
        let key = DiseaseKey::new("Late blight");
        assert_eq!(key.disease_part(), "Late blight");
    }

    #[test]
    fn single_underscores_are_not_separators() {
        let key = DiseaseKey::new("Corn_(maize)___Northern_Leaf_Blight");
        assert_eq!(key.disease_part(), "Northern_Leaf_Blight");
    }
}
