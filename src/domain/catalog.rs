//! Static catalog mapping disease identifiers to their source pages
//!
//! The table is fixed at process start and never mutated afterwards, so it can
//! be shared across concurrent requests without synchronization. Lookup is
//! exact-match; no normalization is applied to keys.

use anyhow::{Context, Result};
use std::collections::HashMap;
use url::Url;

use super::disease::DiseaseKey;

/// Immutable source URL associated with exactly one catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation(Url);

impl SourceLocation {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

/// Bundled disease-key -> Plantix library page mapping
const SOURCE_PAGES: &[(&str, &str)] = &[
    (
        "Apple___Apple_scab",
        "https://plantix.net/en/library/plant-diseases/100006/apple-scab/",
    ),
    (
        "Apple___Black_rot",
        "https://plantix.net/en/library/plant-diseases/300006/black-rot",
    ),
    (
        "Apple___Cedar_apple_rust",
        "https://plantix.net/en/library/plant-diseases/100009/european-pear-rust",
    ),
    (
        "Cherry_(including_sour)___Powdery_mildew",
        "https://plantix.net/en/library/plant-diseases/100002/powdery-mildew/",
    ),
    (
        "Corn_(maize)___Common_rust_",
        "https://plantix.net/en/library/plant-diseases/100082/common-rust-of-maize/",
    ),
    (
        "Corn_(maize)___Northern_Leaf_Blight",
        "https://plantix.net/en/library/plant-diseases/100065/northern-leaf-blight/",
    ),
    (
        "Grape___Black_rot",
        "https://plantix.net/en/library/plant-diseases/100350/black-rot-of-grape/",
    ),
    (
        "Peach___Bacterial_spot",
        "https://plantix.net/en/library/plant-diseases/300050/bacterial-spot-and-speck-of-tomato/",
    ),
    (
        "Pepper_bell___Bacterial_spot",
        "https://plantix.net/en/library/plant-diseases/300003/bacterial-spot-of-pepper",
    ),
    (
        "Potato___Early_blight",
        "https://plantix.net/en/library/plant-diseases/100321/early-blight/",
    ),
    (
        "Potato___Late_blight",
        "https://plantix.net/en/library/plant-diseases/100040/potato-late-blight",
    ),
    (
        "Squash___Powdery_mildew",
        "https://plantix.net/en/library/plant-diseases/100002/powdery-mildew/",
    ),
    (
        "Strawberry___Leaf_scorch",
        "https://plantix.net/en/library/plant-diseases/100019/cherry-leaf-scorch/",
    ),
    (
        "Tomato___Bacterial_spot",
        "https://plantix.net/en/library/plant-diseases/300050/bacterial-spot-and-speck-of-tomato/",
    ),
    (
        "Tomato___Early_blight",
        "https://plantix.net/en/library/plant-diseases/100321/early-blight/",
    ),
    (
        "Tomato___Late_blight",
        "https://plantix.net/en/library/plant-diseases/100046/tomato-late-blight/",
    ),
    (
        "Tomato___Leaf_Mold",
        "https://plantix.net/en/library/plant-diseases/100257/leaf-mold-of-tomato/",
    ),
    (
        "Tomato___Septoria_leaf_spot",
        "https://plantix.net/en/library/plant-diseases/100152/septoria-leaf-spot/",
    ),
    (
        "Tomato___Target_Spot",
        "https://plantix.net/en/library/plant-diseases/100109/target-spot-of-soybean/",
    ),
    (
        "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
        "https://plantix.net/en/library/plant-diseases/200036/tomato-yellow-leaf-curl-virus/",
    ),
];

/// Read-only lookup table from [`DiseaseKey`] to [`SourceLocation`]
#[derive(Debug, Clone)]
pub struct Catalog {
    sources: HashMap<DiseaseKey, SourceLocation>,
}

impl Catalog {
    /// Build the catalog from the bundled source-page table
    pub fn bundled() -> Result<Self> {
        Self::from_entries(SOURCE_PAGES.iter().copied())
    }

    /// Build a catalog from arbitrary (key, url) pairs
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut sources = HashMap::new();
        for (key, raw_url) in entries {
            let url = Url::parse(raw_url)
                .with_context(|| format!("Invalid source URL for catalog entry '{key}'"))?;
            sources.insert(DiseaseKey::new(key), SourceLocation(url));
        }
        Ok(Self { sources })
    }

    /// Exact-match lookup of the source page for a disease key
    pub fn resolve_url(&self, key: &DiseaseKey) -> Option<&SourceLocation> {
        self.sources.get(key)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
