//! Keyword-based product recommendation
//!
//! Pure and deterministic: the keyword table is walked in a fixed order and
//! the first keyword contained in the cleaned disease name wins. Order is the
//! tie-break policy, not longest-match.

use once_cell::sync::Lazy;
use tracing::debug;

use super::details::{ProductRecommendation, ProductType};
use super::disease::DiseaseKey;

/// Fixed-order keyword table. Each keyword maps to exactly two products.
static KEYWORD_PRODUCTS: Lazy<Vec<(&'static str, [ProductRecommendation; 2])>> = Lazy::new(|| {
    vec![
        (
            "blight",
            [
                ProductRecommendation::new(
                    "Copper Fungicide",
                    ProductType::Organic,
                    "Copper-based fungicide for blight control",
                ),
                ProductRecommendation::new(
                    "Chlorothalonil",
                    ProductType::Chemical,
                    "Broad-spectrum fungicide",
                ),
            ],
        ),
        (
            "rust",
            [
                ProductRecommendation::new(
                    "Sulfur Powder",
                    ProductType::Organic,
                    "Natural fungicide for rust diseases",
                ),
                ProductRecommendation::new(
                    "Myclobutanil",
                    ProductType::Chemical,
                    "Systemic fungicide for rust",
                ),
            ],
        ),
        (
            "mildew",
            [
                ProductRecommendation::new(
                    "Neem Oil",
                    ProductType::Organic,
                    "Natural fungicide and insecticide",
                ),
                ProductRecommendation::new(
                    "Potassium Bicarbonate",
                    ProductType::Organic,
                    "Organic fungicide for mildew",
                ),
            ],
        ),
        (
            "spot",
            [
                ProductRecommendation::new(
                    "Bacillus subtilis",
                    ProductType::Biological,
                    "Biological fungicide",
                ),
                ProductRecommendation::new(
                    "Mancozeb",
                    ProductType::Chemical,
                    "Protective fungicide",
                ),
            ],
        ),
        (
            "rot",
            [
                ProductRecommendation::new(
                    "Copper Hydroxide",
                    ProductType::Organic,
                    "Copper-based bactericide",
                ),
                ProductRecommendation::new(
                    "Streptomycin",
                    ProductType::Chemical,
                    "Antibiotic for bacterial diseases",
                ),
            ],
        ),
    ]
});

/// Returned when no keyword matches the cleaned disease name
static DEFAULT_PRODUCTS: Lazy<[ProductRecommendation; 2]> = Lazy::new(|| {
    [
        ProductRecommendation::new(
            "Neem Oil",
            ProductType::Organic,
            "General purpose organic fungicide",
        ),
        ProductRecommendation::new(
            "Copper Fungicide",
            ProductType::Organic,
            "Broad-spectrum disease control",
        ),
    ]
});

/// Strip any `Plant___` prefix, replace underscores with spaces, lowercase
fn clean_disease_name(disease_name: &str) -> String {
    DiseaseKey::new(disease_name)
        .disease_part()
        .replace('_', " ")
        .to_lowercase()
}

/// Recommend treatment products for a disease name.
///
/// First keyword whose text is a case-insensitive substring of the cleaned
/// name wins; no match yields the fixed default pair.
pub fn recommend_products(
    disease_name: &str,
    plant_name: Option<&str>,
) -> Vec<ProductRecommendation> {
    let cleaned = clean_disease_name(disease_name);
    debug!(
        disease = %cleaned,
        plant = plant_name.unwrap_or("unknown"),
        "Looking up product recommendations"
    );

    for (keyword, products) in KEYWORD_PRODUCTS.iter() {
        if cleaned.contains(keyword) {
            return products.to_vec();
        }
    }

    DEFAULT_PRODUCTS.to_vec()
}
