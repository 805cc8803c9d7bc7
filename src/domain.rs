//! Domain module - Core entities and pure business logic
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod catalog;
pub mod details;
pub mod disease;
pub mod recommend;

// Re-export commonly used items for convenience
pub use catalog::{Catalog, SourceLocation};
pub use details::{
    ExtractedDetails, LiveDetailOutcome, ProductRecommendation, ProductType, SymptomSection,
};
pub use disease::DiseaseKey;
pub use recommend::recommend_products;
