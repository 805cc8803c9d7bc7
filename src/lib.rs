//! Plantix Live - live disease-detail resolution pipeline
//!
//! Resolves a plant/disease identifier to a Plantix source page, fetches it
//! once under a bounded deadline, extracts treatment details (embedded JSON
//! state first, rendered markup as fallback), attaches keyword-based product
//! recommendations, and composes a response that is always fully shaped no
//! matter how far the pipeline got.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

// Re-export the caller-facing surface for convenience
pub use application::live_details::{LiveDetailRequest, LiveDetailResponse, LiveDetailService};
pub use domain::catalog::Catalog;
pub use infrastructure::config::AppConfig;
