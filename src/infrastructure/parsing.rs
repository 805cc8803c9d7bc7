//! HTML extraction strategies for source detail pages
//!
//! Two independent extractors over the same fetched document:
//! - [`StructuredExtractor`] reads the embedded JSON state script
//! - [`MarkupFallbackExtractor`] reads the rendered cards directly
//!
//! Both return a fully default-filled [`crate::domain::ExtractedDetails`] and
//! never fail; a missing payload or malformed markup yields empty fields.

pub mod markup;
pub mod structured;

pub use markup::MarkupFallbackExtractor;
pub use structured::StructuredExtractor;
