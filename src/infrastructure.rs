//! Infrastructure layer for configuration, logging, HTTP fetching and parsing
//!
//! Everything that talks to the outside world (network, filesystem, terminal)
//! lives here; the domain layer stays pure.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod parsing;

// Re-export commonly used items
pub use config::{AppConfig, FetchConfig, LoggingConfig};
pub use http_client::{DetailPageFetcher, FetchError, HttpPageFetcher};
pub use parsing::{MarkupFallbackExtractor, StructuredExtractor};
