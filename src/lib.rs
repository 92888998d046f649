//! Tafsir-Harvest: a scraper for a chapter/verse commentary corpus
//!
//! This crate walks a fixed three-level site (index page, chapter pages, verse
//! pages), extracts structured fields from each page and assembles them into a
//! single ordered JSON document.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for Tafsir-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Element '{selector}' not found in {url}")]
    MissingElement { url: String, selector: String },

    #[error("Giving up on {label} after {attempts} attempts: {source}")]
    RetriesExhausted {
        label: String,
        attempts: u32,
        #[source]
        source: Box<HarvestError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true if the failure may go away when the fetch is repeated
    ///
    /// Only network and HTTP status failures qualify. Malformed URLs and pages
    /// missing their content container are invalid input and never retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Tafsir-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest, Fetcher, RetryPolicy};
pub use model::{Chapter, Document, Verse, MAX_CHAPTERS};
