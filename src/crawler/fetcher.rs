//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Validating and resolving page URLs
//! - GET requests returning the page body
//! - Error classification (invalid input vs. transient failure)
//!
//! The fetcher never retries on its own; see [`RetryPolicy`](super::RetryPolicy).

use crate::config::SourceConfig;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use tafsir_harvest::config::SourceConfig;
/// use tafsir_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&SourceConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SourceConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Parses an absolute page URL
///
/// Only `http` and `https` URLs are accepted.
pub fn parse_page_url(raw: &str) -> Result<Url, HarvestError> {
    let url = Url::parse(raw.trim()).map_err(|e| HarvestError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    check_scheme(url)
}

/// Resolves a link `href` against the page it was found on
///
/// Absolute hrefs pass through unchanged.
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, HarvestError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(HarvestError::InvalidUrl {
            url: href.to_string(),
            reason: "empty href".to_string(),
        });
    }

    let url = base.join(href).map_err(|e| HarvestError::InvalidUrl {
        url: href.to_string(),
        reason: e.to_string(),
    })?;
    check_scheme(url)
}

fn check_scheme(url: Url) -> Result<Url, HarvestError> {
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(HarvestError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// Fetches page markup over HTTP
///
/// URLs reach the fetcher already parsed; malformed input is rejected by
/// [`parse_page_url`] or [`resolve_link`] before any request is made.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher from the source configuration
    pub fn new(config: &SourceConfig) -> Result<Self, HarvestError> {
        let client = build_http_client(config).map_err(|source| HarvestError::Http {
            url: config.index_url.clone(),
            source,
        })?;
        Ok(Self { client })
    }

    /// Fetches the body of `url`
    ///
    /// # Errors
    ///
    /// * `Http` - connection failure, timeout, non-2xx status or unreadable
    ///   body; transient
    pub async fn fetch(&self, url: &Url) -> Result<String, HarvestError> {
        tracing::debug!("GET {}", url);

        let http_error = |source: reqwest::Error| HarvestError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(http_error)?;

        let response = response.error_for_status().map_err(http_error)?;
        response.text().await.map_err(http_error)
    }
}
