//! Crawler module for fetching and assembling the corpus
//!
//! This module contains the network side of the harvest, including:
//! - HTTP fetching and URL resolution
//! - The fixed-delay retry policy
//! - Verse collection for one chapter
//! - Chapter collection driven by the index page

mod chapters;
mod fetcher;
mod retry;
mod verses;

pub use chapters::ChapterCollector;
pub use fetcher::{build_http_client, parse_page_url, resolve_link, Fetcher};
pub use retry::RetryPolicy;
pub use verses::VerseCollector;

use crate::config::{validate, Config};
use crate::model::Document;
use crate::HarvestError;

/// Runs a complete harvest
///
/// This is the main entry point. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Fetch the index page and discover chapter links
/// 3. Fetch each chapter (with retries) and its verses, in order
/// 4. Return the assembled document
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(Document)` - Harvest finished, possibly with chapters omitted
/// * `Err(HarvestError)` - The configuration is invalid or the index page
///   could not be read
///
/// # Example
///
/// ```no_run
/// use tafsir_harvest::{harvest, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let document = harvest(&Config::default()).await?;
/// println!("{} chapters", document.len());
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: &Config) -> Result<Document, HarvestError> {
    validate(config)?;

    let fetcher = Fetcher::new(&config.source)?;
    let retry = RetryPolicy::from_config(&config.retry);

    ChapterCollector::new(&fetcher, retry)
        .with_max_chapters(config.source.max_chapters)
        .collect(&config.source.index_url)
        .await
}
