//! Chapter collection - the top-level harvest driver
//!
//! This module walks the index page and, for each chapter link in order:
//! - Fetches the chapter page inside the retry boundary
//! - Extracts chapter metadata
//! - Collects the chapter's verses
//! - Appends the finished chapter to the document
//!
//! Only the index fetch can fail the run. A chapter that still fails after
//! the last retry is logged and left out of the document.

use crate::crawler::fetcher::{parse_page_url, resolve_link, Fetcher};
use crate::crawler::retry::RetryPolicy;
use crate::crawler::verses::VerseCollector;
use crate::extract::{clean_title, parse_chapter_page, parse_index_page, PageLink};
use crate::model::{Chapter, Document, MAX_CHAPTERS};
use crate::HarvestError;
use url::Url;

/// Builds the chapter list of a [`Document`]
pub struct ChapterCollector<'a> {
    fetcher: &'a Fetcher,
    retry: RetryPolicy,
    max_chapters: usize,
}

impl<'a> ChapterCollector<'a> {
    pub fn new(fetcher: &'a Fetcher, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            retry,
            max_chapters: MAX_CHAPTERS,
        }
    }

    /// Limits how many index links are followed (never more than `MAX_CHAPTERS`)
    pub fn with_max_chapters(mut self, max_chapters: usize) -> Self {
        self.max_chapters = max_chapters.min(MAX_CHAPTERS);
        self
    }

    /// Harvests every chapter listed on the index page
    ///
    /// # Arguments
    ///
    /// * `index_url` - Absolute URL of the chapter index
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - Chapters in index order; failed chapters are absent
    /// * `Err(HarvestError)` - The index page could not be fetched or has no
    ///   content container
    pub async fn collect(&self, index_url: &str) -> Result<Document, HarvestError> {
        let index = parse_page_url(index_url)?;

        tracing::info!("Fetching chapter index from {}", index);
        let html = self.fetcher.fetch(&index).await?;
        let links = parse_index_page(&html, index.as_str(), self.max_chapters)?;
        tracing::info!("Found {} chapter links", links.len());

        let mut document = Document::new();

        for (index_position, link) in links.iter().enumerate() {
            let number = index_position as u32 + 1;

            match self.collect_with_retry(link, number, &index).await {
                Ok(chapter) => {
                    tracing::info!(
                        "Chapter {}: {} ({} of {} verses, {})",
                        chapter.number,
                        chapter.name,
                        chapter.verses.len(),
                        chapter.number_of_verses,
                        if chapter.place_of_revelation.is_empty() {
                            "place unknown"
                        } else {
                            chapter.place_of_revelation.as_str()
                        }
                    );
                    document.push(chapter);
                }
                Err(e) => {
                    tracing::error!("Omitting chapter {}: {}", number, e);
                }
            }
        }

        Ok(document)
    }

    async fn collect_with_retry(
        &self,
        link: &PageLink,
        number: u32,
        index: &Url,
    ) -> Result<Chapter, HarvestError> {
        let href = link.href.as_deref().ok_or_else(|| HarvestError::InvalidUrl {
            url: link.text.clone(),
            reason: "link has no href".to_string(),
        })?;
        let url = resolve_link(index, href)?;
        let name = clean_title(&link.text);
        let label = format!("Chapter {} ({})", number, url);

        self.retry
            .run(&label, || self.collect_chapter(&url, number, &name))
            .await
    }

    /// Runs one attempt at a chapter: page fetch, metadata, then verses
    ///
    /// Only the chapter page fetch can fail the attempt; verse failures are
    /// absorbed by [`VerseCollector`].
    pub async fn collect_chapter(
        &self,
        url: &Url,
        number: u32,
        name: &str,
    ) -> Result<Chapter, HarvestError> {
        let html = self.fetcher.fetch(url).await?;
        let page = parse_chapter_page(&html, url.as_str())?;

        tracing::debug!(
            "Chapter {} lists {} verse links",
            number,
            page.verse_links.len()
        );

        let verses = VerseCollector::new(self.fetcher)
            .collect(&page.verse_links, url)
            .await;

        Ok(Chapter {
            number,
            name: name.to_string(),
            place_of_revelation: page.place_of_revelation,
            number_of_verses: page.number_of_verses,
            verses,
        })
    }
}
