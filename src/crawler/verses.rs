//! Verse collection for a single chapter
//!
//! Every verse link is fetched once, in order. A verse that cannot be fetched
//! or parsed is logged and left out; the rest of the chapter carries on.

use crate::crawler::fetcher::{parse_page_url, resolve_link, Fetcher};
use crate::extract::{clean_title, parse_chapter_page, parse_verse_page, PageLink};
use crate::model::Verse;
use crate::HarvestError;
use url::Url;

/// Fetches and assembles the verses of one chapter
pub struct VerseCollector<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> VerseCollector<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Collects verses for links already discovered on a chapter page
    ///
    /// # Arguments
    ///
    /// * `links` - Verse links in discovery order
    /// * `base` - URL of the chapter page, used to resolve relative hrefs
    ///
    /// Verse numbers are the 1-based link positions, so a skipped verse leaves
    /// its number unused.
    pub async fn collect(&self, links: &[PageLink], base: &Url) -> Vec<Verse> {
        let mut verses = Vec::with_capacity(links.len());

        for (index, link) in links.iter().enumerate() {
            let number = index as u32 + 1;

            match self.collect_verse(link, number, base).await {
                Ok(verse) => verses.push(verse),
                Err(e) => {
                    tracing::warn!(
                        "Skipping verse {} ({}): {}",
                        number,
                        link.href.as_deref().unwrap_or("<no href>"),
                        e
                    );
                }
            }
        }

        verses
    }

    /// Fetches a chapter page and collects all of its verses
    ///
    /// This is a one-shot operation: a failed chapter fetch is logged and
    /// yields an empty list instead of an error.
    pub async fn collect_from_url(&self, chapter_url: &str) -> Vec<Verse> {
        match self.fetch_links(chapter_url).await {
            Ok((links, base)) => self.collect(&links, &base).await,
            Err(e) => {
                tracing::warn!("Could not read verse links from {}: {}", chapter_url, e);
                Vec::new()
            }
        }
    }

    async fn fetch_links(&self, chapter_url: &str) -> Result<(Vec<PageLink>, Url), HarvestError> {
        let base = parse_page_url(chapter_url)?;
        let html = self.fetcher.fetch(&base).await?;
        let page = parse_chapter_page(&html, base.as_str())?;
        Ok((page.verse_links, base))
    }

    async fn collect_verse(
        &self,
        link: &PageLink,
        number: u32,
        base: &Url,
    ) -> Result<Verse, HarvestError> {
        let href = link.href.as_deref().ok_or_else(|| HarvestError::InvalidUrl {
            url: link.text.clone(),
            reason: "link has no href".to_string(),
        })?;
        let url = resolve_link(base, href)?;

        let html = self.fetcher.fetch(&url).await?;
        let page = parse_verse_page(&html, url.as_str())?;

        Ok(Verse {
            number,
            text: clean_title(&link.text),
            original_text: page.original_text,
            commentary: page.commentary,
        })
    }
}
