use super::{anchors, require_container, PageLink};
use crate::HarvestError;
use scraper::{ElementRef, Html};

/// Collects chapter links from the index container
///
/// Links are taken in document order and capped at `limit`. The cap applies
/// to anchors, not to usable links, so an anchor without `href` still takes
/// its slot.
pub fn discover_chapter_links(container: ElementRef<'_>, limit: usize) -> Vec<PageLink> {
    anchors(container)
        .take(limit)
        .map(PageLink::from_element)
        .collect()
}

/// Parses the index page and returns its chapter links
///
/// # Errors
///
/// Returns `MissingElement` when the page has no content container; the
/// harvest cannot continue without it.
pub fn parse_index_page(html: &str, url: &str, limit: usize) -> Result<Vec<PageLink>, HarvestError> {
    let document = Html::parse_document(html);
    let container = require_container(&document, url)?;
    Ok(discover_chapter_links(container, limit))
}
