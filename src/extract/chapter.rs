use super::text::{place_from_subtitle, verse_count_from_meta};
use super::{anchors, require_container, PageLink};
use crate::HarvestError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static SUBTITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.post-subtitle").expect("Invalid subtitle selector"));

static META: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.post-meta").expect("Invalid meta selector"));

/// Fields extracted from one chapter page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPage {
    pub place_of_revelation: String,
    pub number_of_verses: u32,
    pub verse_links: Vec<PageLink>,
}

/// Place of revelation from the first `h3.post-subtitle` anywhere in the page
///
/// Empty when the subtitle is absent.
pub fn extract_place_of_revelation(document: &Html) -> String {
    document
        .select(&SUBTITLE)
        .next()
        .map(|subtitle| place_from_subtitle(&subtitle.text().collect::<String>()))
        .unwrap_or_default()
}

/// Declared verse count from the first `p.post-meta` in the container
///
/// Zero when the paragraph is absent or does not carry a count.
pub fn extract_verse_count(container: ElementRef<'_>) -> u32 {
    container
        .select(&META)
        .next()
        .map(|meta| verse_count_from_meta(&meta.text().collect::<String>()))
        .unwrap_or(0)
}

/// Verse links in the container, skipping those opening a new browsing context
pub fn discover_verse_links(container: ElementRef<'_>) -> Vec<PageLink> {
    anchors(container)
        .filter(|anchor| anchor.value().attr("target") != Some("_blank"))
        .map(PageLink::from_element)
        .collect()
}

/// Parses a chapter page into its metadata and verse links
///
/// # Errors
///
/// Returns `MissingElement` when the page has no content container.
pub fn parse_chapter_page(html: &str, url: &str) -> Result<ChapterPage, HarvestError> {
    let document = Html::parse_document(html);
    let container = require_container(&document, url)?;

    Ok(ChapterPage {
        place_of_revelation: extract_place_of_revelation(&document),
        number_of_verses: extract_verse_count(container),
        verse_links: discover_verse_links(container),
    })
}
