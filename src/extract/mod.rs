//! Field extraction rules for the three page kinds
//!
//! Every rule here is pure: it takes markup (or a parsed fragment) and returns
//! a value, falling back to an empty string or zero when an element is
//! missing. The only hard failure is a page without its `article` content
//! container, which is reported as [`HarvestError::MissingElement`].
//!
//! Page-level parsers ([`parse_index_page`], [`parse_chapter_page`],
//! [`parse_verse_page`]) return owned values so the parsed document never
//! outlives the call.

mod chapter;
mod index;
mod text;
mod verse;

pub use chapter::{
    discover_verse_links, extract_place_of_revelation, extract_verse_count, parse_chapter_page,
    ChapterPage,
};
pub use index::{discover_chapter_links, parse_index_page};
pub use text::{clean_title, place_from_subtitle, verse_count_from_meta};
pub use verse::{extract_commentary, extract_original_text, parse_verse_page, VersePage};

use crate::HarvestError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Selector for the content container present on every page kind
pub const CONTAINER_SELECTOR: &str = "article";

static CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(CONTAINER_SELECTOR).expect("Invalid container selector"));

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("Invalid anchor selector"));

/// A hyperlink found in a content container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Trimmed display text of the link
    pub text: String,

    /// Raw `href` attribute, unresolved
    pub href: Option<String>,
}

impl PageLink {
    fn from_element(element: ElementRef<'_>) -> Self {
        Self {
            text: element_text(element),
            href: element.value().attr("href").map(str::to_string),
        }
    }
}

/// Returns the first content container of a document
pub fn content_container(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&CONTAINER).next()
}

/// Like [`content_container`], but reports a missing container as an error
fn require_container<'a>(document: &'a Html, url: &str) -> Result<ElementRef<'a>, HarvestError> {
    content_container(document).ok_or_else(|| HarvestError::MissingElement {
        url: url.to_string(),
        selector: CONTAINER_SELECTOR.to_string(),
    })
}

/// Collects every `a` element under `container` in document order
fn anchors(container: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    container.select(&ANCHOR)
}

/// Concatenated, trimmed text content of an element
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
