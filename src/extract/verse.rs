use super::{element_text, require_container};
use crate::HarvestError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static ORIGINAL_TEXT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p[align='right']").expect("Invalid original text selector"));

static COMMENTARY_BLOCKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, h2").expect("Invalid commentary selector"));

/// Leading paragraphs on a verse page that are page furniture, not commentary
pub const BOILERPLATE_PARAGRAPHS: usize = 4;

/// Class marking the tag list that follows the commentary
pub const TAG_CLASS: &str = "tag";

/// Fields extracted from one verse page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersePage {
    pub original_text: String,
    pub commentary: String,
}

/// Trimmed text of the first right-aligned paragraph, or empty
pub fn extract_original_text(container: ElementRef<'_>) -> String {
    container
        .select(&ORIGINAL_TEXT)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Commentary assembled from the container's paragraphs and headings
///
/// Walks `p` and `h2` elements in document order until one carries the
/// [`TAG_CLASS`] class. The first [`BOILERPLATE_PARAGRAPHS`] paragraphs are
/// skipped; headings are never skipped. Each non-empty trimmed block is
/// appended followed by a newline.
pub fn extract_commentary(container: ElementRef<'_>) -> String {
    let mut commentary = String::new();
    let mut paragraphs_seen = 0;

    for element in container.select(&COMMENTARY_BLOCKS) {
        if element.value().classes().any(|class| class == TAG_CLASS) {
            break;
        }

        if element.value().name() == "p" {
            paragraphs_seen += 1;
            if paragraphs_seen <= BOILERPLATE_PARAGRAPHS {
                continue;
            }
        }

        let text = element_text(element);
        if !text.is_empty() {
            commentary.push_str(&text);
            commentary.push('\n');
        }
    }

    commentary
}

/// Parses a verse page into its original text and commentary
///
/// # Errors
///
/// Returns `MissingElement` when the page has no content container.
pub fn parse_verse_page(html: &str, url: &str) -> Result<VersePage, HarvestError> {
    let document = Html::parse_document(html);
    let container = require_container(&document, url)?;

    Ok(VersePage {
        original_text: extract_original_text(container),
        commentary: extract_commentary(container),
    })
}
