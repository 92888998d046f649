//! String transforms applied to text pulled out of the markup

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordinal prefix such as `"12. "` at the start of a title
static ORDINAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\W\s+").expect("Invalid ordinal prefix regex"));

/// Marker token preceding the verse count in chapter metadata
pub const VERSE_COUNT_MARKER: &str = "ima";

/// Character appended to the place-of-revelation token
pub const PLACE_SUFFIX: char = 'a';

/// Removes a leading `^\d+\W\s+` ordinal prefix
///
/// Text without such a prefix is returned unchanged.
///
/// ```
/// use tafsir_harvest::extract::clean_title;
///
/// assert_eq!(clean_title("3. Ta Lou"), "Ta Lou");
/// assert_eq!(clean_title("Ta Lou"), "Ta Lou");
/// ```
pub fn clean_title(raw: &str) -> String {
    ORDINAL_PREFIX.replace(raw, "").into_owned()
}

/// Derives the place-of-revelation label from subtitle text
///
/// Takes the last whitespace-separated token, drops its final character and
/// appends [`PLACE_SUFFIX`]. The source phrases the place in the locative,
/// so `"... u Mekki"` becomes `"Mekka"`. Trailing punctuation counts as the
/// final character: `"... u Mekka."` becomes `"Mekkaa"`.
pub fn place_from_subtitle(subtitle: &str) -> String {
    let Some(last) = subtitle.split_whitespace().last() else {
        return String::new();
    };

    let mut chars = last.chars();
    chars.next_back();

    let mut place = chars.as_str().to_string();
    place.push(PLACE_SUFFIX);
    place
}

/// Reads the verse count from chapter metadata text
///
/// The text is split on single spaces; the token right after the first
/// [`VERSE_COUNT_MARKER`] must parse as an integer. Any miss yields 0.
pub fn verse_count_from_meta(meta: &str) -> u32 {
    let tokens: Vec<&str> = meta.split(' ').collect();

    tokens
        .iter()
        .position(|token| *token == VERSE_COUNT_MARKER)
        .and_then(|index| tokens.get(index + 1))
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}
