//! Corpus records produced by a harvest
//!
//! Records are built once, appended to their parent in discovery order and
//! never touched again. Field names serialize in camelCase.

use serde::{Deserialize, Serialize};

/// Number of chapters in the corpus; the index is never read past this
pub const MAX_CHAPTERS: usize = 114;

/// One chapter with its verses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// 1-based position of the chapter link on the index page
    pub number: u32,

    /// Title with its ordinal prefix removed
    pub name: String,

    /// Place-of-revelation label, empty when the page has none
    pub place_of_revelation: String,

    /// Verse count declared by the page, 0 when it cannot be read
    ///
    /// Not reconciled with `verses.len()`; the two may differ.
    pub number_of_verses: u32,

    pub verses: Vec<Verse>,
}

/// One verse of a chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// 1-based position of the verse link on the chapter page
    pub number: u32,
    pub text: String,
    pub original_text: String,
    pub commentary: String,
}

/// The whole harvested corpus, serialized as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub chapters: Vec<Chapter>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chapter; chapters past `MAX_CHAPTERS` are dropped
    pub fn push(&mut self, chapter: Chapter) {
        if self.chapters.len() < MAX_CHAPTERS {
            self.chapters.push(chapter);
        } else {
            tracing::warn!(
                "Document already holds {} chapters, dropping chapter {}",
                MAX_CHAPTERS,
                chapter.number
            );
        }
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Total verses across all chapters
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }
}
