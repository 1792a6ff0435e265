use diesel::prelude::*;
use serde_derive::Serialize;

use crate::schema::{bible, verse_commentary};

/// Model representing a verse as MySword stores it, markup untouched.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerseRecord {
    pub book: i32,
    pub chapter: i32,
    pub verse: i32,
    pub text: String,
}

impl VerseRecord {
    pub fn new(book: i32, chapter: i32, verse: i32, text: &str) -> Self {
        VerseRecord {
            book,
            chapter,
            verse,
            text: text.to_owned(),
        }
    }

    /// Whether the raw text carries at least one study note.
    pub fn has_footnote(&self) -> bool {
        self.text.contains(crate::references::FOOTNOTE_OPEN)
    }
}

/// Model representing a converted verse in an e-Sword Bible.
#[derive(Clone, Debug, PartialEq, Serialize, Insertable)]
#[diesel(table_name = bible)]
pub struct ScriptureRecord {
    pub book: i32,
    pub chapter: i32,
    pub verse: i32,
    #[diesel(column_name = scripture)]
    pub text: String,
}

impl ScriptureRecord {
    /// Keeps the position of `verse` and replaces its text.
    pub fn from_verse(verse: &VerseRecord, text: String) -> Self {
        ScriptureRecord {
            book: verse.book,
            chapter: verse.chapter,
            verse: verse.verse,
            text,
        }
    }
}

/// Model representing a verse commentary in an e-Sword commentary.
///
/// MySword notes always belong to a single verse, so the range starts and
/// ends on the same chapter and verse.
#[derive(Clone, Debug, PartialEq, Serialize, Insertable)]
#[diesel(table_name = verse_commentary)]
pub struct CommentaryRecord {
    pub book: i32,
    pub chapter_begin: i32,
    pub verse_begin: i32,
    pub chapter_end: i32,
    pub verse_end: i32,
    #[diesel(column_name = comments)]
    pub text: String,
}

impl CommentaryRecord {
    pub fn for_verse(verse: &VerseRecord, text: String) -> Self {
        CommentaryRecord {
            book: verse.book,
            chapter_begin: verse.chapter,
            verse_begin: verse.verse,
            chapter_end: verse.chapter,
            verse_end: verse.verse,
            text,
        }
    }
}

mod details;
pub use self::details::{BibleDetails, CommentaryDetails, SourceDetails, MODULE_VERSION};
