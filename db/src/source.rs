use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Integer, Nullable, Text};
use log::debug;

use crate::models::{SourceDetails, VerseRecord};
use crate::references::FOOTNOTE_OPEN;
use crate::{establish_connection, ConvertError};

/// Columns every MySword `Bible` table must have.
const VERSE_COLUMNS: [&str; 4] = ["Book", "Chapter", "Verse", "Scripture"];

/// Optional `Details` columns, and whether they hold text or a flag.
const DETAIL_COLUMNS: [(&str, DetailKind); 8] = [
    ("title", DetailKind::Text),
    ("description", DetailKind::Text),
    ("comments", DetailKind::Text),
    ("abbreviation", DetailKind::Text),
    ("ot", DetailKind::Flag),
    ("nt", DetailKind::Flag),
    ("strong", DetailKind::Flag),
    ("righttoleft", DetailKind::Flag),
];

#[derive(Clone, Copy)]
enum DetailKind {
    Text,
    Flag,
}

/// Trait implemented by types that can hand out the verses of a Bible module.
pub trait VerseSource {
    /// Whether any verse embeds a study note.
    fn is_study_bible(&mut self) -> Result<bool, ConvertError>;

    /// All verses, ordered by book, chapter, verse and text.
    fn verses(&mut self) -> Result<Vec<VerseRecord>, ConvertError>;

    /// The module's metadata.
    fn details(&mut self) -> Result<SourceDetails, ConvertError>;
}

/// A MySword `.bbl.mybible` database.
pub struct MySwordBible {
    conn: SqliteConnection,
}

#[derive(QueryableByName)]
struct ColumnInfo {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct Probe {
    #[diesel(sql_type = Integer)]
    #[allow(dead_code)]
    found: i32,
}

#[derive(QueryableByName)]
struct VerseRow {
    #[diesel(sql_type = Nullable<Integer>)]
    book: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    chapter: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    verse: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    scripture: Option<String>,
}

impl TryFrom<VerseRow> for VerseRecord {
    type Error = ConvertError;

    fn try_from(row: VerseRow) -> Result<Self, Self::Error> {
        let missing = |column: &str| ConvertError::MalformedRow {
            reason: format!("a row of table 'Bible' has no {} value", column),
        };

        Ok(VerseRecord {
            book: row.book.ok_or_else(|| missing("Book"))?,
            chapter: row.chapter.ok_or_else(|| missing("Chapter"))?,
            verse: row.verse.ok_or_else(|| missing("Verse"))?,
            text: row.scripture.ok_or_else(|| missing("Scripture"))?,
        })
    }
}

impl MySwordBible {
    /// Opens the MySword database at `path`.
    pub fn open(path: &str) -> Result<Self, ConvertError> {
        Ok(Self::new(establish_connection(path)?))
    }

    pub fn new(conn: SqliteConnection) -> Self {
        MySwordBible { conn }
    }

    /// Names of the columns of `table`, empty if the table does not exist.
    fn columns(&mut self, table: &str) -> Result<Vec<String>, ConvertError> {
        let columns = sql_query("SELECT name FROM pragma_table_info(?)")
            .bind::<Text, _>(table)
            .load::<ColumnInfo>(&mut self.conn)?;

        Ok(columns.into_iter().map(|c| c.name).collect())
    }

    /// Fails with `MalformedRow` unless the `Bible` table has every column we read.
    fn check_verse_columns(&mut self) -> Result<(), ConvertError> {
        let columns = self.columns("Bible")?;

        match VERSE_COLUMNS
            .iter()
            .find(|wanted| !columns.iter().any(|c| c.eq_ignore_ascii_case(wanted)))
        {
            Some(missing) => Err(ConvertError::MalformedRow {
                reason: format!("table 'Bible' has no '{}' column", missing),
            }),
            None => Ok(()),
        }
    }
}

impl VerseSource for MySwordBible {
    fn is_study_bible(&mut self) -> Result<bool, ConvertError> {
        self.check_verse_columns()?;

        let found = sql_query("SELECT 1 AS found FROM Bible WHERE instr(Scripture, ?) > 0 LIMIT 1")
            .bind::<Text, _>(FOOTNOTE_OPEN)
            .load::<Probe>(&mut self.conn)?;

        Ok(!found.is_empty())
    }

    fn verses(&mut self) -> Result<Vec<VerseRecord>, ConvertError> {
        self.check_verse_columns()?;

        let rows = sql_query(
            "SELECT Book AS book, Chapter AS chapter, Verse AS verse, Scripture AS scripture \
             FROM Bible ORDER BY Book, Chapter, Verse, Scripture",
        )
        .load::<VerseRow>(&mut self.conn)?;
        debug!("Read {} verses", rows.len());

        rows.into_iter().map(VerseRecord::try_from).collect()
    }

    fn details(&mut self) -> Result<SourceDetails, ConvertError> {
        let columns = self.columns("Details")?;
        if columns.is_empty() {
            debug!("No Details table, using default metadata");
            return Ok(SourceDetails::default());
        }

        let select = DETAIL_COLUMNS
            .iter()
            .map(|(alias, kind)| {
                match columns.iter().find(|c| c.eq_ignore_ascii_case(alias)) {
                    Some(column) => {
                        let cast = match kind {
                            DetailKind::Text => "TEXT",
                            DetailKind::Flag => "INTEGER",
                        };
                        format!(
                            "CAST(\"{}\" AS {}) AS {}",
                            column.replace('"', "\"\""),
                            cast,
                            alias
                        )
                    }
                    None => format!("NULL AS {}", alias),
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let details = sql_query(format!("SELECT {} FROM Details LIMIT 1", select))
            .load::<SourceDetails>(&mut self.conn)?;

        Ok(details.into_iter().next().unwrap_or_default())
    }
}
