//! Persistence of converted streams into e-Sword HD modules.
//!
//! Each module is written in a single transaction (schema, `Details` row and
//! records) and compacted afterwards, so a failed run leaves no half-filled
//! tables behind.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use log::{debug, info};

use crate::models::{BibleDetails, CommentaryDetails, CommentaryRecord, ScriptureRecord};
use crate::schema::{
    bible, bible_details, commentary_details, verse_commentary, BIBLE_DDL, COMMENTARY_DDL,
};
use crate::ConvertError;

/// Records per `INSERT` statement. Keeps the bound parameter count well under
/// SQLite's limit.
const INSERT_CHUNK_SIZE: usize = 500;

/// Creates the `.bbli` tables and fills them.
pub fn write_bible(
    conn: &mut SqliteConnection,
    details: &BibleDetails,
    records: &[ScriptureRecord],
) -> Result<(), ConvertError> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        conn.batch_execute(BIBLE_DDL)?;
        diesel::insert_into(bible_details::table)
            .values(details)
            .execute(conn)?;

        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            diesel::insert_into(bible::table).values(chunk).execute(conn)?;
        }
        Ok(())
    })?;
    info!("Wrote {} verses", records.len());

    compact(conn)
}

/// Creates the `.cmti` tables and fills the verse commentaries.
pub fn write_commentary(
    conn: &mut SqliteConnection,
    details: &CommentaryDetails,
    records: &[CommentaryRecord],
) -> Result<(), ConvertError> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        conn.batch_execute(COMMENTARY_DDL)?;
        diesel::insert_into(commentary_details::table)
            .values(details)
            .execute(conn)?;

        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            diesel::insert_into(verse_commentary::table)
                .values(chunk)
                .execute(conn)?;
        }
        Ok(())
    })?;
    info!("Wrote {} verse commentaries", records.len());

    compact(conn)
}

fn compact(conn: &mut SqliteConnection) -> Result<(), ConvertError> {
    debug!("Vacuuming");
    conn.batch_execute("VACUUM")?;
    Ok(())
}
