//! e-Sword HD table definitions.
//!
//! e-Sword tables have no primary key, so the implicit SQLite `rowid` stands
//! in for one. It is never written.

/// Tables of a `.bbli` Bible module.
pub const BIBLE_DDL: &str = "
CREATE TABLE Bible (Book INT, Chapter INT, Verse INT, Scripture BLOB_TEXT);
CREATE TABLE Details (Title NVARCHAR(100), Abbreviation NVARCHAR(50), Information TEXT, Version INT, OldTestament BOOL, NewTestament BOOL, Apocrypha BOOL, Strongs BOOL, RightToLeft BOOL);
CREATE INDEX BookChapterVerseIndex ON Bible (Book, Chapter, Verse);
";

/// Tables of a `.cmti` commentary module.
pub const COMMENTARY_DDL: &str = "
CREATE TABLE BookCommentary (Book INT, Comments TEXT);
CREATE TABLE ChapterCommentary (Book INT, Chapter INT, Comments TEXT);
CREATE TABLE VerseCommentary (Book INT, ChapterBegin INT, VerseBegin INT, ChapterEnd INT, VerseEnd INT, Comments TEXT);
CREATE TABLE data (rowid INTEGER PRIMARY KEY AUTOINCREMENT, id TEXT COLLATE NOCASE, filename TEXT, content BLOB);
CREATE TABLE Details (Title NVARCHAR(255), Abbreviation NVARCHAR(50), Information TEXT, Version INT, customcss TEXT);
CREATE INDEX BookChapterIndex ON ChapterCommentary (Book, Chapter);
CREATE INDEX BookChapterVerseIndex ON VerseCommentary (Book, ChapterBegin, VerseBegin);
CREATE INDEX BookIndex ON BookCommentary (Book);
CREATE UNIQUE INDEX idx_data_id ON data (id);
";

diesel::table! {
    #[sql_name = "Bible"]
    bible (rowid) {
        rowid -> Integer,
        #[sql_name = "Book"]
        book -> Integer,
        #[sql_name = "Chapter"]
        chapter -> Integer,
        #[sql_name = "Verse"]
        verse -> Integer,
        #[sql_name = "Scripture"]
        scripture -> Text,
    }
}

diesel::table! {
    #[sql_name = "Details"]
    bible_details (rowid) {
        rowid -> Integer,
        #[sql_name = "Title"]
        title -> Text,
        #[sql_name = "Abbreviation"]
        abbreviation -> Text,
        #[sql_name = "Information"]
        information -> Text,
        #[sql_name = "Version"]
        version -> Integer,
        #[sql_name = "OldTestament"]
        old_testament -> Bool,
        #[sql_name = "NewTestament"]
        new_testament -> Bool,
        #[sql_name = "Apocrypha"]
        apocrypha -> Bool,
        #[sql_name = "Strongs"]
        strongs -> Bool,
        #[sql_name = "RightToLeft"]
        right_to_left -> Bool,
    }
}

diesel::table! {
    #[sql_name = "VerseCommentary"]
    verse_commentary (rowid) {
        rowid -> Integer,
        #[sql_name = "Book"]
        book -> Integer,
        #[sql_name = "ChapterBegin"]
        chapter_begin -> Integer,
        #[sql_name = "VerseBegin"]
        verse_begin -> Integer,
        #[sql_name = "ChapterEnd"]
        chapter_end -> Integer,
        #[sql_name = "VerseEnd"]
        verse_end -> Integer,
        #[sql_name = "Comments"]
        comments -> Text,
    }
}

diesel::table! {
    #[sql_name = "Details"]
    commentary_details (rowid) {
        rowid -> Integer,
        #[sql_name = "Title"]
        title -> Text,
        #[sql_name = "Abbreviation"]
        abbreviation -> Text,
        #[sql_name = "Information"]
        information -> Text,
        #[sql_name = "Version"]
        version -> Integer,
        #[sql_name = "customcss"]
        custom_css -> Text,
    }
}
