//! Conversion of MySword Bible modules into e-Sword HD modules.
//!
//! The crate is split the way the conversion flows: [source] reads the
//! MySword database, [extractor] runs every verse through the
//! [markup] and [references] rewrite rules, and [target] persists the
//! resulting scripture and commentary streams. [`convert()`] wires the three
//! together for the command line.

use diesel::prelude::*;
use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Clone, Error, Debug, PartialEq)]
pub enum ConvertError {
    #[error("Book number '{}' has no known abbreviation.", book_id)]
    UnknownBookId { book_id: String },

    #[error("The source database is malformed: {}.", reason)]
    MalformedRow { reason: String },

    #[error("The file '{}' was not found.", path)]
    InputNotFound { path: String },

    #[error("'{}' is not a usable module file name.", path)]
    InvalidFileName { path: String },

    #[error("Could not connect to '{}'. Root cause: {}.", url, cause)]
    Connection { url: String, cause: String },

    #[error("There was a database error. Root cause: {}.", cause)]
    Database { cause: String },

    #[error("There was a file system error. Root cause: {}.", cause)]
    Io { cause: String },
}

impl From<diesel::result::Error> for ConvertError {
    fn from(e: diesel::result::Error) -> Self {
        ConvertError::Database {
            cause: e.to_string(),
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        ConvertError::Io {
            cause: e.to_string(),
        }
    }
}

/// Establishes a SQLite connection, creating the database if it does not exist.
pub fn establish_connection(db_url: &str) -> Result<SqliteConnection, ConvertError> {
    SqliteConnection::establish(db_url).map_err(|e| ConvertError::Connection {
        url: db_url.to_owned(),
        cause: e.to_string(),
    })
}

pub mod abbreviations;
pub mod convert;
pub mod extractor;
pub mod markup;
pub mod models;
pub mod references;
mod schema;
pub mod source;
pub mod target;

pub use convert::{convert, Report};
pub use extractor::{Extraction, Mode};
pub use source::{MySwordBible, VerseSource};
