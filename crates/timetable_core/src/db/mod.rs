//! Timetable store: connection bootstrap and schema versioning.
//!
//! The store holds the catalog (teachers, subjects, classrooms,
//! requirements), the shared time slot grid and the committed schedule
//! entries. Entries are regenerated wholesale, so the catalog and slot grid
//! are the only long-lived data; a file written by a newer build may lay
//! them out differently and is refused rather than regenerated over.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Repositories only see connections whose version equals
//!   [`migrations::latest_version`].

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening or migrating the timetable store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "timetable store error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "timetable store schema v{db_version} is newer than this build (v{latest_supported}); refusing to open"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
