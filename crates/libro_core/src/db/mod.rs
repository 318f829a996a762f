//! Catalog storage: connection bootstrap and schema versioning.
//!
//! A connection handed out by this module always carries the latest
//! `books` schema, recorded in `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the catalog database.
#[derive(Debug)]
pub enum DbError {
    Storage(rusqlite::Error),
    /// The file carries a schema step this build does not know.
    CatalogTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "catalog storage failed: {err}"),
            Self::CatalogTooNew { found, supported } => write!(
                f,
                "catalog database is at schema v{found}, this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::CatalogTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value)
    }
}
