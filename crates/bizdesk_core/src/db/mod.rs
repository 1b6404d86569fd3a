//! Storage for the back-office record store.
//!
//! Every section (clients, finance, inventory, schedules, technicians,
//! repairs) lives in the single `records` table as JSON documents keyed by
//! `(kind, id)`, with an insertion sequence that gives `get_all` its order.
//!
//! # Invariants
//! - A connection handed out by [`open_db`] or [`open_db_in_memory`] has the
//!   `records` table migrated to [`migrations::latest_version`].
//! - A store stamped by a newer build is refused rather than downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
pub use rusqlite::Connection;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A migration script failed; the store keeps its previous version.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// `PRAGMA user_version` is ahead of what this build can read.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "record store: {err}"),
            Self::Migration { version, source } => {
                write!(f, "record store migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "record store has schema {found}; this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;

    #[test]
    fn newer_schema_message_names_both_versions() {
        let message = DbError::UnsupportedSchemaVersion {
            found: 7,
            supported: 1,
        }
        .to_string();
        assert!(message.contains("schema 7"));
        assert!(message.contains("up to 1"));
    }
}
