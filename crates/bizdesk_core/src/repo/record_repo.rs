//! Record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide snapshot/CRUD access to one record family.
//! - Keep SQL and JSON document encoding inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Entity::validate()` before SQL mutations.
//! - A body is only written when it decodes back into the same record type.
//! - Read paths reject undecodable or invalid rows instead of skipping them.
//! - `list_all` returns records in insertion order.

use crate::db::DbError;
use crate::model::entity::{Entity, EntityId, EntityKind, ValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        kind: EntityKind,
        id: EntityId,
    },
    DuplicateId {
        kind: EntityKind,
        id: EntityId,
    },
    InvalidData(String),
    InvalidPatch(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId { kind, id } => write!(f, "{kind} already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
            Self::InvalidPatch(message) => write!(f, "invalid patch: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for one record family.
pub trait RecordRepository<E: Entity> {
    /// Full snapshot in insertion order.
    fn list_all(&self) -> RepoResult<Vec<E>>;
    fn get(&self, id: EntityId) -> RepoResult<Option<E>>;
    /// Appends one record under its current id.
    fn insert(&self, record: &E) -> RepoResult<EntityId>;
    /// Appends all records atomically; nothing is written if one fails.
    fn insert_all(&self, records: &[E]) -> RepoResult<usize>;
    /// Overwrites the stored record with the same id.
    fn replace(&self, record: &E) -> RepoResult<()>;
    fn delete(&self, id: EntityId) -> RepoResult<()>;
}

/// SQLite-backed repository storing records as JSON documents.
pub struct SqliteRecordRepository<'conn, E> {
    conn: &'conn Connection,
    _record: PhantomData<E>,
}

impl<'conn, E: Entity> SqliteRecordRepository<'conn, E> {
    /// Binds a repository to a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the connection was not opened through
    ///   `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "records")? {
            return Err(RepoError::MissingRequiredTable("records"));
        }
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn insert_row(&self, record: &E) -> RepoResult<EntityId> {
        record.validate()?;
        let id = record.id();
        if self.exists(id)? {
            return Err(RepoError::DuplicateId { kind: E::KIND, id });
        }

        self.conn.execute(
            "INSERT INTO records (kind, id, body) VALUES (?1, ?2, ?3);",
            params![E::KIND.as_str(), id.to_string(), encode_body(record)?],
        )?;
        Ok(id)
    }

    fn exists(&self, id: EntityId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM records WHERE kind = ?1 AND id = ?2;",
                params![E::KIND.as_str(), id.to_string()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl<E: Entity> RecordRepository<E> for SqliteRecordRepository<'_, E> {
    fn list_all(&self) -> RepoResult<Vec<E>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM records WHERE kind = ?1 ORDER BY seq ASC;")?;
        let mut rows = stmt.query([E::KIND.as_str()])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let id: String = row.get("id")?;
            let body: String = row.get("body")?;
            records.push(decode_body::<E>(&id, &body)?);
        }

        Ok(records)
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<E>> {
        let id_text = id.to_string();
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM records WHERE kind = ?1 AND id = ?2;",
                params![E::KIND.as_str(), id_text],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|body| decode_body::<E>(&id_text, &body))
            .transpose()
    }

    fn insert(&self, record: &E) -> RepoResult<EntityId> {
        self.insert_row(record)
    }

    fn insert_all(&self, records: &[E]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for record in records {
            self.insert_row(record)?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    fn replace(&self, record: &E) -> RepoResult<()> {
        record.validate()?;

        let changed = self.conn.execute(
            "UPDATE records
             SET
                body = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE kind = ?2 AND id = ?3;",
            params![
                encode_body(record)?,
                E::KIND.as_str(),
                record.id().to_string()
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: E::KIND,
                id: record.id(),
            });
        }
        Ok(())
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM records WHERE kind = ?1 AND id = ?2;",
            params![E::KIND.as_str(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { kind: E::KIND, id });
        }
        Ok(())
    }
}

/// Encodes a record body and checks that it decodes back.
///
/// `serde_json` writes NaN and infinities as `null`, which would leave a row
/// that `list_all` can no longer read.
fn encode_body<E: Entity>(record: &E) -> RepoResult<String> {
    let body = serde_json::to_string(record).map_err(|err| {
        RepoError::InvalidData(format!("cannot encode {} {}: {err}", E::KIND, record.id()))
    })?;
    serde_json::from_str::<E>(&body).map_err(|err| {
        RepoError::InvalidData(format!(
            "{} {} does not read back after encoding: {err}",
            E::KIND,
            record.id()
        ))
    })?;
    Ok(body)
}

fn decode_body<E: Entity>(id_text: &str, body: &str) -> RepoResult<E> {
    let record: E = serde_json::from_str(body).map_err(|err| {
        RepoError::InvalidData(format!("cannot decode {} `{id_text}`: {err}", E::KIND))
    })?;

    if record.id().to_string() != id_text {
        return Err(RepoError::InvalidData(format!(
            "{} row `{id_text}` carries mismatched body id {}",
            E::KIND,
            record.id()
        )));
    }
    record.validate()?;
    Ok(record)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
