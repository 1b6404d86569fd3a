//! JSON import/export of entity arrays.
//!
//! # Invariants
//! - Export is a pretty-printed JSON array in snapshot order.
//! - Import accepts any array of record-shaped objects; records without an
//!   `id` receive a fresh one during decoding.

use crate::model::entity::{Entity, EntityKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum TransferError {
    Decode {
        kind: EntityKind,
        source: serde_json::Error,
    },
    Encode {
        kind: EntityKind,
        source: serde_json::Error,
    },
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode { kind, source } => write!(f, "cannot read {kind} import: {source}"),
            Self::Encode { kind, source } => write!(f, "cannot write {kind} export: {source}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Serializes records as a JSON array.
pub fn export_json<E: Entity>(records: &[E]) -> Result<String, TransferError> {
    serde_json::to_string_pretty(records).map_err(|source| TransferError::Encode {
        kind: E::KIND,
        source,
    })
}

/// Parses a JSON array of records for bulk import.
pub fn parse_import<E: Entity>(json: &str) -> Result<Vec<E>, TransferError> {
    serde_json::from_str(json).map_err(|source| TransferError::Decode {
        kind: E::KIND,
        source,
    })
}
