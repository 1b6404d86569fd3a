//! Common record contract used by storage and services.
//!
//! # Invariants
//! - `KIND` is unique per record type and doubles as the storage partition key.
//! - `validate()` is pure and must be called before every write.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for every stored record.
pub type EntityId = Uuid;

/// Record family stored by the CRUD layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Client,
    Transaction,
    InventoryItem,
    Schedule,
    Technician,
    Repair,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Client,
        EntityKind::Transaction,
        EntityKind::InventoryItem,
        EntityKind::Schedule,
        EntityKind::Technician,
        EntityKind::Repair,
    ];

    /// Storage and CLI name of this record family.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Transaction => "transaction",
            Self::InventoryItem => "inventory_item",
            Self::Schedule => "schedule",
            Self::Technician => "technician",
            Self::Repair => "repair",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "client" | "clients" => Ok(Self::Client),
            "transaction" | "transactions" | "finance" => Ok(Self::Transaction),
            "inventory_item" | "inventory" | "items" => Ok(Self::InventoryItem),
            "schedule" | "schedules" | "shifts" => Ok(Self::Schedule),
            "technician" | "technicians" => Ok(Self::Technician),
            "repair" | "repairs" => Ok(Self::Repair),
            other => Err(format!("unknown record kind `{other}`")),
        }
    }
}

/// Contract implemented by every record the store can hold.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Replaces the identity. Only the create path should call this.
    fn set_id(&mut self, id: EntityId);

    /// Checks required fields and value ranges.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Record-level validation failure, reported before any write.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is empty or whitespace-only.
    MissingField {
        kind: EntityKind,
        field: &'static str,
    },
    /// Numeric field must be strictly positive.
    NonPositive {
        kind: EntityKind,
        field: &'static str,
        value: f64,
    },
    /// Numeric field is NaN or infinite.
    NotFinite {
        kind: EntityKind,
        field: &'static str,
    },
    /// Numeric field is outside its accepted range.
    OutOfRange {
        kind: EntityKind,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Time span ends before (or when) it starts.
    InvalidTimeRange {
        field: &'static str,
        start: String,
        end: String,
    },
    /// Break must be given as a start/end pair.
    IncompleteBreak,
    /// Break must lie inside the shift.
    BreakOutsideShift,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { kind, field } => {
                write!(f, "{kind}: required field `{field}` is empty")
            }
            Self::NonPositive { kind, field, value } => {
                write!(f, "{kind}: `{field}` must be positive, got {value}")
            }
            Self::NotFinite { kind, field } => {
                write!(f, "{kind}: `{field}` must be a finite number")
            }
            Self::OutOfRange {
                kind,
                field,
                value,
                min,
                max,
            } => write!(f, "{kind}: `{field}` must be within {min}..={max}, got {value}"),
            Self::InvalidTimeRange { field, start, end } => {
                write!(f, "{field}: end `{end}` must be after start `{start}`")
            }
            Self::IncompleteBreak => write!(f, "break requires both start and end"),
            Self::BreakOutsideShift => write!(f, "break must lie inside the shift"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    kind: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { kind, field });
    }
    Ok(())
}

pub(crate) fn require_finite(
    kind: EntityKind,
    field: &'static str,
    value: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { kind, field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_finite, EntityKind, ValidationError};

    #[test]
    fn kind_parses_section_aliases() {
        assert_eq!("clients".parse::<EntityKind>(), Ok(EntityKind::Client));
        assert_eq!("Finance".parse::<EntityKind>(), Ok(EntityKind::Transaction));
        assert_eq!(
            "inventory".parse::<EntityKind>(),
            Ok(EntityKind::InventoryItem)
        );
        assert!("roles".parse::<EntityKind>().is_err());
    }

    #[test]
    fn kind_names_are_unique() {
        let mut names: Vec<&str> = EntityKind::ALL.iter().map(|kind| kind.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EntityKind::ALL.len());
    }

    #[test]
    fn require_finite_rejects_nan_and_infinities() {
        assert!(require_finite(EntityKind::Client, "totalSpent", 12.5).is_ok());
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                require_finite(EntityKind::Client, "totalSpent", value),
                Err(ValidationError::NotFinite {
                    kind: EntityKind::Client,
                    field: "totalSpent",
                })
            );
        }
    }
}
