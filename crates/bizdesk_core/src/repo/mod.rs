//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot/CRUD contract consumed by services.
//! - Isolate SQLite query details from section logic.
//!
//! # Invariants
//! - Repository writes enforce `Entity::validate()` before persistence.
//! - Missing ids surface as `NotFound`, not as silent no-ops.

pub mod record_repo;
