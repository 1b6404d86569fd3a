//! Business record model shared by every dashboard section.
//!
//! # Responsibility
//! - Define the canonical records owned by the CRUD services.
//! - Provide per-record derived values (segment, stock status, worked hours).
//!
//! # Invariants
//! - Every record is identified by a stable `EntityId`.
//! - Derived classifications are computed on read and never stored.
//! - Wire field names use camelCase so exported arrays keep the dashboard's record shape.

pub mod client;
pub mod entity;
pub mod inventory;
pub mod repair;
pub mod schedule;
pub mod shift_time;
pub mod technician;
pub mod transaction;
