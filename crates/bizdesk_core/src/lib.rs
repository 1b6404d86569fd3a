//! Core domain logic for the bizdesk back-office.
//! Owns the record model, storage, per-section services and derived statistics.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod stats;
pub mod transfer;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{Entity, EntityId, EntityKind, ValidationError};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use service::entity_service::EntityService;
pub use service::schedule_service::{ScheduleServiceError, ShiftRequest};
pub use service::{
    ClientService, FinanceService, InventoryService, RepairService, ScheduleService,
    TechnicianService,
};
pub use transfer::{export_json, parse_import, TransferError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
