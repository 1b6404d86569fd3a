//! Core use-case services.
//!
//! # Responsibility
//! - Wrap record repositories into the per-section CRUD contract.
//! - Host section-specific mutations (restock, duplication, recurring shifts).

pub mod entity_service;
pub mod finance_service;
pub mod inventory_service;
pub mod schedule_service;

use crate::model::client::Client;
use crate::model::inventory::InventoryItem;
use crate::model::repair::Repair;
use crate::model::schedule::Schedule;
use crate::model::technician::Technician;
use crate::model::transaction::Transaction;
use crate::repo::record_repo::SqliteRecordRepository;
use entity_service::EntityService;

pub type ClientService<'conn> = EntityService<Client, SqliteRecordRepository<'conn, Client>>;
pub type FinanceService<'conn> =
    EntityService<Transaction, SqliteRecordRepository<'conn, Transaction>>;
pub type InventoryService<'conn> =
    EntityService<InventoryItem, SqliteRecordRepository<'conn, InventoryItem>>;
pub type ScheduleService<'conn> = EntityService<Schedule, SqliteRecordRepository<'conn, Schedule>>;
pub type TechnicianService<'conn> =
    EntityService<Technician, SqliteRecordRepository<'conn, Technician>>;
pub type RepairService<'conn> = EntityService<Repair, SqliteRecordRepository<'conn, Repair>>;
