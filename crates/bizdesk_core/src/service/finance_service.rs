//! Finance-specific use-cases on top of the transaction service.

use crate::model::entity::EntityId;
use crate::model::transaction::Transaction;
use crate::repo::record_repo::{RecordRepository, RepoResult};
use crate::service::entity_service::EntityService;
use chrono::NaiveDate;

impl<R: RecordRepository<Transaction>> EntityService<Transaction, R> {
    /// Copies a transaction under a new id, dated `today`.
    pub fn duplicate_transaction(&self, id: EntityId, today: NaiveDate) -> RepoResult<Transaction> {
        let mut copy = self.require(id)?;
        copy.date = today;
        self.create(copy)
    }
}
