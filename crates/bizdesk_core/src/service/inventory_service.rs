//! Inventory-specific use-cases on top of the item service.

use crate::model::entity::EntityId;
use crate::model::inventory::InventoryItem;
use crate::repo::record_repo::{RecordRepository, RepoResult};
use crate::service::entity_service::EntityService;
use chrono::{DateTime, Utc};
use log::info;

impl<R: RecordRepository<InventoryItem>> EntityService<InventoryItem, R> {
    /// Adds `amount` units to stock and stamps the restock time.
    pub fn restock(
        &self,
        id: EntityId,
        amount: u32,
        restocked_at: DateTime<Utc>,
    ) -> RepoResult<InventoryItem> {
        let mut item = self.require(id)?;
        item.quantity = item.quantity.saturating_add(amount);
        item.last_restocked = restocked_at;
        let item = self.replace(item)?;
        info!("event=inventory_restock module=service status=ok id={id} added={amount}");
        Ok(item)
    }
}
