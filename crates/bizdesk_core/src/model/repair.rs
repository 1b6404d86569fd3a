//! Repair order record, referenced by clients and schedules.
//!
//! References to clients and technicians are not enforced by the store.

use crate::model::entity::{require_text, Entity, EntityId, EntityKind, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repair {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<EntityId>,
    pub device_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Repair {
    pub fn new(device_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: None,
            technician_id: None,
            device_type: device_type.into(),
            status: "new".to_string(),
            scheduled_date: None,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Repair {
    const KIND: EntityKind = EntityKind::Repair;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "deviceType", &self.device_type)
    }
}
