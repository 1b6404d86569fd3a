//! Client record and segment classification.
//!
//! # Invariants
//! - Segment is derived from `total_spent`/`total_orders` on every read.
//! - Segmentation is monotonic in spend: raising `total_spent` never demotes a client.

use crate::model::entity::{
    require_finite, require_text, Entity, EntityId, EntityKind, ValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spend above which a client is VIP regardless of order count.
pub const VIP_SPEND_THRESHOLD: f64 = 50_000.0;
/// Order count above which a client is VIP.
pub const VIP_ORDERS_THRESHOLD: u32 = 10;
/// Order count above which a non-VIP client is regular.
pub const REGULAR_ORDERS_THRESHOLD: u32 = 3;
/// Clients with at most this many orders count as first-time buyers.
pub const FIRST_TIME_ORDERS_MAX: u32 = 1;

/// Derived client tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientSegment {
    Vip,
    Regular,
    New,
}

impl ClientSegment {
    /// Classifies a spend/order pair.
    pub fn classify(total_spent: f64, total_orders: u32) -> Self {
        if total_spent > VIP_SPEND_THRESHOLD || total_orders > VIP_ORDERS_THRESHOLD {
            Self::Vip
        } else if total_orders > REGULAR_ORDERS_THRESHOLD {
            Self::Regular
        } else {
            Self::New
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
}

impl Client {
    /// Creates a client with no order history.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            email: String::new(),
            address: None,
            notes: None,
            total_orders: 0,
            total_spent: 0.0,
            created_at: Utc::now(),
            company: None,
            tax_id: None,
            discount_percent: None,
        }
    }

    pub fn segment(&self) -> ClientSegment {
        ClientSegment::classify(self.total_spent, self.total_orders)
    }
}

impl Entity for Client {
    const KIND: EntityKind = EntityKind::Client;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "phone", &self.phone)?;
        require_finite(Self::KIND, "totalSpent", self.total_spent)?;
        if let Some(discount) = self.discount_percent {
            if !(0.0..=100.0).contains(&discount) {
                return Err(ValidationError::OutOfRange {
                    kind: Self::KIND,
                    field: "discountPercent",
                    value: discount,
                    min: 0.0,
                    max: 100.0,
                });
            }
        }
        Ok(())
    }
}
