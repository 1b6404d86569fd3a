//! Inventory item record and stock status derivation.
//!
//! # Invariants
//! - `quantity == 0` is always `OutOfStock`, whatever `min_quantity` says.
//! - `0 < quantity <= min_quantity` is `LowStock`.
//! - Stock percentage is capped at 100.

use crate::model::entity::{
    require_finite, require_text, Entity, EntityId, EntityKind, ValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unit label used when an item does not declare one.
pub const DEFAULT_UNIT: &str = "pcs";

/// Derived stock state of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub min_quantity: u32,
    #[serde(default)]
    pub max_quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Warranty length in months.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub last_restocked: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
        min_quantity: u32,
        price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            sku: String::new(),
            quantity,
            min_quantity,
            max_quantity: 0,
            price,
            cost_price: None,
            supplier: None,
            location: None,
            unit: None,
            barcode: None,
            warranty: None,
            description: None,
            last_restocked: Utc::now(),
        }
    }

    pub fn stock_status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.min_quantity {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Fill level relative to the minimum stock, for progress display.
    ///
    /// `0` when out of stock, `100` when above minimum, otherwise
    /// `min(quantity / min_quantity * 100, 100)`.
    pub fn stock_percentage(&self) -> f64 {
        match self.stock_status() {
            StockStatus::OutOfStock => 0.0,
            StockStatus::InStock => 100.0,
            StockStatus::LowStock => {
                let ratio = f64::from(self.quantity) / f64::from(self.min_quantity) * 100.0;
                ratio.min(100.0)
            }
        }
    }

    /// Sell value of the stock on hand.
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Unit cost, falling back to the sell price when no positive cost is recorded.
    pub fn effective_cost_price(&self) -> f64 {
        self.cost_price
            .filter(|cost| *cost > 0.0)
            .unwrap_or(self.price)
    }

    pub fn unit_label(&self) -> &str {
        self.unit
            .as_deref()
            .filter(|unit| !unit.trim().is_empty())
            .unwrap_or(DEFAULT_UNIT)
    }
}

impl Entity for InventoryItem {
    const KIND: EntityKind = EntityKind::InventoryItem;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "category", &self.category)?;
        for (field, value) in [("price", Some(self.price)), ("costPrice", self.cost_price)] {
            if let Some(value) = value {
                require_finite(Self::KIND, field, value)?;
                if value < 0.0 {
                    return Err(ValidationError::OutOfRange {
                        kind: Self::KIND,
                        field,
                        value,
                        min: 0.0,
                        max: f64::MAX,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InventoryItem, StockStatus};

    #[test]
    fn zero_quantity_is_out_of_stock_for_any_minimum() {
        for min in [0, 1, 50] {
            let item = InventoryItem::new("cable", "parts", 0, min, 10.0);
            assert_eq!(item.stock_status(), StockStatus::OutOfStock);
            assert_eq!(item.stock_percentage(), 0.0);
        }
    }

    #[test]
    fn low_stock_percentage_is_relative_to_minimum() {
        let item = InventoryItem::new("screen", "parts", 3, 4, 10.0);
        assert_eq!(item.stock_status(), StockStatus::LowStock);
        assert_eq!(item.stock_percentage(), 75.0);

        let at_minimum = InventoryItem::new("screen", "parts", 4, 4, 10.0);
        assert_eq!(at_minimum.stock_status(), StockStatus::LowStock);
        assert_eq!(at_minimum.stock_percentage(), 100.0);
    }

    #[test]
    fn above_minimum_is_in_stock_at_full_percentage() {
        let item = InventoryItem::new("battery", "parts", 9, 2, 10.0);
        assert_eq!(item.stock_status(), StockStatus::InStock);
        assert_eq!(item.stock_percentage(), 100.0);
    }

    #[test]
    fn effective_cost_price_falls_back_to_price() {
        let mut item = InventoryItem::new("glass", "parts", 1, 0, 80.0);
        assert_eq!(item.effective_cost_price(), 80.0);
        item.cost_price = Some(0.0);
        assert_eq!(item.effective_cost_price(), 80.0);
        item.cost_price = Some(50.0);
        assert_eq!(item.effective_cost_price(), 50.0);
    }
}
