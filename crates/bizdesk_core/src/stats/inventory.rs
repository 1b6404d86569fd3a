//! Inventory stock analysis and reorder planning.
//!
//! # Invariants
//! - Every item lands in exactly one of in-stock/low/out.
//! - `potential_profit == total_value - total_cost_value`.

use crate::model::entity::EntityId;
use crate::model::inventory::{InventoryItem, StockStatus};
use crate::stats::{mean, rollup};
use serde::Serialize;

pub const TOP_ITEMS_LIMIT: usize = 10;
/// Supplier bucket for items without one.
pub const NO_SUPPLIER: &str = "no supplier";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevels {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// Count/value/quantity totals for one category or supplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rollup {
    pub name: String,
    pub count: usize,
    pub value: f64,
    pub quantity: u64,
}

impl Rollup {
    fn add(&mut self, item: &InventoryItem) {
        self.count += 1;
        self.value += item.stock_value();
        self.quantity += u64::from(item.quantity);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: usize,
    pub stock: StockLevels,
    /// Low plus out-of-stock items.
    pub critical_items: usize,
    /// Sum of `price * quantity`.
    pub total_value: f64,
    pub total_cost_value: f64,
    pub potential_profit: f64,
    pub by_category: Vec<Rollup>,
    pub by_supplier: Vec<Rollup>,
    /// Highest stock value first, ties in snapshot order.
    pub top_items: Vec<InventoryItem>,
    pub average_price: f64,
    pub total_quantity: u64,
    pub average_quantity: f64,
}

pub fn inventory_stats(items: &[InventoryItem]) -> InventoryStats {
    let mut stock = StockLevels::default();
    for item in items {
        match item.stock_status() {
            StockStatus::InStock => stock.in_stock += 1,
            StockStatus::LowStock => stock.low_stock += 1,
            StockStatus::OutOfStock => stock.out_of_stock += 1,
        }
    }

    let total_value: f64 = items.iter().map(InventoryItem::stock_value).sum();
    let total_cost_value: f64 = items
        .iter()
        .map(|item| item.effective_cost_price() * f64::from(item.quantity))
        .sum();
    let total_quantity: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();
    let price_sum: f64 = items.iter().map(|item| item.price).sum();

    let by_category = named_rollups(items, |item| item.category.clone());
    let by_supplier = named_rollups(items, |item| {
        item.supplier
            .clone()
            .filter(|supplier| !supplier.trim().is_empty())
            .unwrap_or_else(|| NO_SUPPLIER.to_string())
    });

    let mut ranked: Vec<&InventoryItem> = items.iter().collect();
    ranked.sort_by(|a, b| b.stock_value().total_cmp(&a.stock_value()));
    let top_items = ranked.into_iter().take(TOP_ITEMS_LIMIT).cloned().collect();

    InventoryStats {
        total_items: items.len(),
        stock,
        critical_items: stock.low_stock + stock.out_of_stock,
        total_value,
        total_cost_value,
        potential_profit: total_value - total_cost_value,
        by_category,
        by_supplier,
        top_items,
        average_price: mean(price_sum, items.len()),
        total_quantity,
        average_quantity: mean(total_quantity as f64, items.len()),
    }
}

fn named_rollups<K>(items: &[InventoryItem], key: K) -> Vec<Rollup>
where
    K: Fn(&InventoryItem) -> String,
{
    rollup(items, key, |totals: &mut Rollup, item| totals.add(item))
        .into_iter()
        .map(|(name, totals)| Rollup { name, ..totals })
        .collect()
}

/// Suggested purchase for one item at or below its minimum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderLine {
    pub item_id: EntityId,
    pub name: String,
    pub sku: String,
    /// Units needed to reach `max_quantity`; zero when no maximum is set.
    pub order_quantity: u32,
    pub unit: String,
}

/// Items with `quantity <= min_quantity`, in snapshot order.
pub fn reorder_list(items: &[InventoryItem]) -> Vec<ReorderLine> {
    items
        .iter()
        .filter(|item| item.quantity <= item.min_quantity)
        .map(|item| ReorderLine {
            item_id: item.id,
            name: item.name.clone(),
            sku: item.sku.clone(),
            order_quantity: item.max_quantity.saturating_sub(item.quantity),
            unit: item.unit_label().to_string(),
        })
        .collect()
}
