//! Inventory list filtering and ordering.

use crate::model::inventory::{InventoryItem, StockStatus};
use crate::query::{
    any_field_matches, compare_text, distinct_values, normalize_needle, sort_by_spec, SortSpec,
};
use std::str::FromStr;

/// Stock-level tab of the inventory view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockView {
    #[default]
    All,
    Low,
    Out,
}

impl StockView {
    pub fn includes(self, item: &InventoryItem) -> bool {
        match self {
            Self::All => true,
            Self::Low => item.stock_status() == StockStatus::LowStock,
            Self::Out => item.stock_status() == StockStatus::OutOfStock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySortField {
    Name,
    Category,
    Quantity,
    MinQuantity,
    Price,
    Value,
}

impl FromStr for InventorySortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "quantity" => Ok(Self::Quantity),
            "minQuantity" | "min_quantity" => Ok(Self::MinQuantity),
            "price" => Ok(Self::Price),
            "value" => Ok(Self::Value),
            other => Err(format!("unknown inventory sort field `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryQuery {
    pub view: StockView,
    pub category: Option<String>,
    pub supplier: Option<String>,
    /// Matched against name, sku, barcode and location.
    pub search: String,
    pub sort: Option<SortSpec<InventorySortField>>,
}

pub fn filter_items<'a>(
    items: &'a [InventoryItem],
    query: &InventoryQuery,
) -> Vec<&'a InventoryItem> {
    let needle = normalize_needle(&query.search);
    let mut result: Vec<&InventoryItem> = items
        .iter()
        .filter(|item| query.view.includes(item))
        .filter(|item| {
            query
                .category
                .as_deref()
                .map_or(true, |category| item.category == category)
        })
        .filter(|item| {
            query
                .supplier
                .as_deref()
                .map_or(true, |supplier| item.supplier.as_deref() == Some(supplier))
        })
        .filter(|item| {
            needle.as_deref().map_or(true, |needle| {
                any_field_matches(
                    [
                        Some(item.name.as_str()),
                        Some(item.sku.as_str()),
                        item.barcode.as_deref(),
                        item.location.as_deref(),
                    ],
                    needle,
                )
            })
        })
        .collect();

    sort_by_spec(&mut result, query.sort.as_ref(), |field, a, b| match field {
        InventorySortField::Name => compare_text(&a.name, &b.name),
        InventorySortField::Category => compare_text(&a.category, &b.category),
        InventorySortField::Quantity => a.quantity.cmp(&b.quantity),
        InventorySortField::MinQuantity => a.min_quantity.cmp(&b.min_quantity),
        InventorySortField::Price => a.price.total_cmp(&b.price),
        InventorySortField::Value => a.stock_value().total_cmp(&b.stock_value()),
    });
    result
}

pub fn item_categories(items: &[InventoryItem]) -> Vec<String> {
    distinct_values(items.iter().map(|item| item.category.as_str()))
}

pub fn item_suppliers(items: &[InventoryItem]) -> Vec<String> {
    distinct_values(items.iter().filter_map(|item| item.supplier.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::{filter_items, item_suppliers, InventoryQuery, InventorySortField, StockView};
    use crate::model::inventory::InventoryItem;
    use crate::query::{SortDirection, SortSpec};

    fn items() -> Vec<InventoryItem> {
        let mut screen = InventoryItem::new("Screen", "Displays", 2, 5, 4_000.0);
        screen.sku = "SCR-01".to_string();
        screen.supplier = Some("Acme".to_string());
        let mut battery = InventoryItem::new("Battery", "Power", 0, 3, 1_200.0);
        battery.location = Some("Shelf B".to_string());
        let mut cable = InventoryItem::new("Cable", "Power", 40, 10, 150.0);
        cable.supplier = Some("Acme".to_string());
        vec![screen, battery, cable]
    }

    #[test]
    fn stock_views_split_low_and_out() {
        let items = items();
        let low = filter_items(
            &items,
            &InventoryQuery {
                view: StockView::Low,
                ..InventoryQuery::default()
            },
        );
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Screen");

        let out = filter_items(
            &items,
            &InventoryQuery {
                view: StockView::Out,
                ..InventoryQuery::default()
            },
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Battery");
    }

    #[test]
    fn exact_filters_and_search_combine() {
        let items = items();
        let query = InventoryQuery {
            category: Some("Power".to_string()),
            search: "shelf".to_string(),
            ..InventoryQuery::default()
        };
        let found = filter_items(&items, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Battery");

        let query = InventoryQuery {
            supplier: Some("Acme".to_string()),
            search: "scr-".to_string(),
            ..InventoryQuery::default()
        };
        assert_eq!(filter_items(&items, &query)[0].name, "Screen");
    }

    #[test]
    fn value_sort_uses_price_times_quantity() {
        let items = items();
        let query = InventoryQuery {
            sort: Some(SortSpec::new(InventorySortField::Value, SortDirection::Desc)),
            ..InventoryQuery::default()
        };
        let names: Vec<&str> = filter_items(&items, &query)
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["Screen", "Cable", "Battery"]);
        assert_eq!(item_suppliers(&items), vec!["Acme"]);
    }
}
