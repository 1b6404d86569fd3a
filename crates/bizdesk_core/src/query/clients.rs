//! Client list filtering and ordering.

use crate::model::client::{Client, ClientSegment};
use crate::model::entity::EntityId;
use crate::model::repair::Repair;
use crate::query::{
    any_field_matches, compare_text, normalize_needle, sort_by_spec, SortDirection, SortSpec,
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSortField {
    Name,
    Orders,
    Spent,
    Created,
}

impl FromStr for ClientSortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "orders" => Ok(Self::Orders),
            "spent" => Ok(Self::Spent),
            "created" => Ok(Self::Created),
            other => Err(format!("unknown client sort field `{other}`")),
        }
    }
}

/// Client list view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientQuery {
    /// Matched against name, phone, email and address.
    pub search: String,
    /// `None` shows every segment.
    pub segment: Option<ClientSegment>,
    pub sort: Option<SortSpec<ClientSortField>>,
}

impl Default for ClientQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            segment: None,
            sort: Some(SortSpec::new(ClientSortField::Name, SortDirection::Asc)),
        }
    }
}

/// Applies search, segment filter and sort to a client snapshot.
pub fn filter_clients<'a>(clients: &'a [Client], query: &ClientQuery) -> Vec<&'a Client> {
    let needle = normalize_needle(&query.search);
    let mut result: Vec<&Client> = clients
        .iter()
        .filter(|client| {
            needle.as_deref().map_or(true, |needle| {
                any_field_matches(
                    [
                        Some(client.name.as_str()),
                        Some(client.phone.as_str()),
                        Some(client.email.as_str()),
                        client.address.as_deref(),
                    ],
                    needle,
                )
            })
        })
        .filter(|client| {
            query
                .segment
                .map_or(true, |segment| client.segment() == segment)
        })
        .collect();

    sort_by_spec(&mut result, query.sort.as_ref(), |field, a, b| match field {
        ClientSortField::Name => compare_text(&a.name, &b.name),
        ClientSortField::Orders => a.total_orders.cmp(&b.total_orders),
        ClientSortField::Spent => a.total_spent.total_cmp(&b.total_spent),
        ClientSortField::Created => a.created_at.cmp(&b.created_at),
    });
    result
}

/// Repairs ordered by one client, in snapshot order.
pub fn client_repairs(repairs: &[Repair], client_id: EntityId) -> Vec<&Repair> {
    repairs
        .iter()
        .filter(|repair| repair.client_id == Some(client_id))
        .collect()
}
