//! Client segmentation and ranking summary.

use crate::model::client::{Client, ClientSegment, FIRST_TIME_ORDERS_MAX};
use crate::stats::{mean, percent_of};
use serde::Serialize;

pub const TOP_CLIENTS_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SegmentCounts {
    pub vip: usize,
    pub regular: usize,
    pub new: usize,
}

impl SegmentCounts {
    pub fn get(&self, segment: ClientSegment) -> usize {
        match segment {
            ClientSegment::Vip => self.vip,
            ClientSegment::Regular => self.regular,
            ClientSegment::New => self.new,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub total_clients: usize,
    pub segments: SegmentCounts,
    /// Clients with at most one order.
    pub first_time_clients: usize,
    /// Clients with at least one order.
    pub active_clients: usize,
    pub with_email: usize,
    /// VIP share of all clients, rounded to a whole percent.
    pub vip_share_percent: f64,
    pub total_revenue: f64,
    /// Revenue per client, rounded to whole currency units.
    pub average_spend: f64,
    /// Highest spenders, ties kept in snapshot order.
    pub top_clients: Vec<Client>,
}

pub fn client_stats(clients: &[Client]) -> ClientStats {
    let mut segments = SegmentCounts::default();
    for client in clients {
        match client.segment() {
            ClientSegment::Vip => segments.vip += 1,
            ClientSegment::Regular => segments.regular += 1,
            ClientSegment::New => segments.new += 1,
        }
    }

    let total_revenue: f64 = clients.iter().map(|client| client.total_spent).sum();

    let mut ranked: Vec<&Client> = clients.iter().collect();
    ranked.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    let top_clients = ranked
        .into_iter()
        .take(TOP_CLIENTS_LIMIT)
        .cloned()
        .collect();

    ClientStats {
        total_clients: clients.len(),
        segments,
        first_time_clients: clients
            .iter()
            .filter(|client| client.total_orders <= FIRST_TIME_ORDERS_MAX)
            .count(),
        active_clients: clients
            .iter()
            .filter(|client| client.total_orders > 0)
            .count(),
        with_email: clients
            .iter()
            .filter(|client| !client.email.trim().is_empty())
            .count(),
        vip_share_percent: percent_of(segments.vip as f64, clients.len() as f64).round(),
        total_revenue,
        average_spend: mean(total_revenue, clients.len()).round(),
        top_clients,
    }
}

#[cfg(test)]
mod tests {
    use super::{client_stats, TOP_CLIENTS_LIMIT};
    use crate::model::client::Client;

    fn client(name: &str, orders: u32, spent: f64) -> Client {
        let mut client = Client::new(name, "+1 555 0100");
        client.total_orders = orders;
        client.total_spent = spent;
        client
    }

    #[test]
    fn empty_snapshot_yields_zeroed_stats() {
        let stats = client_stats(&[]);
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.vip_share_percent, 0.0);
        assert_eq!(stats.average_spend, 0.0);
        assert!(stats.top_clients.is_empty());
    }

    #[test]
    fn segments_partition_all_clients() {
        let clients = vec![
            client("vip", 12, 60_000.0),
            client("regular", 4, 2_000.0),
            client("new", 0, 0.0),
            client("once", 1, 300.0),
        ];
        let stats = client_stats(&clients);
        let segments = stats.segments;
        assert_eq!(segments.vip + segments.regular + segments.new, 4);
        assert_eq!(segments.vip, 1);
        assert_eq!(stats.first_time_clients, 2);
        assert_eq!(stats.active_clients, 3);
        assert_eq!(stats.vip_share_percent, 25.0);
        assert_eq!(stats.average_spend, 15_575.0);
    }

    #[test]
    fn top_clients_keep_snapshot_order_on_ties() {
        let clients: Vec<Client> = (0..7)
            .map(|index| client(&format!("c{index}"), 2, if index == 6 { 900.0 } else { 100.0 }))
            .collect();
        let names: Vec<String> = client_stats(&clients)
            .top_clients
            .into_iter()
            .map(|client| client.name)
            .collect();
        assert_eq!(names.len(), TOP_CLIENTS_LIMIT);
        assert_eq!(names, vec!["c6", "c0", "c1", "c2", "c3"]);
    }
}
