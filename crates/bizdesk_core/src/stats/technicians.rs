//! Technician availability and workload summary.

use crate::model::entity::EntityId;
use crate::model::technician::{Technician, TechnicianStatus};
use crate::stats::{mean, percent_of, round_to};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianWorkload {
    pub technician_id: EntityId,
    pub name: String,
    pub current: u32,
    pub capacity: u32,
    /// Whole percent; may exceed 100 for overbooked technicians.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianStats {
    pub total: usize,
    pub available: usize,
    pub busy: usize,
    pub offline: usize,
    /// Available plus busy.
    pub on_shift: usize,
    pub completed_repairs: u64,
    /// One decimal.
    pub average_rating: f64,
    /// Σ current / Σ capacity in percent, one decimal.
    pub capacity_percent: f64,
    pub workloads: Vec<TechnicianWorkload>,
}

pub fn technician_stats(technicians: &[Technician]) -> TechnicianStats {
    let count_status = |status: TechnicianStatus| {
        technicians
            .iter()
            .filter(|technician| technician.status == status)
            .count()
    };
    let available = count_status(TechnicianStatus::Available);
    let busy = count_status(TechnicianStatus::Busy);

    let rating_sum: f64 = technicians.iter().map(|technician| technician.rating).sum();
    let assigned: u64 = technicians
        .iter()
        .map(|technician| u64::from(technician.current_workload))
        .sum();
    let capacity: u64 = technicians
        .iter()
        .map(|technician| u64::from(technician.capacity()))
        .sum();

    TechnicianStats {
        total: technicians.len(),
        available,
        busy,
        offline: count_status(TechnicianStatus::Offline),
        on_shift: available + busy,
        completed_repairs: technicians
            .iter()
            .map(|technician| u64::from(technician.completed_repairs))
            .sum(),
        average_rating: round_to(mean(rating_sum, technicians.len()), 1),
        capacity_percent: round_to(percent_of(assigned as f64, capacity as f64), 1),
        workloads: technicians
            .iter()
            .map(|technician| TechnicianWorkload {
                technician_id: technician.id,
                name: technician.name.clone(),
                current: technician.current_workload,
                capacity: technician.capacity(),
                percent: technician.workload_percent().round(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::technician_stats;
    use crate::model::technician::{Technician, TechnicianStatus};

    #[test]
    fn counts_statuses_and_capacity() {
        let mut busy = Technician::new("Ivan", TechnicianStatus::Busy);
        busy.current_workload = 4;
        busy.rating = 4.5;
        busy.completed_repairs = 10;
        let mut free = Technician::new("Olga", TechnicianStatus::Available);
        free.current_workload = 1;
        free.rating = 4.0;
        free.completed_repairs = 3;
        let off = Technician::new("Petr", TechnicianStatus::Offline);

        let stats = technician_stats(&[busy, free, off]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.on_shift, 2);
        assert_eq!(stats.offline, 1);
        assert_eq!(stats.completed_repairs, 13);
        assert_eq!(stats.capacity_percent, 33.3);
        assert_eq!(stats.workloads[0].percent, 80.0);
    }

    #[test]
    fn empty_team_reports_zero() {
        let stats = technician_stats(&[]);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.capacity_percent, 0.0);
    }
}
