//! Worked-hours and shift distribution summary.
//!
//! # Invariants
//! - Hours are summed unrounded and rounded to one decimal at the end.
//! - Names are ordered case-insensitively; most busy ties go to the first name in that order.

use crate::model::schedule::Schedule;
use crate::query::compare_text;
use crate::stats::{mean, round_to};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianShifts {
    pub technician_name: String,
    pub shifts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total_shifts: usize,
    pub total_hours: f64,
    pub average_hours: f64,
    /// Sorted by technician name, ignoring case.
    pub shifts_per_technician: Vec<TechnicianShifts>,
    /// `None` when there are no shifts.
    pub most_busy_technician: Option<String>,
}

pub fn schedule_stats(schedules: &[Schedule]) -> ScheduleStats {
    let total_hours: f64 = schedules.iter().map(Schedule::worked_hours).sum();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for schedule in schedules {
        *counts
            .entry(schedule.technician_name.as_str())
            .or_default() += 1;
    }
    let mut per_technician: Vec<(&str, usize)> = counts.into_iter().collect();
    per_technician.sort_by(|(a, _), (b, _)| compare_text(a, b));

    let mut most_busy: Option<(&str, usize)> = None;
    for &(name, shifts) in &per_technician {
        if most_busy.map_or(true, |(_, best)| shifts > best) {
            most_busy = Some((name, shifts));
        }
    }

    ScheduleStats {
        total_shifts: schedules.len(),
        total_hours: round_to(total_hours, 1),
        average_hours: round_to(mean(total_hours, schedules.len()), 1),
        most_busy_technician: most_busy.map(|(name, _)| name.to_string()),
        shifts_per_technician: per_technician
            .into_iter()
            .map(|(name, shifts)| TechnicianShifts {
                technician_name: name.to_string(),
                shifts,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::schedule_stats;
    use crate::model::schedule::Schedule;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn shift(name: &str, start: &str, end: &str) -> Schedule {
        Schedule {
            id: Uuid::new_v4(),
            technician_id: Uuid::new_v4(),
            technician_name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            break_start: None,
            break_end: None,
            notes: None,
        }
    }

    #[test]
    fn no_shifts_has_no_busiest_technician() {
        let stats = schedule_stats(&[]);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.average_hours, 0.0);
        assert_eq!(stats.most_busy_technician, None);
    }

    #[test]
    fn hours_are_summed_before_rounding() {
        let schedules = vec![
            shift("Olga", "09:00", "09:20"),
            shift("Olga", "09:00", "09:20"),
            shift("Ivan", "09:00", "17:00"),
        ];
        let stats = schedule_stats(&schedules);
        assert_eq!(stats.total_shifts, 3);
        assert_eq!(stats.total_hours, 8.7);
        assert_eq!(stats.average_hours, 2.9);
        assert_eq!(stats.most_busy_technician.as_deref(), Some("Olga"));
        assert_eq!(stats.shifts_per_technician[0].technician_name, "Ivan");
    }

    #[test]
    fn busiest_tie_goes_to_first_name_alphabetically() {
        let schedules = vec![
            shift("Zoe", "09:00", "18:00"),
            shift("Anna", "09:00", "18:00"),
        ];
        let stats = schedule_stats(&schedules);
        assert_eq!(stats.most_busy_technician.as_deref(), Some("Anna"));
    }

    #[test]
    fn busiest_tie_ignores_letter_case() {
        let schedules = vec![
            shift("Bob", "09:00", "18:00"),
            shift("alice", "09:00", "18:00"),
        ];
        let stats = schedule_stats(&schedules);
        assert_eq!(stats.most_busy_technician.as_deref(), Some("alice"));
        assert_eq!(stats.shifts_per_technician[0].technician_name, "alice");
        assert_eq!(stats.shifts_per_technician[1].technician_name, "Bob");
    }
}
