//! Shift grouping for list and week views.
//!
//! # Invariants
//! - Weeks start on Monday; a Sunday belongs to the week that ends on it.
//! - Shifts inside one day keep snapshot order.

use crate::model::entity::EntityId;
use crate::model::repair::Repair;
use crate::model::schedule::Schedule;
use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

/// Shifts falling on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedules<'a> {
    pub date: NaiveDate,
    pub schedules: Vec<&'a Schedule>,
}

fn for_technician(schedule: &Schedule, technician_id: Option<EntityId>) -> bool {
    technician_id.map_or(true, |id| schedule.technician_id == id)
}

/// Groups shifts by date, newest date first.
pub fn group_by_date(
    schedules: &[Schedule],
    technician_id: Option<EntityId>,
) -> Vec<DaySchedules<'_>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&Schedule>> = BTreeMap::new();
    for schedule in schedules
        .iter()
        .filter(|schedule| for_technician(schedule, technician_id))
    {
        grouped.entry(schedule.date).or_default().push(schedule);
    }

    grouped
        .into_iter()
        .rev()
        .map(|(date, schedules)| DaySchedules { date, schedules })
        .collect()
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Seven consecutive days (Monday..Sunday) around `selected`, each with its shifts.
pub fn week_view(
    schedules: &[Schedule],
    selected: NaiveDate,
    technician_id: Option<EntityId>,
) -> Vec<DaySchedules<'_>> {
    week_start(selected)
        .iter_days()
        .take(7)
        .map(|date| DaySchedules {
            date,
            schedules: schedules
                .iter()
                .filter(|schedule| {
                    schedule.date == date && for_technician(schedule, technician_id)
                })
                .collect(),
        })
        .collect()
}

/// Repairs assigned to a technician and scheduled on `date`.
pub fn technician_repairs_for_date(
    repairs: &[Repair],
    technician_id: EntityId,
    date: NaiveDate,
) -> Vec<&Repair> {
    repairs
        .iter()
        .filter(|repair| {
            repair.technician_id == Some(technician_id) && repair.scheduled_date == Some(date)
        })
        .collect()
}
