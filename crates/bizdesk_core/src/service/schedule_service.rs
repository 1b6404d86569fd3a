//! Shift planning use-cases: technician resolution, recurrence, duplication.
//!
//! # Invariants
//! - A shift is only written when its technician exists in the given snapshot.
//! - `technician_name` is always copied from the technician record.
//! - Recurrence covers the start date through one calendar month later, inclusive.

use crate::model::entity::EntityId;
use crate::model::schedule::Schedule;
use crate::model::shift_time::ShiftTime;
use crate::model::technician::Technician;
use crate::repo::record_repo::{RecordRepository, RepoError};
use crate::service::entity_service::EntityService;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for shift planning.
#[derive(Debug)]
pub enum ScheduleServiceError {
    /// No technician was chosen.
    TechnicianNotSelected,
    /// Chosen technician is not in the snapshot.
    TechnicianNotFound(EntityId),
    /// Shifting a date left the supported calendar range.
    DateOutOfRange(NaiveDate),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ScheduleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TechnicianNotSelected => write!(f, "technician must be selected"),
            Self::TechnicianNotFound(id) => write!(f, "technician not found: {id}"),
            Self::DateOutOfRange(date) => write!(f, "no calendar day after {date}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ScheduleServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Input for creating or editing a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRequest {
    pub technician_id: Option<EntityId>,
    pub date: NaiveDate,
    pub start_time: ShiftTime,
    pub end_time: ShiftTime,
    pub break_start: Option<ShiftTime>,
    pub break_end: Option<ShiftTime>,
    pub notes: Option<String>,
    /// Weekdays to repeat on. Empty means a single shift on `date`.
    pub recurring_days: Vec<Weekday>,
}

impl ShiftRequest {
    /// Standard 09:00-18:00 shift with a 13:00-14:00 break.
    pub fn standard(technician_id: EntityId, date: NaiveDate) -> Self {
        Self {
            technician_id: Some(technician_id),
            date,
            start_time: ShiftTime::hm(9, 0),
            end_time: ShiftTime::hm(18, 0),
            break_start: Some(ShiftTime::hm(13, 0)),
            break_end: Some(ShiftTime::hm(14, 0)),
            notes: None,
            recurring_days: Vec::new(),
        }
    }

    fn to_schedule(&self, technician: &Technician, date: NaiveDate) -> Schedule {
        Schedule {
            id: Uuid::new_v4(),
            technician_id: technician.id,
            technician_name: technician.name.clone(),
            date,
            start_time: self.start_time,
            end_time: self.end_time,
            break_start: self.break_start,
            break_end: self.break_end,
            notes: self.notes.clone(),
        }
    }
}

impl<R: RecordRepository<Schedule>> EntityService<Schedule, R> {
    /// Creates one shift, or one per matching day when recurrence is set.
    ///
    /// Returns every created shift in date order.
    pub fn create_shift(
        &self,
        request: &ShiftRequest,
        technicians: &[Technician],
    ) -> Result<Vec<Schedule>, ScheduleServiceError> {
        let technician = resolve_technician(request.technician_id, technicians)?;

        let dates = if request.recurring_days.is_empty() {
            vec![request.date]
        } else {
            recurring_dates(request.date, &request.recurring_days)
        };

        let mut created = Vec::with_capacity(dates.len());
        for date in dates {
            created.push(self.create(request.to_schedule(technician, date))?);
        }

        info!(
            "event=shift_create module=service status=ok technician_id={} count={}",
            technician.id,
            created.len()
        );
        Ok(created)
    }

    /// Rewrites an existing shift from `request`; recurrence is ignored.
    pub fn update_shift(
        &self,
        id: EntityId,
        request: &ShiftRequest,
        technicians: &[Technician],
    ) -> Result<Schedule, ScheduleServiceError> {
        let technician = resolve_technician(request.technician_id, technicians)?;
        self.require(id)?;

        let mut schedule = request.to_schedule(technician, request.date);
        schedule.id = id;
        Ok(self.replace(schedule)?)
    }

    /// Copies a shift to the following day.
    pub fn duplicate_to_next_day(&self, id: EntityId) -> Result<Schedule, ScheduleServiceError> {
        let mut copy = self.require(id)?;
        copy.date = copy
            .date
            .checked_add_days(Days::new(1))
            .ok_or(ScheduleServiceError::DateOutOfRange(copy.date))?;
        Ok(self.create(copy)?)
    }
}

fn resolve_technician(
    technician_id: Option<EntityId>,
    technicians: &[Technician],
) -> Result<&Technician, ScheduleServiceError> {
    let id = technician_id.ok_or(ScheduleServiceError::TechnicianNotSelected)?;
    technicians
        .iter()
        .find(|technician| technician.id == id)
        .ok_or(ScheduleServiceError::TechnicianNotFound(id))
}

/// Expands a weekday selection into concrete dates.
///
/// Walks every day from `start` through `start + 1 month` inclusive and keeps
/// the days whose weekday is selected. Month-end starts clamp to the last day
/// of the following month.
pub fn recurring_dates(start: NaiveDate, weekdays: &[Weekday]) -> Vec<NaiveDate> {
    let Some(end) = start.checked_add_months(Months::new(1)) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| weekdays.contains(&day.weekday()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::recurring_dates;
    use chrono::{Datelike, NaiveDate, Weekday};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn weekly_selection_covers_one_month_inclusive() {
        // 2024-03-04 is a Monday; 2024-04-04 is the inclusive end.
        let dates = recurring_dates(date(2024, 3, 4), &[Weekday::Mon]);
        assert_eq!(
            dates,
            vec![
                date(2024, 3, 4),
                date(2024, 3, 11),
                date(2024, 3, 18),
                date(2024, 3, 25),
                date(2024, 4, 1),
            ]
        );
    }

    #[test]
    fn end_day_is_included_when_it_matches() {
        let dates = recurring_dates(date(2024, 3, 4), &[Weekday::Thu]);
        assert_eq!(dates.last(), Some(&date(2024, 4, 4)));
        assert_eq!(dates.first(), Some(&date(2024, 3, 7)));
    }

    #[test]
    fn multiple_weekdays_stay_in_date_order() {
        let dates = recurring_dates(date(2024, 3, 4), &[Weekday::Sat, Weekday::Sun]);
        assert_eq!(dates.len(), 8);
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(dates
            .iter()
            .all(|day| matches!(day.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn empty_selection_yields_no_dates() {
        assert!(recurring_dates(date(2024, 3, 4), &[]).is_empty());
    }
}
