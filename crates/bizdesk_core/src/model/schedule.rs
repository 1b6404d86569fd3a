//! Technician shift record and worked-time derivation.
//!
//! # Invariants
//! - `end_time` is after `start_time`; shifts never cross midnight.
//! - A break is either fully set or fully absent, and lies inside the shift.
//! - Worked time = shift span − break span.

use crate::model::entity::{require_text, Entity, EntityId, EntityKind, ValidationError};
use crate::model::shift_time::ShiftTime;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    pub technician_id: EntityId,
    #[serde(default)]
    pub technician_name: String,
    pub date: NaiveDate,
    pub start_time: ShiftTime,
    pub end_time: ShiftTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start: Option<ShiftTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<ShiftTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Schedule {
    /// Break span in minutes; zero when no break is set.
    pub fn break_minutes(&self) -> i32 {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => start.minutes_until(end),
            _ => 0,
        }
    }

    /// Shift span minus break span, in minutes.
    pub fn worked_minutes(&self) -> i32 {
        self.start_time.minutes_until(self.end_time) - self.break_minutes()
    }

    /// Worked time in decimal hours (unrounded).
    pub fn worked_hours(&self) -> f64 {
        f64::from(self.worked_minutes()) / 60.0
    }
}

impl Entity for Schedule {
    const KIND: EntityKind = EntityKind::Schedule;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "technicianName", &self.technician_name)?;
        if self.end_time <= self.start_time {
            return Err(ValidationError::InvalidTimeRange {
                field: "shift",
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }

        match (self.break_start, self.break_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(ValidationError::InvalidTimeRange {
                        field: "break",
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                }
                if start < self.start_time || end > self.end_time {
                    return Err(ValidationError::BreakOutsideShift);
                }
                Ok(())
            }
            _ => Err(ValidationError::IncompleteBreak),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Schedule;
    use crate::model::entity::{Entity, ValidationError};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn shift(start: &str, end: &str, brk: Option<(&str, &str)>) -> Schedule {
        Schedule {
            id: Uuid::new_v4(),
            technician_id: Uuid::new_v4(),
            technician_name: "Ivan".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            break_start: brk.map(|(value, _)| value.parse().unwrap()),
            break_end: brk.map(|(_, value)| value.parse().unwrap()),
            notes: None,
        }
    }

    #[test]
    fn nine_to_six_with_lunch_is_eight_hours() {
        let schedule = shift("09:00", "18:00", Some(("13:00", "14:00")));
        assert_eq!(schedule.worked_minutes(), 480);
        assert_eq!(schedule.worked_hours(), 8.0);
    }

    #[test]
    fn shift_without_break_counts_full_span() {
        let schedule = shift("10:00", "14:30", None);
        assert_eq!(schedule.worked_hours(), 4.5);
    }

    #[test]
    fn validate_rejects_inverted_and_partial_spans() {
        let inverted = shift("18:00", "09:00", None);
        assert!(matches!(
            inverted.validate(),
            Err(ValidationError::InvalidTimeRange { field: "shift", .. })
        ));

        let mut partial = shift("09:00", "18:00", None);
        partial.break_start = Some("13:00".parse().unwrap());
        assert_eq!(partial.validate(), Err(ValidationError::IncompleteBreak));

        let outside = shift("09:00", "12:00", Some(("13:00", "14:00")));
        assert_eq!(outside.validate(), Err(ValidationError::BreakOutsideShift));
    }
}
