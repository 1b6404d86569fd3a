//! Technician record and workload capacity.

use crate::model::entity::{require_text, Entity, EntityId, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Capacity assumed when a technician declares none.
pub const DEFAULT_MAX_WORKLOAD: u32 = 5;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicianStatus {
    Available,
    Busy,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialization: Vec<String>,
    pub status: TechnicianStatus,
    #[serde(default)]
    pub completed_repairs: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub current_workload: u32,
    #[serde(default = "default_max_workload")]
    pub max_workload: u32,
}

fn default_max_workload() -> u32 {
    DEFAULT_MAX_WORKLOAD
}

impl Technician {
    pub fn new(name: impl Into<String>, status: TechnicianStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: String::new(),
            specialization: Vec::new(),
            status,
            completed_repairs: 0,
            rating: 0.0,
            current_workload: 0,
            max_workload: DEFAULT_MAX_WORKLOAD,
        }
    }

    /// Declared capacity, with `0` treated as "not declared".
    pub fn capacity(&self) -> u32 {
        if self.max_workload == 0 {
            DEFAULT_MAX_WORKLOAD
        } else {
            self.max_workload
        }
    }

    /// Assigned repairs relative to capacity, in percent. May exceed 100.
    pub fn workload_percent(&self) -> f64 {
        f64::from(self.current_workload) / f64::from(self.capacity()) * 100.0
    }
}

impl Entity for Technician {
    const KIND: EntityKind = EntityKind::Technician;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "name", &self.name)?;
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::OutOfRange {
                kind: Self::KIND,
                field: "rating",
                value: self.rating,
                min: 0.0,
                max: MAX_RATING,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Technician, TechnicianStatus};

    #[test]
    fn workload_percent_uses_default_capacity_for_zero() {
        let mut technician = Technician::new("Oleg", TechnicianStatus::Busy);
        technician.current_workload = 2;
        technician.max_workload = 0;
        assert_eq!(technician.workload_percent(), 40.0);

        technician.max_workload = 4;
        assert_eq!(technician.workload_percent(), 50.0);
    }
}
