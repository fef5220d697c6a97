use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HospitalStatus {
    Operational,
    Overwhelmed,
    Offline,
}

impl HospitalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HospitalStatus::Operational => "operational",
            HospitalStatus::Overwhelmed => "overwhelmed",
            HospitalStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for HospitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HospitalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operational" => Ok(HospitalStatus::Operational),
            "overwhelmed" => Ok(HospitalStatus::Overwhelmed),
            "offline" => Ok(HospitalStatus::Offline),
            other => Err(format!("unknown hospital status '{other}'")),
        }
    }
}

/// Bed and capacity figures as submitted by the "Update Capacity" form.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Capacity {
    pub total_beds: i32,
    pub available_beds: i32,
    pub emergency_capacity: i32,
    pub icu_capacity: i32,
}

impl Capacity {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("total_beds", self.total_beds),
            ("available_beds", self.available_beds),
            ("emergency_capacity", self.emergency_capacity),
            ("icu_capacity", self.icu_capacity),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| *value < 0) {
            return Err(AppError::Validation(format!("{name} cannot be negative (got {value})")));
        }
        if self.available_beds > self.total_beds {
            return Err(AppError::Validation(format!(
                "available_beds ({}) exceeds total_beds ({})",
                self.available_beds, self.total_beds
            )));
        }
        Ok(())
    }

    pub fn occupancy_percent(&self) -> f64 {
        if self.total_beds == 0 {
            return 0.0;
        }
        f64::from(self.total_beds - self.available_beds) * 100.0 / f64::from(self.total_beds)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HospitalSummary {
    pub hospitals: usize,
    pub operational: usize,
    pub overwhelmed: usize,
    pub offline: usize,
    pub total_beds: i64,
    pub available_beds: i64,
    pub icu_capacity: i64,
}

impl HospitalSummary {
    pub fn add(&mut self, status: HospitalStatus, capacity: &Capacity) {
        self.hospitals += 1;
        match status {
            HospitalStatus::Operational => self.operational += 1,
            HospitalStatus::Overwhelmed => self.overwhelmed += 1,
            HospitalStatus::Offline => self.offline += 1,
        }
        self.total_beds += i64::from(capacity.total_beds);
        self.available_beds += i64::from(capacity.available_beds);
        self.icu_capacity += i64::from(capacity.icu_capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(total: i32, available: i32) -> Capacity {
        Capacity {
            total_beds: total,
            available_beds: available,
            emergency_capacity: 20,
            icu_capacity: 10,
        }
    }

    #[test]
    fn accepts_consistent_capacity() {
        assert!(capacity(200, 35).validate().is_ok());
        assert!(capacity(0, 0).validate().is_ok());
    }

    #[test]
    fn rejects_more_available_than_total() {
        let err = capacity(50, 51).validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn rejects_negative_counts() {
        let mut c = capacity(50, 10);
        c.icu_capacity = -1;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("icu_capacity"));
    }

    #[test]
    fn occupancy_handles_empty_hospital() {
        assert_eq!(capacity(0, 0).occupancy_percent(), 0.0);
        assert_eq!(capacity(200, 50).occupancy_percent(), 75.0);
    }

    #[test]
    fn summary_accumulates() {
        let mut summary = HospitalSummary::default();
        summary.add(HospitalStatus::Operational, &capacity(100, 40));
        summary.add(HospitalStatus::Overwhelmed, &capacity(300, 0));

        assert_eq!(summary.hospitals, 2);
        assert_eq!(summary.overwhelmed, 1);
        assert_eq!(summary.total_beds, 400);
        assert_eq!(summary.available_beds, 40);
    }
}
