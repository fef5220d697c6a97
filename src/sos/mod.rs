//! SOS alert domain: priorities, the status lifecycle and dashboard ordering.
//!
//! Lifecycle:
//!
//! ```text
//! active --dispatch--> responding --resolve--> resolved
//!    \
//!     --cancel--> cancelled
//! ```

pub mod store;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::entities::sos_alert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Critical, Priority::High, Priority::Medium];

    /// Lower ranks sort first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SosStatus {
    Active,
    Responding,
    Resolved,
    Cancelled,
}

impl SosStatus {
    pub const ALL: [SosStatus; 4] = [
        SosStatus::Active,
        SosStatus::Responding,
        SosStatus::Resolved,
        SosStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SosStatus::Active => "active",
            SosStatus::Responding => "responding",
            SosStatus::Resolved => "resolved",
            SosStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SosStatus::Resolved | SosStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: SosStatus) -> bool {
        matches!(
            (self, next),
            (SosStatus::Active, SosStatus::Responding)
                | (SosStatus::Active, SosStatus::Cancelled)
                | (SosStatus::Responding, SosStatus::Resolved)
        )
    }
}

impl fmt::Display for SosStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SosStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SosStatus::Active),
            "responding" => Ok(SosStatus::Responding),
            "resolved" => Ok(SosStatus::Resolved),
            "cancelled" => Ok(SosStatus::Cancelled),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// A department action against an alert.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Dispatch { responded_by: String },
    Resolve { resolution: String },
    Cancel { reason: Option<String> },
}

impl Transition {
    pub fn target(&self) -> SosStatus {
        match self {
            Transition::Dispatch { .. } => SosStatus::Responding,
            Transition::Resolve { .. } => SosStatus::Resolved,
            Transition::Cancel { .. } => SosStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SosAlert {
    pub id: Uuid,
    pub user_id: Option<i32>,
    pub user_name: String,
    pub user_email: Option<String>,
    pub contact_number: String,
    pub location: Location,
    pub details: String,
    pub priority: Priority,
    pub status: SosStatus,
    pub version: i32,
    pub responded_by: Option<String>,
    pub resolution: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<sos_alert::Model> for SosAlert {
    type Error = String;

    fn try_from(model: sos_alert::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            priority: model.priority.parse()?,
            status: model.status.parse()?,
            id: model.id,
            user_id: model.user_id,
            user_name: model.user_name,
            user_email: model.user_email,
            contact_number: model.contact_number,
            location: Location {
                lat: model.latitude,
                lng: model.longitude,
                address: model.address,
            },
            details: model.details,
            version: model.version,
            responded_by: model.responded_by,
            resolution: model.resolution,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Orders alerts for the dashboards: priority rank first, newest first within
/// a rank. Stable, so equal keys keep their fetch order.
pub fn sort_alerts(alerts: &mut [SosAlert]) {
    alerts.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertCounts {
    pub total: usize,
    pub active: usize,
    pub responding: usize,
    pub resolved: usize,
    pub cancelled: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

impl AlertCounts {
    pub fn tally<'a>(alerts: impl IntoIterator<Item = &'a SosAlert>) -> Self {
        let mut counts = Self::default();
        for alert in alerts {
            counts.total += 1;
            match alert.status {
                SosStatus::Active => counts.active += 1,
                SosStatus::Responding => counts.responding += 1,
                SosStatus::Resolved => counts.resolved += 1,
                SosStatus::Cancelled => counts.cancelled += 1,
            }
            match alert.priority {
                Priority::Critical => counts.critical += 1,
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
            }
        }
        counts
    }

    /// Alerts still waiting on or receiving a response.
    pub fn open(&self) -> usize {
        self.active + self.responding
    }
}
