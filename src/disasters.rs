use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterStatus {
    Active,
    Monitoring,
    Resolved,
}

impl DisasterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DisasterStatus::Active => "active",
            DisasterStatus::Monitoring => "monitoring",
            DisasterStatus::Resolved => "resolved",
        }
    }

    /// Shown on the "active disasters" board.
    pub fn is_ongoing(self) -> bool {
        !matches!(self, DisasterStatus::Resolved)
    }
}

impl fmt::Display for DisasterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisasterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(DisasterStatus::Active),
            "monitoring" => Ok(DisasterStatus::Monitoring),
            "resolved" => Ok(DisasterStatus::Resolved),
            other => Err(format!("unknown disaster status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Extreme,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Extreme => "extreme",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "moderate" => Ok(Severity::Moderate),
            "high" => Ok(Severity::High),
            "extreme" => Ok(Severity::Extreme),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterType {
    Typhoon,
    Flood,
    Earthquake,
    Fire,
    Landslide,
    StormSurge,
    Other,
}

impl DisasterType {
    pub fn as_str(self) -> &'static str {
        match self {
            DisasterType::Typhoon => "typhoon",
            DisasterType::Flood => "flood",
            DisasterType::Earthquake => "earthquake",
            DisasterType::Fire => "fire",
            DisasterType::Landslide => "landslide",
            DisasterType::StormSurge => "storm_surge",
            DisasterType::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_resolved_events_leave_the_board() {
        assert!(DisasterStatus::Active.is_ongoing());
        assert!(DisasterStatus::Monitoring.is_ongoing());
        assert!(!DisasterStatus::Resolved.is_ongoing());
    }

    #[test]
    fn wire_names_parse_back() {
        for status in [DisasterStatus::Active, DisasterStatus::Monitoring, DisasterStatus::Resolved] {
            assert_eq!(status.as_str().parse::<DisasterStatus>(), Ok(status));
        }
        assert_eq!("extreme".parse::<Severity>(), Ok(Severity::Extreme));
        assert!("apocalyptic".parse::<Severity>().is_err());
    }

    #[test]
    fn disaster_type_serializes_snake_case() {
        let json = serde_json::to_string(&DisasterType::StormSurge).unwrap();
        assert_eq!(json, "\"storm_surge\"");
        assert_eq!(DisasterType::StormSurge.as_str(), "storm_surge");
    }
}
