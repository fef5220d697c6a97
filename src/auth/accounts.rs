use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentRole {
    Lgu,
    EmergencyResponder,
    Healthcare,
    DisasterManagement,
}

impl DepartmentRole {
    pub fn as_str(self) -> &'static str {
        match self {
            DepartmentRole::Lgu => "lgu",
            DepartmentRole::EmergencyResponder => "emergency_responder",
            DepartmentRole::Healthcare => "healthcare",
            DepartmentRole::DisasterManagement => "disaster_management",
        }
    }
}

impl fmt::Display for DepartmentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepartmentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lgu" => Ok(DepartmentRole::Lgu),
            "emergency_responder" => Ok(DepartmentRole::EmergencyResponder),
            "healthcare" => Ok(DepartmentRole::Healthcare),
            "disaster_management" => Ok(DepartmentRole::DisasterManagement),
            other => Err(format!("unknown department role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentAccountSeed {
    pub email: &'static str,
    pub role: DepartmentRole,
    pub name: &'static str,
    pub department: &'static str,
}

/// The fixed set of department logins. Passwords are not stored here; they
/// are seeded from configuration.
pub const DEPARTMENT_ACCOUNTS: [DepartmentAccountSeed; 4] = [
    DepartmentAccountSeed {
        email: "lgu@bantayalert.ph",
        role: DepartmentRole::Lgu,
        name: "LGU Operations Officer",
        department: "Local Government Unit",
    },
    DepartmentAccountSeed {
        email: "responder@bantayalert.ph",
        role: DepartmentRole::EmergencyResponder,
        name: "Emergency Response Coordinator",
        department: "Emergency Response Team",
    },
    DepartmentAccountSeed {
        email: "healthcare@bantayalert.ph",
        role: DepartmentRole::Healthcare,
        name: "Healthcare Liaison",
        department: "Department of Health",
    },
    DepartmentAccountSeed {
        email: "ndrrmc@bantayalert.ph",
        role: DepartmentRole::DisasterManagement,
        name: "Disaster Risk Reduction Officer",
        department: "NDRRMC",
    },
];

pub fn find_account(email: &str) -> Option<&'static DepartmentAccountSeed> {
    DEPARTMENT_ACCOUNTS
        .iter()
        .find(|account| account.email.eq_ignore_ascii_case(email.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_account_per_role() {
        for role in [
            DepartmentRole::Lgu,
            DepartmentRole::EmergencyResponder,
            DepartmentRole::Healthcare,
            DepartmentRole::DisasterManagement,
        ] {
            assert_eq!(DEPARTMENT_ACCOUNTS.iter().filter(|a| a.role == role).count(), 1);
        }
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let account = find_account("  LGU@BantayAlert.ph ").unwrap();
        assert_eq!(account.role, DepartmentRole::Lgu);
        assert!(find_account("citizen@example.com").is_none());
    }

    #[test]
    fn role_round_trips_through_its_wire_name() {
        for account in DEPARTMENT_ACCOUNTS {
            assert_eq!(account.role.as_str().parse::<DepartmentRole>(), Ok(account.role));
        }
    }
}
