/// Driver roster entries
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::UnknownStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    #[default]
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "On Load")]
    OnLoad,
    #[serde(rename = "Off Duty")]
    OffDuty,
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 3] = [Self::Available, Self::OnLoad, Self::OffDuty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OnLoad => "On Load",
            Self::OffDuty => "Off Duty",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for DriverStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub truck_number: String,
    pub phone: String,
    #[sqlx(try_from = "String")]
    pub status: DriverStatus,
    /// Owning account
    pub account_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Submitted by both the add and edit driver forms
#[derive(Debug, Deserialize, Validate)]
pub struct DriverForm {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Truck number must be 1 to 50 characters"))]
    pub truck_number: String,
    #[serde(default)]
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: String,
}

impl DriverForm {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            truck_number: self.truck_number.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_display_names() {
        assert_eq!("On Load".parse::<DriverStatus>().unwrap(), DriverStatus::OnLoad);
        assert_eq!("Off Duty".parse::<DriverStatus>().unwrap(), DriverStatus::OffDuty);
        assert!("on load".parse::<DriverStatus>().is_err());
    }

    #[test]
    fn test_form_validation() {
        let form = DriverForm {
            name: "  ".to_string(),
            truck_number: "TR-1".to_string(),
            phone: String::new(),
        }
        .trimmed();
        assert!(form.validate().is_err());

        let form = DriverForm {
            name: "Jane Roe".to_string(),
            truck_number: "TR-1".to_string(),
            phone: "555-0100".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
