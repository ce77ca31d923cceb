/// Freight loads, the dashboard filter and the summary counters
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::UnknownStatus;
use crate::error::{AppError, AppResult};

/// Driver column text for loads without a driver
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Delivered")]
    Delivered,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl LoadStatus {
    pub const ALL: [LoadStatus; 4] = [
        Self::Pending,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Pending and in-transit loads count as active work
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::InTransit)
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for LoadStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Load {
    pub id: i64,
    /// Human-readable reference such as `LD-4022`
    pub load_ref: String,
    pub pickup: String,
    pub drop: String,
    /// Free text, as typed into the form
    pub date: String,
    pub rate: f64,
    #[sqlx(try_from = "String")]
    pub status: LoadStatus,
    pub driver_id: Option<i64>,
    /// Owning account
    pub account_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A load joined with its assigned driver's name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LoadWithDriver {
    #[sqlx(flatten)]
    pub load: Load,
    pub driver_name: Option<String>,
}

impl LoadWithDriver {
    pub fn driver_label(&self) -> &str {
        self.driver_name.as_deref().unwrap_or(UNASSIGNED)
    }
}

/// Raw add/edit load form. Everything arrives as text and is checked by
/// [`LoadForm::into_input`].
#[derive(Debug, Deserialize, Validate)]
pub struct LoadForm {
    #[validate(length(min = 1, max = 100, message = "Pickup must be 1 to 100 characters"))]
    pub pickup: String,
    #[validate(length(min = 1, max = 100, message = "Drop must be 1 to 100 characters"))]
    pub drop: String,
    #[serde(default)]
    #[validate(length(max = 20, message = "Date must be at most 20 characters"))]
    pub date: String,
    pub rate: Option<String>,
    pub status: Option<String>,
    pub driver_id: Option<String>,
}

/// Checked load fields, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct LoadInput {
    pub pickup: String,
    pub drop: String,
    pub date: String,
    pub rate: f64,
    pub status: LoadStatus,
    pub driver_id: Option<i64>,
}

impl LoadForm {
    pub fn into_input(self) -> AppResult<LoadInput> {
        let form = LoadForm {
            pickup: self.pickup.trim().to_string(),
            drop: self.drop.trim().to_string(),
            date: self.date.trim().to_string(),
            ..self
        };
        form.validate()?;

        let rate = parse_rate(form.rate.as_deref())?;
        let status = match form.status.as_deref().map(str::trim) {
            None | Some("") => LoadStatus::default(),
            Some(s) => s.parse()?,
        };
        let driver_id = match form.driver_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(
                s.parse::<i64>()
                    .map_err(|_| AppError::Validation(format!("Invalid driver id: {}", s)))?,
            ),
        };

        Ok(LoadInput {
            pickup: form.pickup,
            drop: form.drop,
            date: form.date,
            rate,
            status,
            driver_id,
        })
    }
}

/// Absent or blank rates become zero; anything else must be a finite,
/// non-negative number.
pub fn parse_rate(raw: Option<&str>) -> AppResult<f64> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(0.0),
        Some(s) => s,
    };
    let rate = raw
        .parse::<f64>()
        .map_err(|_| AppError::Validation(format!("Rate must be a number, got '{}'", raw)))?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(AppError::Validation(
            "Rate must be a non-negative amount".to_string(),
        ));
    }
    Ok(rate)
}

/// Dashboard query string
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Status narrowing for the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LoadStatus),
    /// A value no load can carry; narrows the list to nothing
    Unknown(String),
}

impl StatusFilter {
    /// Value compared against `loads.status`, `None` for no narrowing
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status.as_str()),
            Self::Unknown(raw) => Some(raw),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadFilter {
    pub status: StatusFilter,
    /// Case-insensitive substring over pickup, drop and reference
    pub search: Option<String>,
}

impl LoadFilter {
    pub fn from_query(query: &DashboardQuery) -> Self {
        let status = match query.status.as_deref() {
            None | Some("") | Some("All") => StatusFilter::All,
            Some(raw) => match raw.parse::<LoadStatus>() {
                Ok(status) => StatusFilter::Only(status),
                Err(e) => {
                    log::debug!("Dashboard filter: {}", e);
                    StatusFilter::Unknown(raw.to_string())
                }
            },
        };
        // The text is matched as typed; only an all-blank search is dropped
        let search = query
            .search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);
        Self { status, search }
    }

    /// Value for the status `<select>`
    pub fn status_label(&self) -> &str {
        match &self.status {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.as_str(),
            StatusFilter::Unknown(raw) => raw,
        }
    }
}

/// Aggregates over every load an account owns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    pub pending: i64,
    pub in_transit: i64,
    pub delivered: i64,
    pub cancelled: i64,
    pub total_revenue: f64,
}

impl LoadSummary {
    /// Build from `(status, count, rate sum)` groups
    pub fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (LoadStatus, i64, f64)>,
    {
        let mut summary = Self::default();
        for (status, count, revenue) in groups {
            *summary.count_mut(status) += count;
            summary.total_revenue += revenue;
        }
        summary
    }

    fn count_mut(&mut self, status: LoadStatus) -> &mut i64 {
        match status {
            LoadStatus::Pending => &mut self.pending,
            LoadStatus::InTransit => &mut self.in_transit,
            LoadStatus::Delivered => &mut self.delivered,
            LoadStatus::Cancelled => &mut self.cancelled,
        }
    }

    pub fn count(&self, status: LoadStatus) -> i64 {
        match status {
            LoadStatus::Pending => self.pending,
            LoadStatus::InTransit => self.in_transit,
            LoadStatus::Delivered => self.delivered,
            LoadStatus::Cancelled => self.cancelled,
        }
    }

    pub fn status_counts(&self) -> [(LoadStatus, i64); 4] {
        LoadStatus::ALL.map(|status| (status, self.count(status)))
    }

    pub fn active(&self) -> i64 {
        self.pending + self.in_transit
    }

    pub fn total(&self) -> i64 {
        self.pending + self.in_transit + self.delivered + self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(rate: Option<&str>, status: Option<&str>, driver_id: Option<&str>) -> LoadForm {
        LoadForm {
            pickup: " Dallas, TX ".to_string(),
            drop: "Tulsa, OK".to_string(),
            date: "2024-03-01".to_string(),
            rate: rate.map(str::to_string),
            status: status.map(str::to_string),
            driver_id: driver_id.map(str::to_string),
        }
    }

    #[test]
    fn test_rate_defaults_to_zero() {
        assert_eq!(parse_rate(None).unwrap(), 0.0);
        assert_eq!(parse_rate(Some("  ")).unwrap(), 0.0);
        assert_eq!(parse_rate(Some("1250.50")).unwrap(), 1250.5);
    }

    #[test]
    fn test_rate_rejects_garbage() {
        assert!(matches!(parse_rate(Some("-5")), Err(AppError::Validation(_))));
        assert!(matches!(parse_rate(Some("abc")), Err(AppError::Validation(_))));
        assert!(matches!(parse_rate(Some("NaN")), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_form_into_input() {
        let input = form(Some("900"), Some("In Transit"), Some("7")).into_input().unwrap();
        assert_eq!(input.pickup, "Dallas, TX");
        assert_eq!(input.rate, 900.0);
        assert_eq!(input.status, LoadStatus::InTransit);
        assert_eq!(input.driver_id, Some(7));

        let input = form(None, None, Some("")).into_input().unwrap();
        assert_eq!(input.rate, 0.0);
        assert_eq!(input.status, LoadStatus::Pending);
        assert_eq!(input.driver_id, None);
    }

    #[test]
    fn test_form_rejects_unknown_status() {
        assert!(matches!(
            form(None, Some("Lost"), None).into_input(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_filter_from_query() {
        let all = LoadFilter::from_query(&DashboardQuery {
            status: Some("All".to_string()),
            search: Some("   ".to_string()),
        });
        assert_eq!(all, LoadFilter::default());
        assert_eq!(all.status_label(), "All");
        assert_eq!(all.status.value(), None);

        let delivered = LoadFilter::from_query(&DashboardQuery {
            status: Some("Delivered".to_string()),
            search: Some(" TX".to_string()),
        });
        assert_eq!(delivered.status, StatusFilter::Only(LoadStatus::Delivered));
        assert_eq!(delivered.search.as_deref(), Some(" TX"));
    }

    #[test]
    fn test_unknown_status_narrows_to_nothing() {
        let filter = LoadFilter::from_query(&DashboardQuery {
            status: Some("Bogus".to_string()),
            search: None,
        });
        assert_eq!(filter.status, StatusFilter::Unknown("Bogus".to_string()));
        assert_eq!(filter.status.value(), Some("Bogus"));
        assert_eq!(filter.status_label(), "Bogus");
    }

    #[test]
    fn test_summary_active_counts() {
        let summary = LoadSummary::from_groups(vec![
            (LoadStatus::Pending, 2, 2000.0),
            (LoadStatus::InTransit, 1, 750.0),
            (LoadStatus::Delivered, 1, 500.0),
        ]);
        assert_eq!(summary.active(), 3);
        assert_eq!(summary.count(LoadStatus::Pending), 2);
        assert_eq!(summary.count(LoadStatus::InTransit), 1);
        assert_eq!(summary.count(LoadStatus::Delivered), 1);
        assert_eq!(summary.count(LoadStatus::Cancelled), 0);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.total_revenue, 3250.0);
    }
}
