pub mod account;
pub mod driver;
pub mod load;
pub mod session;

pub use account::{Account, LoginForm, RegisterForm};
pub use driver::{Driver, DriverForm, DriverStatus};
pub use load::{
    DashboardQuery, Load, LoadFilter, LoadForm, LoadInput, LoadStatus, LoadSummary,
    LoadWithDriver, StatusFilter, UNASSIGNED,
};
pub use session::{CurrentAccount, Session};

use thiserror::Error;

/// A status string that matches none of the enumerated values
#[derive(Debug, Error)]
#[error("Unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl From<UnknownStatus> for crate::error::AppError {
    fn from(err: UnknownStatus) -> Self {
        crate::error::AppError::Validation(err.to_string())
    }
}
