use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Server-side record backing a session cookie
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub account_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Identity of the logged-in account for the current request.
/// Inserted into request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub id: i64,
    pub username: String,
    pub session_id: String,
}
