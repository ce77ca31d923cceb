pub mod auth;

pub use auth::{AuthMiddleware, SESSION_COOKIE};
