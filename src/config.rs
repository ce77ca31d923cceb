/// Runtime configuration, read once from the environment at startup
use std::env;

/// Lowest work factor bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub jwt_expiration: i64,
    pub bcrypt_cost: u32,
    /// Mark the session cookie `Secure` (HTTPS deployments)
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .unwrap_or(8080);
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://loadpilot.db?mode=rwc".to_string());
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, falling back to an insecure development secret");
            "loadpilot-dev-secret".to_string()
        });
        let jwt_expiration = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<i64>()
            .unwrap_or(86400);
        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(bcrypt::DEFAULT_COST)
            .clamp(MIN_BCRYPT_COST, 31);
        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            database_url,
            jwt_secret,
            jwt_expiration,
            bcrypt_cost,
            cookie_secure,
        }
    }

    /// Configuration for tests: in-memory database and the cheapest bcrypt cost
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            bcrypt_cost: MIN_BCRYPT_COST,
            cookie_secure: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_cost_is_accepted_by_bcrypt() {
        let config = AppConfig::for_tests();
        let hash = bcrypt::hash("abc", config.bcrypt_cost).unwrap();
        assert!(bcrypt::verify("abc", &hash).unwrap());
        assert!(bcrypt::hash("abc", MIN_BCRYPT_COST - 1).is_err());
    }
}
