/// Account registration and credential checks
use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::Account;

pub struct AccountService;

impl AccountService {
    /// Create an account with a bcrypt-hashed password
    pub async fn register(
        db: &SqlitePool,
        username: &str,
        password: &str,
        bcrypt_cost: u32,
    ) -> AppResult<Account> {
        if Self::find_by_username(db, username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let password_hash = bcrypt::hash(password, bcrypt_cost)?;

        let account = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (username, password_hash, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(username)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(db)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent registration
            if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
                AppError::DuplicateUsername
            } else {
                AppError::Database(e)
            }
        })?;

        log::info!("Registered account {} ({})", account.username, account.id);

        Ok(account)
    }

    /// Unknown usernames and wrong passwords are indistinguishable to the caller
    pub async fn authenticate(db: &SqlitePool, username: &str, password: &str) -> AppResult<Account> {
        let account = match Self::find_by_username(db, username).await? {
            Some(account) => account,
            None => {
                log::warn!("Login attempt for unknown username {}", username);
                return Err(AppError::InvalidCredentials);
            }
        };

        if !bcrypt::verify(password, &account.password_hash)? {
            log::warn!("Wrong password for {}", username);
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }

    pub async fn find_by_username(db: &SqlitePool, username: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = ?")
            .bind(username)
            .fetch_optional(db)
            .await?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_BCRYPT_COST;
    use crate::services::testing;

    #[actix_web::test]
    async fn test_register_then_authenticate() {
        let db = testing::pool().await;
        let account = AccountService::register(&db, "dispatch", "hunter22", MIN_BCRYPT_COST)
            .await
            .unwrap();
        assert_ne!(account.password_hash, "hunter22");

        let found = AccountService::authenticate(&db, "dispatch", "hunter22").await.unwrap();
        assert_eq!(found.id, account.id);
    }

    #[actix_web::test]
    async fn test_duplicate_username_keeps_original_credential() {
        let db = testing::pool().await;
        AccountService::register(&db, "dispatch", "original-pw", MIN_BCRYPT_COST)
            .await
            .unwrap();

        let second = AccountService::register(&db, "dispatch", "replacement", MIN_BCRYPT_COST).await;
        assert!(matches!(second, Err(AppError::DuplicateUsername)));

        assert!(AccountService::authenticate(&db, "dispatch", "original-pw").await.is_ok());
        assert!(matches!(
            AccountService::authenticate(&db, "dispatch", "replacement").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[actix_web::test]
    async fn test_unknown_user_is_invalid_credentials() {
        let db = testing::pool().await;
        assert!(matches!(
            AccountService::authenticate(&db, "ghost", "whatever").await,
            Err(AppError::InvalidCredentials)
        ));
    }
}
