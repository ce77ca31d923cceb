/// Server-side session rows behind the session cookie
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Session;

pub struct SessionService;

impl SessionService {
    pub async fn create(db: &SqlitePool, account_id: i64) -> AppResult<Session> {
        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, account_id, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(account_id)
        .bind(Utc::now())
        .fetch_one(db)
        .await?;
        Ok(session)
    }

    /// The session only counts if it still exists for the same account
    pub async fn find(db: &SqlitePool, session_id: &str, account_id: i64) -> AppResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE id = ? AND account_id = ?",
        )
        .bind(session_id)
        .bind(account_id)
        .fetch_optional(db)
        .await?;
        Ok(session)
    }

    pub async fn delete(db: &SqlitePool, session_id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Drop the account's sessions older than `max_age_secs`; their tokens
    /// have expired, so the rows can never authenticate again.
    pub async fn prune_expired(db: &SqlitePool, account_id: i64, max_age_secs: i64) -> AppResult<u64> {
        let cutoff = Utc::now() - Duration::seconds(max_age_secs);
        let result = sqlx::query(
            "DELETE FROM sessions WHERE account_id = ? AND julianday(created_at) < julianday(?)",
        )
        .bind(account_id)
        .bind(cutoff)
        .execute(db)
        .await?;

        let pruned = result.rows_affected();
        if pruned > 0 {
            log::debug!("Pruned {} expired sessions for account {}", pruned, account_id);
        }
        Ok(pruned)
    }

    pub async fn count_for_account(db: &SqlitePool, account_id: i64) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE account_id = ?")
            .bind(account_id)
            .fetch_one(db)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;

    #[actix_web::test]
    async fn test_session_lifecycle() {
        let db = testing::pool().await;
        let account = testing::account(&db, "dispatch").await;

        let session = SessionService::create(&db, account.id).await.unwrap();
        assert!(SessionService::find(&db, &session.id, account.id).await.unwrap().is_some());
        assert!(SessionService::find(&db, &session.id, account.id + 1).await.unwrap().is_none());

        SessionService::delete(&db, &session.id).await.unwrap();
        assert!(SessionService::find(&db, &session.id, account.id).await.unwrap().is_none());
        assert_eq!(SessionService::count_for_account(&db, account.id).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_prune_expired_keeps_live_sessions() {
        let db = testing::pool().await;
        let alice = testing::account(&db, "alice").await;
        let bob = testing::account(&db, "bob").await;

        let stale = SessionService::create(&db, alice.id).await.unwrap();
        let live = SessionService::create(&db, alice.id).await.unwrap();
        let bobs = SessionService::create(&db, bob.id).await.unwrap();
        for id in [&stale.id, &bobs.id] {
            sqlx::query("UPDATE sessions SET created_at = ? WHERE id = ?")
                .bind(Utc::now() - Duration::hours(2))
                .bind(id)
                .execute(&db)
                .await
                .unwrap();
        }

        let pruned = SessionService::prune_expired(&db, alice.id, 3600).await.unwrap();
        assert_eq!(pruned, 1);
        assert!(SessionService::find(&db, &stale.id, alice.id).await.unwrap().is_none());
        assert!(SessionService::find(&db, &live.id, alice.id).await.unwrap().is_some());
        // Other accounts are pruned on their own login
        assert!(SessionService::find(&db, &bobs.id, bob.id).await.unwrap().is_some());
    }
}
