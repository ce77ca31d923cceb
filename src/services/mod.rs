pub mod accounts;
pub mod drivers;
pub mod export;
pub mod loads;
pub mod sessions;

pub use accounts::AccountService;
pub use drivers::DriverService;
pub use export::ExportService;
pub use loads::LoadService;
pub use sessions::SessionService;

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::{AppError, AppResult};

/// Start a transaction that holds SQLite's write lock from its first
/// statement, so an ownership check and the write that follows never need a
/// lock upgrade. Concurrent writers wait on the busy timeout and then apply
/// in turn.
pub(crate) async fn begin_write(db: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    db.begin_with("BEGIN IMMEDIATE").await
}

/// Reject access to a record owned by another account
pub(crate) fn ensure_owner(kind: &str, record_id: i64, owner_id: i64, caller_id: i64) -> AppResult<()> {
    if owner_id != caller_id {
        log::warn!(
            "Account {} tried to access {} {} owned by account {}",
            caller_id,
            kind,
            record_id,
            owner_id
        );
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::SqlitePool;
    use std::path::PathBuf;
    use uuid::Uuid;

    use super::AccountService;
    use crate::config::MIN_BCRYPT_COST;
    use crate::db::init_db;
    use crate::models::Account;

    pub async fn pool() -> SqlitePool {
        init_db("sqlite::memory:").await.unwrap()
    }

    /// A database file under the temp dir, for tests that need real
    /// concurrent connections. Remove it with [`remove_file_db`].
    pub async fn file_pool() -> (SqlitePool, PathBuf) {
        let path = std::env::temp_dir().join(format!("loadpilot-{}.db", Uuid::new_v4()));
        let pool = init_db(&format!("sqlite://{}?mode=rwc", path.display()))
            .await
            .unwrap();
        (pool, path)
    }

    pub async fn remove_file_db(pool: SqlitePool, path: PathBuf) {
        pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    pub async fn account(db: &SqlitePool, username: &str) -> Account {
        AccountService::register(db, username, "password123", MIN_BCRYPT_COST)
            .await
            .unwrap()
    }
}
