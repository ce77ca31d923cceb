use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// How long a writer waits for another connection's write lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT    NOT NULL UNIQUE,
    password_hash TEXT    NOT NULL,
    created_at    TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    id         TEXT    PRIMARY KEY,
    account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    created_at TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS drivers (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT    NOT NULL,
    truck_number TEXT    NOT NULL,
    phone        TEXT    NOT NULL DEFAULT '',
    status       TEXT    NOT NULL DEFAULT 'Available',
    account_id   INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    created_at   TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS loads (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    load_ref   TEXT    NOT NULL,
    pickup     TEXT    NOT NULL,
    "drop"     TEXT    NOT NULL,
    date       TEXT    NOT NULL DEFAULT '',
    rate       REAL    NOT NULL DEFAULT 0,
    status     TEXT    NOT NULL DEFAULT 'Pending',
    driver_id  INTEGER REFERENCES drivers(id) ON DELETE SET NULL,
    account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    created_at TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_drivers_account ON drivers(account_id);
CREATE INDEX IF NOT EXISTS idx_loads_account ON loads(account_id);
CREATE INDEX IF NOT EXISTS idx_loads_driver ON loads(driver_id);
"#;

/// Open the pool and make sure the schema exists
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);
    // WAL lets readers run alongside the single writer
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    // Every connection to `sqlite::memory:` gets its own database, so an
    // in-memory pool must stay pinned to a single connection.
    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?
    };

    sqlx::raw_sql(SCHEMA).execute(&pool).await?;

    log::info!("Database ready at {}", database_url);

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_init_creates_tables() {
        let pool = init_db("sqlite::memory:").await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["accounts", "drivers", "loads", "sessions"]);
    }

    #[actix_web::test]
    async fn test_init_is_idempotent() {
        let pool = init_db("sqlite::memory:").await.unwrap();
        sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
    }
}
