/// Load CRUD, the dashboard query and the summary aggregation
use chrono::Utc;
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashSet;

use super::{begin_write, ensure_owner, DriverService};
use crate::error::{AppError, AppResult};
use crate::models::{Load, LoadFilter, LoadInput, LoadStatus, LoadSummary, LoadWithDriver};
use crate::utils::generate_load_ref;

const LOAD_WITH_DRIVER_SELECT: &str = "SELECT l.id, l.load_ref, l.pickup, l.\"drop\", l.date, \
     l.rate, l.status, l.driver_id, l.account_id, l.created_at, d.name AS driver_name \
     FROM loads l \
     LEFT JOIN drivers d ON d.id = l.driver_id AND d.account_id = l.account_id \
     WHERE l.account_id = ";

pub struct LoadService;

impl LoadService {
    pub async fn create(db: &SqlitePool, account_id: i64, input: &LoadInput) -> AppResult<Load> {
        let mut tx = begin_write(db).await?;

        if let Some(driver_id) = input.driver_id {
            DriverService::get_owned(&mut *tx, account_id, driver_id).await?;
        }

        let taken: HashSet<String> =
            sqlx::query_scalar::<_, String>("SELECT load_ref FROM loads WHERE account_id = ?")
                .bind(account_id)
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();
        let load_ref = generate_load_ref(&mut rand::rng(), &taken);

        let load = sqlx::query_as::<_, Load>(
            "INSERT INTO loads (load_ref, pickup, \"drop\", date, rate, status, driver_id, account_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&load_ref)
        .bind(&input.pickup)
        .bind(&input.drop)
        .bind(&input.date)
        .bind(input.rate)
        .bind(input.status.as_str())
        .bind(input.driver_id)
        .bind(account_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        log::info!("Account {} created load {} ({})", account_id, load.id, load.load_ref);

        Ok(load)
    }

    /// `NotFound` when the id is unknown, `Forbidden` when another account owns it
    pub async fn get_owned<'e, E>(executor: E, account_id: i64, load_id: i64) -> AppResult<Load>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let load = sqlx::query_as::<_, Load>("SELECT * FROM loads WHERE id = ?")
            .bind(load_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound)?;

        ensure_owner("load", load.id, load.account_id, account_id)?;
        Ok(load)
    }

    /// Replaces every editable field. The reference code is kept.
    pub async fn update(
        db: &SqlitePool,
        account_id: i64,
        load_id: i64,
        input: &LoadInput,
    ) -> AppResult<Load> {
        let mut tx = begin_write(db).await?;
        Self::get_owned(&mut *tx, account_id, load_id).await?;

        if let Some(driver_id) = input.driver_id {
            DriverService::get_owned(&mut *tx, account_id, driver_id).await?;
        }

        let load = sqlx::query_as::<_, Load>(
            "UPDATE loads SET pickup = ?, \"drop\" = ?, date = ?, rate = ?, status = ?, driver_id = ? \
             WHERE id = ? AND account_id = ? RETURNING *",
        )
        .bind(&input.pickup)
        .bind(&input.drop)
        .bind(&input.date)
        .bind(input.rate)
        .bind(input.status.as_str())
        .bind(input.driver_id)
        .bind(load_id)
        .bind(account_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(load)
    }

    pub async fn delete(db: &SqlitePool, account_id: i64, load_id: i64) -> AppResult<()> {
        let mut tx = begin_write(db).await?;
        Self::get_owned(&mut *tx, account_id, load_id).await?;

        sqlx::query("DELETE FROM loads WHERE id = ? AND account_id = ?")
            .bind(load_id)
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        log::info!("Account {} deleted load {}", account_id, load_id);
        Ok(())
    }

    /// The account's loads narrowed by `filter`, newest first
    pub async fn list(
        db: &SqlitePool,
        account_id: i64,
        filter: &LoadFilter,
    ) -> AppResult<Vec<LoadWithDriver>> {
        let mut query = QueryBuilder::<Sqlite>::new(LOAD_WITH_DRIVER_SELECT);
        query.push_bind(account_id);

        if let Some(status) = filter.status.value() {
            query.push(" AND l.status = ").push_bind(status.to_string());
        }

        if let Some(search) = &filter.search {
            // SQLite's LIKE is case-insensitive for ASCII
            let pattern = format!("%{}%", escape_like(search));
            query
                .push(" AND (l.pickup LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '!' OR l.\"drop\" LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '!' OR l.load_ref LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '!')");
        }

        query.push(" ORDER BY l.id DESC");

        let loads = query
            .build_query_as::<LoadWithDriver>()
            .fetch_all(db)
            .await?;
        Ok(loads)
    }

    /// Counts per status and revenue over every load, ignoring any filter
    pub async fn summarize(db: &SqlitePool, account_id: i64) -> AppResult<LoadSummary> {
        let rows = sqlx::query_as::<_, (String, i64, f64)>(
            "SELECT status, COUNT(*), COALESCE(SUM(rate), 0.0) \
             FROM loads WHERE account_id = ? GROUP BY status",
        )
        .bind(account_id)
        .fetch_all(db)
        .await?;

        let groups = rows.into_iter().filter_map(|(status, count, revenue)| {
            match status.parse::<LoadStatus>() {
                Ok(status) => Some((status, count, revenue)),
                Err(e) => {
                    log::warn!("Skipping loads with {} for account {}", e, account_id);
                    None
                }
            }
        });

        Ok(LoadSummary::from_groups(groups))
    }
}

/// Escape LIKE wildcards so the search text matches literally (`ESCAPE '!'`)
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
