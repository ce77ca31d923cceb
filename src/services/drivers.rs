/// Driver roster CRUD, scoped to the owning account
use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use super::{begin_write, ensure_owner};
use crate::error::{AppError, AppResult};
use crate::models::{Driver, DriverForm, DriverStatus};

pub struct DriverService;

impl DriverService {
    pub async fn create(db: &SqlitePool, account_id: i64, form: &DriverForm) -> AppResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            "INSERT INTO drivers (name, truck_number, phone, status, account_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&form.name)
        .bind(&form.truck_number)
        .bind(&form.phone)
        .bind(DriverStatus::Available.as_str())
        .bind(account_id)
        .bind(Utc::now())
        .fetch_one(db)
        .await?;

        log::info!("Account {} added driver {} ({})", account_id, driver.id, driver.name);

        Ok(driver)
    }

    pub async fn list(db: &SqlitePool, account_id: i64) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE account_id = ? ORDER BY name COLLATE NOCASE, id",
        )
        .bind(account_id)
        .fetch_all(db)
        .await?;
        Ok(drivers)
    }

    /// `NotFound` when the id is unknown, `Forbidden` when another account owns it
    pub async fn get_owned<'e, E>(executor: E, account_id: i64, driver_id: i64) -> AppResult<Driver>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = ?")
            .bind(driver_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound)?;

        ensure_owner("driver", driver.id, driver.account_id, account_id)?;
        Ok(driver)
    }

    pub async fn update(
        db: &SqlitePool,
        account_id: i64,
        driver_id: i64,
        form: &DriverForm,
    ) -> AppResult<Driver> {
        let mut tx = begin_write(db).await?;
        Self::get_owned(&mut *tx, account_id, driver_id).await?;

        let driver = sqlx::query_as::<_, Driver>(
            "UPDATE drivers SET name = ?, truck_number = ?, phone = ? \
             WHERE id = ? AND account_id = ? RETURNING *",
        )
        .bind(&form.name)
        .bind(&form.truck_number)
        .bind(&form.phone)
        .bind(driver_id)
        .bind(account_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(driver)
    }

    /// Loads assigned to the driver fall back to unassigned (`ON DELETE SET NULL`)
    pub async fn delete(db: &SqlitePool, account_id: i64, driver_id: i64) -> AppResult<()> {
        let mut tx = begin_write(db).await?;
        Self::get_owned(&mut *tx, account_id, driver_id).await?;

        sqlx::query("DELETE FROM drivers WHERE id = ? AND account_id = ?")
            .bind(driver_id)
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        log::info!("Account {} deleted driver {}", account_id, driver_id);
        Ok(())
    }
}
