use crate::domain::{models::hours::{DateOverride, WeeklyHours}, ports::HoursRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::NaiveDate;

pub struct SqliteHoursRepo {
    pool: SqlitePool,
}

impl SqliteHoursRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl HoursRepository for SqliteHoursRepo {
    async fn replace_weekly(&self, clinic_id: &str, hours: &[WeeklyHours]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM clinic_hours WHERE clinic_id = ?")
            .bind(clinic_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for entry in hours {
            sqlx::query(
                r#"INSERT INTO clinic_hours (id, clinic_id, day_of_week, open_time, close_time, created_at)
                   VALUES (?, ?, ?, ?, ?, ?)"#
            )
                .bind(&entry.id)
                .bind(clinic_id)
                .bind(entry.day_of_week)
                .bind(&entry.open_time)
                .bind(&entry.close_time)
                .bind(entry.created_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)
    }

    async fn list_weekly(&self, clinic_id: &str) -> Result<Vec<WeeklyHours>, AppError> {
        sqlx::query_as::<_, WeeklyHours>(
            "SELECT * FROM clinic_hours WHERE clinic_id = ? ORDER BY day_of_week, open_time"
        )
            .bind(clinic_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert_override(&self, entity: &DateOverride) -> Result<DateOverride, AppError> {
        sqlx::query_as::<_, DateOverride>(
            r#"INSERT INTO clinic_special_hours (id, clinic_id, date, is_closed, open_time, close_time, note, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(clinic_id, date) DO UPDATE SET
               is_closed=excluded.is_closed,
               open_time=excluded.open_time,
               close_time=excluded.close_time,
               note=excluded.note
               RETURNING *"#
        )
            .bind(&entity.id)
            .bind(&entity.clinic_id)
            .bind(entity.date)
            .bind(entity.is_closed)
            .bind(&entity.open_time)
            .bind(&entity.close_time)
            .bind(&entity.note)
            .bind(entity.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_override_by_date(&self, clinic_id: &str, date: NaiveDate) -> Result<Option<DateOverride>, AppError> {
        sqlx::query_as::<_, DateOverride>(
            "SELECT * FROM clinic_special_hours WHERE clinic_id = ? AND date = ?"
        )
            .bind(clinic_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_overrides_by_range(&self, clinic_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<DateOverride>, AppError> {
        sqlx::query_as::<_, DateOverride>(
            "SELECT * FROM clinic_special_hours WHERE clinic_id = ? AND date >= ? AND date <= ? ORDER BY date"
        )
            .bind(clinic_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_override(&self, clinic_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM clinic_special_hours WHERE clinic_id = ? AND date = ?")
            .bind(clinic_id)
            .bind(date)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Override not found".into()));
        }
        Ok(())
    }
}
