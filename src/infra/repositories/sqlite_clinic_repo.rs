use crate::domain::{models::clinic::Clinic, ports::ClinicRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteClinicRepo {
    pool: SqlitePool,
}

impl SqliteClinicRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl ClinicRepository for SqliteClinicRepo {
    async fn create(&self, clinic: &Clinic) -> Result<Clinic, AppError> {
        sqlx::query_as::<_, Clinic>(
            r#"INSERT INTO clinics (id, slug, name, description, address, phone, email, website, state_id, area_id, latitude, longitude, image_url, is_approved, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&clinic.id)
            .bind(&clinic.slug)
            .bind(&clinic.name)
            .bind(&clinic.description)
            .bind(&clinic.address)
            .bind(&clinic.phone)
            .bind(&clinic.email)
            .bind(&clinic.website)
            .bind(&clinic.state_id)
            .bind(&clinic.area_id)
            .bind(clinic.latitude)
            .bind(clinic.longitude)
            .bind(&clinic.image_url)
            .bind(clinic.is_approved)
            .bind(clinic.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Clinic>, AppError> {
        sqlx::query_as::<_, Clinic>("SELECT * FROM clinics WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Clinic>, AppError> {
        sqlx::query_as::<_, Clinic>("SELECT * FROM clinics WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_approved(
        &self,
        state_id: Option<&str>,
        area_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Clinic>, AppError> {
        sqlx::query_as::<_, Clinic>(
            r#"SELECT * FROM clinics
               WHERE is_approved = 1
               AND (? IS NULL OR state_id = ?)
               AND (? IS NULL OR area_id = ?)
               ORDER BY name
               LIMIT ? OFFSET ?"#
        )
            .bind(state_id)
            .bind(state_id)
            .bind(area_id)
            .bind(area_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_pending(&self) -> Result<Vec<Clinic>, AppError> {
        sqlx::query_as::<_, Clinic>(
            "SELECT * FROM clinics WHERE is_approved = 0 ORDER BY created_at"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Clinic>, AppError> {
        let pattern = format!("%{}%", query);
        sqlx::query_as::<_, Clinic>(
            r#"SELECT c.* FROM clinics c
               JOIN areas a ON a.id = c.area_id
               JOIN states s ON s.id = c.state_id
               WHERE c.is_approved = 1
               AND (c.name LIKE ? OR c.address LIKE ? OR a.name LIKE ? OR s.name LIKE ?)
               ORDER BY CASE WHEN c.name LIKE ? THEN 0 ELSE 1 END, c.name
               LIMIT ?"#
        )
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, clinic: &Clinic) -> Result<Clinic, AppError> {
        sqlx::query_as::<_, Clinic>(
            r#"UPDATE clinics SET
               slug = ?, name = ?, description = ?, address = ?, phone = ?,
               email = ?, website = ?, state_id = ?, area_id = ?,
               latitude = ?, longitude = ?, image_url = ?, is_approved = ?
               WHERE id = ?
               RETURNING *"#
        )
            .bind(&clinic.slug)
            .bind(&clinic.name)
            .bind(&clinic.description)
            .bind(&clinic.address)
            .bind(&clinic.phone)
            .bind(&clinic.email)
            .bind(&clinic.website)
            .bind(&clinic.state_id)
            .bind(&clinic.area_id)
            .bind(clinic.latitude)
            .bind(clinic.longitude)
            .bind(&clinic.image_url)
            .bind(clinic.is_approved)
            .bind(&clinic.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_approved(&self, id: &str, approved: bool) -> Result<(), AppError> {
        let res = sqlx::query("UPDATE clinics SET is_approved = ? WHERE id = ?")
            .bind(approved)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Clinic not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM clinics WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Clinic not found".into()));
        }
        Ok(())
    }
}
