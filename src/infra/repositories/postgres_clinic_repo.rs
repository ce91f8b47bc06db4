use crate::domain::{models::clinic::Clinic, ports::ClinicRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresClinicRepo {
    pool: PgPool,
}

impl PostgresClinicRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl ClinicRepository for PostgresClinicRepo {
    async fn create(&self, clinic: &Clinic) -> Result<Clinic, AppError> {
        sqlx::query_as::<_, Clinic>(
            r#"INSERT INTO clinics (id, slug, name, description, address, phone, email, website, state_id, area_id, latitude, longitude, image_url, is_approved, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
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
        sqlx::query_as::<_, Clinic>("SELECT * FROM clinics WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Clinic>, AppError> {
        sqlx::query_as::<_, Clinic>("SELECT * FROM clinics WHERE slug = $1")
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
               WHERE is_approved
               AND ($1::text IS NULL OR state_id = $1)
               AND ($2::text IS NULL OR area_id = $2)
               ORDER BY name
               LIMIT $3 OFFSET $4"#
        )
            .bind(state_id)
            .bind(area_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_pending(&self) -> Result<Vec<Clinic>, AppError> {
        sqlx::query_as::<_, Clinic>(
            "SELECT * FROM clinics WHERE NOT is_approved ORDER BY created_at"
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
               WHERE c.is_approved
               AND (c.name ILIKE $1 OR c.address ILIKE $1 OR a.name ILIKE $1 OR s.name ILIKE $1)
               ORDER BY CASE WHEN c.name ILIKE $1 THEN 0 ELSE 1 END, c.name
               LIMIT $2"#
        )
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, clinic: &Clinic) -> Result<Clinic, AppError> {
        sqlx::query_as::<_, Clinic>(
            r#"UPDATE clinics SET
               slug = $1, name = $2, description = $3, address = $4, phone = $5,
               email = $6, website = $7, state_id = $8, area_id = $9,
               latitude = $10, longitude = $11, image_url = $12, is_approved = $13
               WHERE id = $14
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
        let res = sqlx::query("UPDATE clinics SET is_approved = $1 WHERE id = $2")
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
        let res = sqlx::query("DELETE FROM clinics WHERE id = $1")
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
