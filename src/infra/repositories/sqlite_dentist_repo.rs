use crate::domain::{models::dentist::Dentist, ports::DentistRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteDentistRepo {
    pool: SqlitePool,
}

impl SqliteDentistRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl DentistRepository for SqliteDentistRepo {
    async fn create(&self, dentist: &Dentist) -> Result<Dentist, AppError> {
        sqlx::query_as::<_, Dentist>(
            r#"INSERT INTO dentists (id, clinic_id, name, slug, qualifications, bio, image_url, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&dentist.id)
            .bind(&dentist.clinic_id)
            .bind(&dentist.name)
            .bind(&dentist.slug)
            .bind(&dentist.qualifications)
            .bind(&dentist.bio)
            .bind(&dentist.image_url)
            .bind(dentist.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Dentist>, AppError> {
        sqlx::query_as::<_, Dentist>("SELECT * FROM dentists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_clinic(&self, clinic_id: &str) -> Result<Vec<Dentist>, AppError> {
        sqlx::query_as::<_, Dentist>("SELECT * FROM dentists WHERE clinic_id = ? ORDER BY name")
            .bind(clinic_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, dentist: &Dentist) -> Result<Dentist, AppError> {
        sqlx::query_as::<_, Dentist>(
            r#"UPDATE dentists SET name = ?, slug = ?, qualifications = ?, bio = ?, image_url = ?
               WHERE id = ?
               RETURNING *"#
        )
            .bind(&dentist.name)
            .bind(&dentist.slug)
            .bind(&dentist.qualifications)
            .bind(&dentist.bio)
            .bind(&dentist.image_url)
            .bind(&dentist.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM dentists WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Dentist not found".into()));
        }
        Ok(())
    }
}
