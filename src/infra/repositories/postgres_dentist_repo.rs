use crate::domain::{models::dentist::Dentist, ports::DentistRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresDentistRepo {
    pool: PgPool,
}

impl PostgresDentistRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl DentistRepository for PostgresDentistRepo {
    async fn create(&self, dentist: &Dentist) -> Result<Dentist, AppError> {
        sqlx::query_as::<_, Dentist>(
            r#"INSERT INTO dentists (id, clinic_id, name, slug, qualifications, bio, image_url, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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
        sqlx::query_as::<_, Dentist>("SELECT * FROM dentists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_clinic(&self, clinic_id: &str) -> Result<Vec<Dentist>, AppError> {
        sqlx::query_as::<_, Dentist>("SELECT * FROM dentists WHERE clinic_id = $1 ORDER BY name")
            .bind(clinic_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, dentist: &Dentist) -> Result<Dentist, AppError> {
        sqlx::query_as::<_, Dentist>(
            r#"UPDATE dentists SET name = $1, slug = $2, qualifications = $3, bio = $4, image_url = $5
               WHERE id = $6
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
        let res = sqlx::query("DELETE FROM dentists WHERE id = $1")
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
