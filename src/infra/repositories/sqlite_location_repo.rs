use crate::domain::{models::location::{Area, StateRecord}, ports::LocationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteLocationRepo {
    pool: SqlitePool,
}

impl SqliteLocationRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepo {
    async fn create_state(&self, state: &StateRecord) -> Result<StateRecord, AppError> {
        sqlx::query_as::<_, StateRecord>(
            "INSERT INTO states (id, name, slug, created_at) VALUES (?, ?, ?, ?) RETURNING *"
        )
            .bind(&state.id)
            .bind(&state.name)
            .bind(&state.slug)
            .bind(state.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_states(&self) -> Result<Vec<StateRecord>, AppError> {
        sqlx::query_as::<_, StateRecord>("SELECT * FROM states ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_state_by_id(&self, id: &str) -> Result<Option<StateRecord>, AppError> {
        sqlx::query_as::<_, StateRecord>("SELECT * FROM states WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_state_by_slug(&self, slug: &str) -> Result<Option<StateRecord>, AppError> {
        sqlx::query_as::<_, StateRecord>("SELECT * FROM states WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_state(&self, state: &StateRecord) -> Result<StateRecord, AppError> {
        sqlx::query_as::<_, StateRecord>(
            "UPDATE states SET name = ?, slug = ? WHERE id = ? RETURNING *"
        )
            .bind(&state.name)
            .bind(&state.slug)
            .bind(&state.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_state(&self, id: &str) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM states WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("State not found".into()));
        }
        Ok(())
    }

    async fn create_area(&self, area: &Area) -> Result<Area, AppError> {
        sqlx::query_as::<_, Area>(
            "INSERT INTO areas (id, state_id, name, slug, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&area.id)
            .bind(&area.state_id)
            .bind(&area.name)
            .bind(&area.slug)
            .bind(area.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_areas_by_state(&self, state_id: &str) -> Result<Vec<Area>, AppError> {
        sqlx::query_as::<_, Area>("SELECT * FROM areas WHERE state_id = ? ORDER BY name")
            .bind(state_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_area_by_id(&self, id: &str) -> Result<Option<Area>, AppError> {
        sqlx::query_as::<_, Area>("SELECT * FROM areas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_area_by_slug(&self, slug: &str) -> Result<Option<Area>, AppError> {
        sqlx::query_as::<_, Area>("SELECT * FROM areas WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_area(&self, area: &Area) -> Result<Area, AppError> {
        sqlx::query_as::<_, Area>(
            "UPDATE areas SET state_id = ?, name = ?, slug = ? WHERE id = ? RETURNING *"
        )
            .bind(&area.state_id)
            .bind(&area.name)
            .bind(&area.slug)
            .bind(&area.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_area(&self, id: &str) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM areas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Area not found".into()));
        }
        Ok(())
    }
}
