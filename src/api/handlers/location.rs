use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateAreaRequest, CreateStateRequest, UpdateAreaRequest, UpdateStateRequest};
use crate::api::dtos::responses::StateDetailResponse;
use crate::domain::models::location::{Area, StateRecord};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_states(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let states = state.location_repo.list_states().await?;
    Ok(Json(states))
}

pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.location_repo.find_state_by_slug(&slug).await?
        .ok_or(AppError::NotFound("State not found".into()))?;

    let areas = state.location_repo.list_areas_by_state(&record.id).await?;

    Ok(Json(StateDetailResponse { state: record, areas }))
}

pub async fn create_state(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<CreateStateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.slug.trim().is_empty() {
        return Err(AppError::Validation("name and slug are required".into()));
    }

    let record = StateRecord::new(payload.name, payload.slug);
    let created = state.location_repo.create_state(&record).await?;
    info!("Created state: {}", created.slug);
    Ok(Json(created))
}

pub async fn update_state(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut record = state.location_repo.find_state_by_id(&id).await?
        .ok_or(AppError::NotFound("State not found".into()))?;

    if let Some(val) = payload.name { record.name = val; }
    if let Some(val) = payload.slug { record.slug = val; }

    let updated = state.location_repo.update_state(&record).await?;
    Ok(Json(updated))
}

pub async fn delete_state(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.location_repo.delete_state(&id).await?;
    info!("Deleted state: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn create_area(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<CreateAreaRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.location_repo.find_state_by_id(&payload.state_id).await?
        .ok_or(AppError::Validation("Unknown state_id".into()))?;

    if payload.name.trim().is_empty() || payload.slug.trim().is_empty() {
        return Err(AppError::Validation("name and slug are required".into()));
    }

    let area = Area::new(payload.state_id, payload.name, payload.slug);
    let created = state.location_repo.create_area(&area).await?;
    info!("Created area: {}", created.slug);
    Ok(Json(created))
}

pub async fn update_area(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAreaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut area = state.location_repo.find_area_by_id(&id).await?
        .ok_or(AppError::NotFound("Area not found".into()))?;

    if let Some(val) = payload.state_id {
        state.location_repo.find_state_by_id(&val).await?
            .ok_or(AppError::Validation("Unknown state_id".into()))?;
        area.state_id = val;
    }
    if let Some(val) = payload.name { area.name = val; }
    if let Some(val) = payload.slug { area.slug = val; }

    let updated = state.location_repo.update_area(&area).await?;
    Ok(Json(updated))
}

pub async fn delete_area(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.location_repo.delete_area(&id).await?;
    info!("Deleted area: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
