use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateDentistRequest, UpdateDentistRequest};
use crate::domain::models::dentist::Dentist;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_dentists(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_slug(&slug).await?
        .filter(|c| c.is_approved)
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let dentists = state.dentist_repo.list_by_clinic(&clinic.id).await?;
    Ok(Json(dentists))
}

pub async fn create_dentist(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(clinic_id): Path<String>,
    Json(payload): Json<CreateDentistRequest>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_id(&clinic_id).await?
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }

    let dentist = Dentist::new(
        clinic.id,
        payload.name,
        payload.slug,
        payload.qualifications,
        payload.bio,
        payload.image_url,
    );

    let created = state.dentist_repo.create(&dentist).await?;
    info!("Created dentist {} for clinic {}", created.slug, clinic_id);
    Ok(Json(created))
}

pub async fn update_dentist(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDentistRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut dentist = state.dentist_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Dentist not found".into()))?;

    if let Some(val) = payload.name { dentist.name = val; }
    if let Some(val) = payload.slug { dentist.slug = val; }
    if let Some(val) = payload.qualifications { dentist.qualifications = val; }
    if let Some(val) = payload.bio { dentist.bio = val; }
    if let Some(val) = payload.image_url { dentist.image_url = Some(val); }

    let updated = state.dentist_repo.update(&dentist).await?;
    Ok(Json(updated))
}

pub async fn delete_dentist(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.dentist_repo.delete(&id).await?;
    info!("Deleted dentist: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
