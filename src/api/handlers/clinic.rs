use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateClinicRequest, SubmitClinicRequest, UpdateClinicRequest},
    responses::ClinicDetailResponse,
};
use crate::domain::models::{clinic::Clinic, job::Job};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use tracing::{info, warn};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

pub async fn list_clinics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let state_id = match params.get("state") {
        Some(slug) => {
            let record = state.location_repo.find_state_by_slug(slug).await?
                .ok_or(AppError::NotFound("State not found".into()))?;
            Some(record.id)
        }
        None => None,
    };

    let area_id = match params.get("area") {
        Some(slug) => {
            let area = state.location_repo.find_area_by_slug(slug).await?
                .ok_or(AppError::NotFound("Area not found".into()))?;
            Some(area.id)
        }
        None => None,
    };

    let page: i64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1).max(1);
    let per_page: i64 = params.get("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let clinics = state.clinic_repo.list_approved(
        state_id.as_deref(),
        area_id.as_deref(),
        per_page,
        (page - 1) * per_page,
    ).await?;

    Ok(Json(clinics))
}

pub async fn search_clinics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let query = params.get("q").map(|q| q.trim()).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::Validation("q is required".into()));
    }

    let clinics = state.clinic_repo.search(query, DEFAULT_PAGE_SIZE).await?;
    Ok(Json(clinics))
}

pub async fn get_clinic(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_slug(&slug).await?
        .filter(|c| c.is_approved)
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let dentists = state.dentist_repo.list_by_clinic(&clinic.id).await?;

    Ok(Json(ClinicDetailResponse { clinic, dentists }))
}

/// Public listing submission. The clinic stays hidden until an admin
/// approves it; a notification job tells the admins it arrived.
pub async fn submit_clinic(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitClinicRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.address.trim().is_empty() {
        return Err(AppError::Validation("name and address are required".into()));
    }

    let area = state.location_repo.find_area_by_slug(&payload.area_slug).await?
        .ok_or(AppError::Validation("Unknown area".into()))?;

    let clinic = Clinic {
        id: Uuid::new_v4().to_string(),
        slug: slugify(&payload.name),
        name: payload.name,
        description: payload.description.unwrap_or_default(),
        address: payload.address,
        phone: payload.phone,
        email: payload.email,
        website: payload.website,
        state_id: area.state_id.clone(),
        area_id: area.id,
        latitude: None,
        longitude: None,
        image_url: None,
        is_approved: false,
        created_at: Utc::now(),
    };

    let created = state.clinic_repo.create(&clinic).await?;

    let job = Job::new("CLINIC_SUBMITTED", created.id.clone(), None);
    state.job_repo.create(&job).await?;

    info!("Public clinic submission: {}", created.slug);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_clinic(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<CreateClinicRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating clinic: {}", payload.slug);

    let area = state.location_repo.find_area_by_id(&payload.area_id).await?
        .ok_or(AppError::Validation("Unknown area_id".into()))?;

    if area.state_id != payload.state_id {
        return Err(AppError::Validation("Area does not belong to the given state".into()));
    }

    let mut clinic = Clinic {
        id: Uuid::new_v4().to_string(),
        slug: payload.slug,
        name: payload.name,
        description: payload.description,
        address: payload.address,
        phone: payload.phone,
        email: payload.email,
        website: payload.website,
        state_id: payload.state_id,
        area_id: payload.area_id,
        latitude: payload.latitude,
        longitude: payload.longitude,
        image_url: payload.image_url,
        is_approved: true,
        created_at: Utc::now(),
    };

    if clinic.latitude.is_none() || clinic.longitude.is_none() {
        geocode_address(&state, &mut clinic).await;
    }

    let created = state.clinic_repo.create(&clinic).await?;
    Ok(Json(created))
}

pub async fn update_clinic(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateClinicRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut clinic = state.clinic_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let address_changed = payload.address.is_some();

    if let Some(val) = payload.slug { clinic.slug = val; }
    if let Some(val) = payload.name { clinic.name = val; }
    if let Some(val) = payload.description { clinic.description = val; }
    if let Some(val) = payload.address { clinic.address = val; }
    if let Some(val) = payload.phone { clinic.phone = val; }
    if let Some(val) = payload.email { clinic.email = Some(val); }
    if let Some(val) = payload.website { clinic.website = Some(val); }
    if let Some(val) = payload.image_url { clinic.image_url = Some(val); }
    if let Some(val) = payload.area_id {
        let area = state.location_repo.find_area_by_id(&val).await?
            .ok_or(AppError::Validation("Unknown area_id".into()))?;
        clinic.area_id = area.id;
        clinic.state_id = area.state_id;
    }
    if let Some(val) = payload.state_id {
        let area = state.location_repo.find_area_by_id(&clinic.area_id).await?
            .ok_or(AppError::Validation("Unknown area_id".into()))?;
        if area.state_id != val {
            return Err(AppError::Validation("Area does not belong to the given state".into()));
        }
        clinic.state_id = val;
    }

    match (payload.latitude, payload.longitude) {
        (Some(lat), Some(lng)) => {
            clinic.latitude = Some(lat);
            clinic.longitude = Some(lng);
        }
        _ if address_changed => geocode_address(&state, &mut clinic).await,
        _ => {}
    }

    let updated = state.clinic_repo.update(&clinic).await?;
    info!("Updated clinic: {}", updated.slug);
    Ok(Json(updated))
}

pub async fn approve_clinic(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.clinic_repo.set_approved(&id, true).await?;
    info!("Approved clinic: {}", id);
    Ok(Json(serde_json::json!({"status": "approved"})))
}

pub async fn list_pending_clinics(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let clinics = state.clinic_repo.list_pending().await?;
    Ok(Json(clinics))
}

pub async fn delete_clinic(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.clinic_repo.delete(&id).await?;
    info!("Deleted clinic: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// Best effort: a clinic without coordinates is still listable, so geocoder
/// trouble must not fail the write.
async fn geocode_address(state: &Arc<AppState>, clinic: &mut Clinic) {
    match state.geocoding_service.geocode(&clinic.address).await {
        Ok(Some(point)) => {
            clinic.latitude = Some(point.latitude);
            clinic.longitude = Some(point.longitude);
        }
        Ok(None) => warn!("Geocoder found no match for clinic {}", clinic.slug),
        Err(e) => warn!("Geocoding failed for clinic {}: {}", clinic.slug, e),
    }
}

fn slugify(name: &str) -> String {
    let base: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let trimmed = base.trim_matches('-').to_string();

    // Suffix keeps public submissions from colliding on popular names.
    let suffix: String = Uuid::new_v4().to_string().chars().take(8).collect();
    format!("{}-{}", trimmed, suffix)
}
