use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{requests::{DateOverrideRequest, ReplaceHoursRequest}, responses::HoursResponse};
use crate::domain::models::hours::{DateOverride, WeeklyHours};
use crate::domain::services::operating_status::validate_time;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

/// How far ahead of today the public hours endpoint reports overrides.
const OVERRIDE_LOOKAHEAD_DAYS: i64 = 60;

pub async fn get_hours(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_slug(&slug).await?
        .filter(|c| c.is_approved)
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let weekly = state.hours_repo.list_weekly(&clinic.id).await?;

    let today = Utc::now().date_naive();
    let overrides = state.hours_repo
        .list_overrides_by_range(&clinic.id, today, today + Duration::days(OVERRIDE_LOOKAHEAD_DAYS))
        .await?;

    Ok(Json(HoursResponse { weekly, overrides }))
}

pub async fn replace_hours(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(clinic_id): Path<String>,
    Json(payload): Json<ReplaceHoursRequest>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_id(&clinic_id).await?
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let mut entries = Vec::with_capacity(payload.hours.len());
    for entry in payload.hours {
        if !(0..=6).contains(&entry.day_of_week) {
            return Err(AppError::Validation("day_of_week must be 0 (Monday) to 6 (Sunday)".into()));
        }
        validate_time(&entry.open_time)?;
        validate_time(&entry.close_time)?;

        entries.push(WeeklyHours::new(
            clinic.id.clone(),
            entry.day_of_week,
            entry.open_time,
            entry.close_time,
        ));
    }

    state.hours_repo.replace_weekly(&clinic.id, &entries).await?;
    info!("Replaced weekly hours for clinic {} ({} shifts)", clinic.id, entries.len());

    Ok(Json(entries))
}

pub async fn upsert_override(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(clinic_id): Path<String>,
    Json(payload): Json<DateOverrideRequest>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_id(&clinic_id).await?
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    if payload.open_time.is_some() != payload.close_time.is_some() {
        return Err(AppError::Validation("open_time and close_time must be given together".into()));
    }
    if let Some(ref t) = payload.open_time { validate_time(t)?; }
    if let Some(ref t) = payload.close_time { validate_time(t)?; }

    let mut entity = DateOverride::new(clinic.id, payload.date);
    entity.is_closed = payload.is_closed;
    entity.open_time = payload.open_time;
    entity.close_time = payload.close_time;
    entity.note = payload.note;

    let saved = state.hours_repo.upsert_override(&entity).await?;
    info!("Upserted override for clinic {} on {}", clinic_id, payload.date);
    Ok(Json(saved))
}

pub async fn list_overrides(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(clinic_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_id(&clinic_id).await?
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let start_str = params.get("start").ok_or(AppError::Validation("start required".into()))?;
    let end_str = params.get("end").ok_or(AppError::Validation("end required".into()))?;

    let start = NaiveDate::parse_from_str(start_str, "%Y-%m-%d").map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end = NaiveDate::parse_from_str(end_str, "%Y-%m-%d").map_err(|_| AppError::Validation("Invalid end".into()))?;

    let overrides = state.hours_repo.list_overrides_by_range(&clinic.id, start, end).await?;
    Ok(Json(overrides))
}

pub async fn delete_override(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path((clinic_id, date_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_id(&clinic_id).await?
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date".into()))?;

    state.hours_repo.delete_override(&clinic.id, date).await?;
    info!("Deleted override for clinic {} on {}", clinic_id, date_str);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
