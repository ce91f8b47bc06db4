use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::StatusResponse;
use crate::domain::services::operating_status::evaluate;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use chrono_tz::Tz;

/// Open/closed badge for a clinic, evaluated against the configured site
/// timezone rather than the server's local clock. Callers poll this; every
/// request recomputes from fresh rows.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_slug(&slug).await?
        .filter(|c| c.is_approved)
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let tz: Tz = state.config.site_timezone.parse().unwrap_or(chrono_tz::UTC);
    let now = Utc::now().with_timezone(&tz).naive_local();

    let weekly = state.hours_repo.list_weekly(&clinic.id).await?;
    let overrides: Vec<_> = state.hours_repo
        .find_override_by_date(&clinic.id, now.date())
        .await?
        .into_iter()
        .collect();

    let status = evaluate(&weekly, &overrides, now)?;

    Ok(Json(StatusResponse { status, checked_at: Utc::now() }))
}
