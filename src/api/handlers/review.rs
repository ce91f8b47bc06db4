use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{requests::{CreateReviewRequest, ModerateReviewRequest}, responses::ReviewsResponse};
use crate::domain::models::{job::Job, review::Review};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_slug(&slug).await?
        .filter(|c| c.is_approved)
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    let reviews = state.review_repo.list_by_clinic(&clinic.id, "APPROVED").await?;
    let summary = state.review_repo.rating_summary(&clinic.id).await?;

    Ok(Json(ReviewsResponse {
        reviews,
        average_rating: summary.average_rating,
        review_count: summary.review_count,
    }))
}

/// Public review submission; held for moderation.
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let clinic = state.clinic_repo.find_by_slug(&slug).await?
        .filter(|c| c.is_approved)
        .ok_or(AppError::NotFound("Clinic not found".into()))?;

    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::Validation("rating must be between 1 and 5".into()));
    }
    if payload.author_name.trim().is_empty() || payload.body.trim().is_empty() {
        return Err(AppError::Validation("author_name and body are required".into()));
    }

    let review = Review::new(clinic.id.clone(), payload.author_name, payload.rating, payload.body);
    let created = state.review_repo.create(&review).await?;

    let job = Job::new("REVIEW_SUBMITTED", clinic.id, Some(created.id.clone()));
    state.job_repo.create(&job).await?;

    info!("Review {} submitted for clinic {}", created.id, slug);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_pending_reviews(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let reviews = state.review_repo.list_by_status("PENDING").await?;
    Ok(Json(reviews))
}

pub async fn moderate_review(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<ModerateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = match payload.action.as_str() {
        "approve" => "APPROVED",
        "reject" => "REJECTED",
        _ => return Err(AppError::Validation("action must be approve or reject".into())),
    };

    state.review_repo.update_status(&id, status).await?;
    info!("Review {} moderated: {}", id, status);
    Ok(Json(serde_json::json!({"status": status})))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.review_repo.delete(&id).await?;
    info!("Deleted review: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
