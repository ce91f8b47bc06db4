use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, clinic, dentist, health, hours, job, location, review, status};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Public directory
        .route("/api/v1/states", get(location::list_states))
        .route("/api/v1/states/{slug}", get(location::get_state))
        .route("/api/v1/clinics", get(clinic::list_clinics))
        .route("/api/v1/clinics/search", get(clinic::search_clinics))
        .route("/api/v1/clinics/submit", post(clinic::submit_clinic))
        .route("/api/v1/clinics/{slug}", get(clinic::get_clinic))
        .route("/api/v1/clinics/{slug}/hours", get(hours::get_hours))
        .route("/api/v1/clinics/{slug}/status", get(status::get_status))
        .route("/api/v1/clinics/{slug}/dentists", get(dentist::list_dentists))
        .route("/api/v1/clinics/{slug}/reviews", get(review::list_reviews).post(review::create_review))

        // Admin - locations
        .route("/api/v1/admin/states", post(location::create_state))
        .route("/api/v1/admin/states/{id}", put(location::update_state).delete(location::delete_state))
        .route("/api/v1/admin/areas", post(location::create_area))
        .route("/api/v1/admin/areas/{id}", put(location::update_area).delete(location::delete_area))

        // Admin - clinics
        .route("/api/v1/admin/clinics", post(clinic::create_clinic))
        .route("/api/v1/admin/clinics/pending", get(clinic::list_pending_clinics))
        .route("/api/v1/admin/clinics/{id}", put(clinic::update_clinic).delete(clinic::delete_clinic))
        .route("/api/v1/admin/clinics/{id}/approve", post(clinic::approve_clinic))
        .route("/api/v1/admin/clinics/{id}/dentists", post(dentist::create_dentist))
        .route("/api/v1/admin/dentists/{id}", put(dentist::update_dentist).delete(dentist::delete_dentist))

        // Admin - hours & overrides
        .route("/api/v1/admin/clinics/{id}/hours", put(hours::replace_hours))
        .route("/api/v1/admin/clinics/{id}/overrides", get(hours::list_overrides).post(hours::upsert_override))
        .route("/api/v1/admin/clinics/{id}/overrides/{date}", delete(hours::delete_override))

        // Admin - moderation & jobs
        .route("/api/v1/admin/reviews/pending", get(review::list_pending_reviews))
        .route("/api/v1/admin/reviews/{id}/moderate", post(review::moderate_review))
        .route("/api/v1/admin/reviews/{id}", delete(review::delete_review))
        .route("/api/v1/admin/jobs", get(job::list_jobs))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
