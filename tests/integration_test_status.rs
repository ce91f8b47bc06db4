mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::Utc;
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn admin_request(
    app: &TestApp,
    auth: &AuthHeaders,
    method: &str,
    uri: String,
    body: Option<Value>,
) -> axum::response::Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, format!("access_token={}", auth.access_token))
        .header("X-CSRF-Token", &auth.csrf_token);

    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }

    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    app.router.clone().oneshot(request).await.unwrap()
}

/// Creates state -> area -> approved clinic, returns (clinic_id, clinic_slug).
async fn setup_clinic(app: &TestApp, auth: &AuthHeaders) -> (String, String) {
    let res = admin_request(app, auth, "POST", "/api/v1/admin/states".into(), Some(json!({
        "name": "Selangor", "slug": "selangor"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let state = parse_body(res).await;

    let res = admin_request(app, auth, "POST", "/api/v1/admin/areas".into(), Some(json!({
        "state_id": state["id"], "name": "Petaling Jaya", "slug": "petaling-jaya"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let area = parse_body(res).await;

    let res = admin_request(app, auth, "POST", "/api/v1/admin/clinics".into(), Some(json!({
        "slug": "smile-dental-pj",
        "name": "Smile Dental PJ",
        "description": "General dentistry",
        "address": "12 Jalan Universiti, Petaling Jaya",
        "phone": "+60-3-5555-1234",
        "state_id": state["id"],
        "area_id": area["id"],
        "latitude": 3.1073,
        "longitude": 101.6067
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let clinic = parse_body(res).await;

    (
        clinic["id"].as_str().unwrap().to_string(),
        clinic["slug"].as_str().unwrap().to_string(),
    )
}

fn kl_today() -> String {
    Utc::now()
        .with_timezone(&chrono_tz::Asia::Kuala_Lumpur)
        .date_naive()
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
async fn test_status_closed_without_any_hours() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let (_, slug) = setup_clinic(&app, &auth).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/clinics/{}/status", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "closed");
}

#[tokio::test]
async fn test_status_with_all_day_hours_is_not_closed() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let (id, slug) = setup_clinic(&app, &auth).await;

    let hours: Vec<Value> = (0..7).map(|d| json!({
        "day_of_week": d, "open_time": "00:00", "close_time": "23:59"
    })).collect();

    let res = admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/clinics/{}/hours", id),
        Some(json!({"hours": hours}))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/clinics/{}/status", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    // Near midnight the symmetric 30-minute window reports a soon-status,
    // every other instant of an always-open schedule is plain open.
    assert_ne!(body["status"], "closed");
}

#[tokio::test]
async fn test_closed_override_wins_over_weekly_hours() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let (id, slug) = setup_clinic(&app, &auth).await;

    let hours: Vec<Value> = (0..7).map(|d| json!({
        "day_of_week": d, "open_time": "00:00", "close_time": "23:59"
    })).collect();
    admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/clinics/{}/hours", id),
        Some(json!({"hours": hours}))).await;

    let res = admin_request(&app, &auth, "POST",
        format!("/api/v1/admin/clinics/{}/overrides", id),
        Some(json!({"date": kl_today(), "is_closed": true, "note": "Public holiday"}))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/clinics/{}/status", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    let body = parse_body(res).await;
    assert_eq!(body["status"], "closed");

    // Removing the override restores the weekly schedule.
    let res = admin_request(&app, &auth, "DELETE",
        format!("/api/v1/admin/clinics/{}/overrides/{}", id, kl_today()), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/clinics/{}/status", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_ne!(body["status"], "closed");
}

#[tokio::test]
async fn test_hours_validation() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let (id, _) = setup_clinic(&app, &auth).await;

    let res = admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/clinics/{}/hours", id),
        Some(json!({"hours": [{"day_of_week": 0, "open_time": "9am", "close_time": "17:00"}]}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/clinics/{}/hours", id),
        Some(json!({"hours": [{"day_of_week": 7, "open_time": "09:00", "close_time": "17:00"}]}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = admin_request(&app, &auth, "POST",
        format!("/api/v1/admin/clinics/{}/overrides", id),
        Some(json!({"date": kl_today(), "is_closed": false, "open_time": "10:00"}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_override_upsert_is_single_row_per_date() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let (id, _) = setup_clinic(&app, &auth).await;

    let res = admin_request(&app, &auth, "POST",
        format!("/api/v1/admin/clinics/{}/overrides", id),
        Some(json!({"date": "2025-12-25", "is_closed": true, "note": "Christmas"}))).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Same date again flips it to special hours instead of adding a second row.
    let res = admin_request(&app, &auth, "POST",
        format!("/api/v1/admin/clinics/{}/overrides", id),
        Some(json!({"date": "2025-12-25", "is_closed": false, "open_time": "10:00", "close_time": "13:00"}))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = admin_request(&app, &auth, "GET",
        format!("/api/v1/admin/clinics/{}/overrides?start=2025-12-01&end=2025-12-31", id), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let overrides = body.as_array().unwrap();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0]["is_closed"], false);
    assert_eq!(overrides[0]["open_time"], "10:00");
}

#[tokio::test]
async fn test_delete_missing_override_is_not_found() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let (id, _) = setup_clinic(&app, &auth).await;

    let res = admin_request(&app, &auth, "DELETE",
        format!("/api/v1/admin/clinics/{}/overrides/2031-01-01", id), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_hours_endpoint_reports_schedule_and_overrides() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let (id, slug) = setup_clinic(&app, &auth).await;

    admin_request(&app, &auth, "PUT",
        format!("/api/v1/admin/clinics/{}/hours", id),
        Some(json!({"hours": [
            {"day_of_week": 0, "open_time": "09:00", "close_time": "12:00"},
            {"day_of_week": 0, "open_time": "14:00", "close_time": "18:00"}
        ]}))).await;

    admin_request(&app, &auth, "POST",
        format!("/api/v1/admin/clinics/{}/overrides", id),
        Some(json!({"date": kl_today(), "is_closed": true}))).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/clinics/{}/hours", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["weekly"].as_array().unwrap().len(), 2);
    assert_eq!(body["overrides"].as_array().unwrap().len(), 1);
}
