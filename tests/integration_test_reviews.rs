mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn admin_post(app: &TestApp, auth: &AuthHeaders, uri: &str, body: Value) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())).unwrap()
    ).await.unwrap();
    assert!(res.status().is_success(), "admin POST {} failed: {}", uri, res.status());
    parse_body(res).await
}

async fn post_review(app: &TestApp, slug: &str, body: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/clinics/{}/reviews", slug))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())).unwrap()
    ).await.unwrap()
}

async fn setup_clinic(app: &TestApp, auth: &AuthHeaders) -> String {
    let state = admin_post(app, auth, "/api/v1/admin/states", json!({
        "name": "Sarawak", "slug": "sarawak"
    })).await;
    let area = admin_post(app, auth, "/api/v1/admin/areas", json!({
        "state_id": state["id"], "name": "Kuching", "slug": "kuching"
    })).await;
    let clinic = admin_post(app, auth, "/api/v1/admin/clinics", json!({
        "slug": "riverside-dental",
        "name": "Riverside Dental",
        "description": "Family dentistry",
        "address": "5 Jalan Padungan, Kuching",
        "phone": "+60-82-555-789",
        "state_id": state["id"],
        "area_id": area["id"],
        "latitude": 1.5575,
        "longitude": 110.3439
    })).await;
    clinic["slug"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_review_rating_is_validated() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let slug = setup_clinic(&app, &auth).await;

    let res = post_review(&app, &slug, json!({
        "author_name": "Aina", "rating": 6, "body": "Too good to be true"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = post_review(&app, &slug, json!({
        "author_name": "", "rating": 4, "body": "No name given"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_moderation_flow() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let slug = setup_clinic(&app, &auth).await;

    let res = post_review(&app, &slug, json!({
        "author_name": "Hafiz", "rating": 5, "body": "Painless wisdom tooth extraction."
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let review = parse_body(res).await;
    assert_eq!(review["status"], "PENDING");
    let review_id = review["id"].as_str().unwrap().to_string();

    // Pending reviews stay invisible to the public.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/clinics/{}/reviews", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["reviews"].as_array().unwrap().len(), 0);
    assert_eq!(body["review_count"], 0);

    // Admin sees it in the moderation queue.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/reviews/pending")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let pending = parse_body(res).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    admin_post(&app, &auth, &format!("/api/v1/admin/reviews/{}/moderate", review_id),
        json!({"action": "approve"})).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/clinics/{}/reviews", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(body["review_count"], 1);
    assert_eq!(body["average_rating"], 5.0);
}

#[tokio::test]
async fn test_rejected_review_is_excluded_from_average() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let slug = setup_clinic(&app, &auth).await;

    let good = parse_body(post_review(&app, &slug, json!({
        "author_name": "Mei", "rating": 4, "body": "Friendly staff."
    })).await).await;
    let bad = parse_body(post_review(&app, &slug, json!({
        "author_name": "Anon", "rating": 1, "body": "Spam spam spam"
    })).await).await;

    admin_post(&app, &auth, &format!("/api/v1/admin/reviews/{}/moderate", good["id"].as_str().unwrap()),
        json!({"action": "approve"})).await;
    admin_post(&app, &auth, &format!("/api/v1/admin/reviews/{}/moderate", bad["id"].as_str().unwrap()),
        json!({"action": "reject"})).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/clinics/{}/reviews", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["review_count"], 1);
    assert_eq!(body["average_rating"], 4.0);
}

#[tokio::test]
async fn test_invalid_moderation_action_is_rejected() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let slug = setup_clinic(&app, &auth).await;

    let review = parse_body(post_review(&app, &slug, json!({
        "author_name": "Lim", "rating": 3, "body": "Average visit."
    })).await).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/admin/reviews/{}/moderate", review["id"].as_str().unwrap()))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"action": "escalate"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_submission_enqueues_notification_job() {
    let app = TestApp::new().await;
    let auth = app.login_admin().await;
    let slug = setup_clinic(&app, &auth).await;

    post_review(&app, &slug, json!({
        "author_name": "Siti", "rating": 5, "body": "Very gentle with kids."
    })).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/jobs")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let jobs = parse_body(res).await;
    let jobs = jobs.as_array().unwrap();
    assert!(jobs.iter().any(|j| j["job_type"] == "REVIEW_SUBMITTED"));
}
