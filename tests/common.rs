use directory_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_clinic_repo::SqliteClinicRepo,
        sqlite_dentist_repo::SqliteDentistRepo,
        sqlite_hours_repo::SqliteHoursRepo,
        sqlite_job_repo::SqliteJobRepo,
        sqlite_location_repo::SqliteLocationRepo,
        sqlite_review_repo::SqliteReviewRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    domain::models::location::GeoPoint,
    domain::models::user::AdminUser,
    domain::ports::{EmailService, GeocodingService, UserRepository},
    domain::services::auth_service::AuthService,
    background::start_background_worker,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use tera::Tera;
use tower::ServiceExt;
use serde_json::Value;

pub const TEST_ADMIN_PASSWORD: &str = "correct-horse-battery";

pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        _recipient: &str,
        _subject: &str,
        _html_body: &str,
    ) -> Result<(), AppError> {
        Ok(())
    }
}

/// Always resolves to a fixed point in Kuala Lumpur.
pub struct MockGeocodingService;

#[async_trait]
impl GeocodingService for MockGeocodingService {
    async fn geocode(&self, _address: &str) -> Result<Option<GeoPoint>, AppError> {
        Ok(Some(GeoPoint { latitude: 3.139, longitude: 101.6869 }))
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template("review_notification.html", "<html>Review by {{ author_name }}</html>").unwrap();
        tera.add_raw_template("clinic_submission.html", "<html>Submission: {{ clinic_name }}</html>").unwrap();
        let templates = Arc::new(tera);

        let priv_key_pem = include_str!("keys/test_private.pem");
        let pub_key_pem = include_str!("keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            notification_email: "moderators@test.local".to_string(),
            geocoder_url: "http://localhost".to_string(),
            site_timezone: "Asia/Kuala_Lumpur".to_string(),
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_username: "admin".to_string(),
            admin_password: TEST_ADMIN_PASSWORD.to_string(),
        };

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        seed_admin(user_repo.as_ref(), &config).await;

        let state = Arc::new(AppState {
            config: config.clone(),
            location_repo: Arc::new(SqliteLocationRepo::new(pool.clone())),
            clinic_repo: Arc::new(SqliteClinicRepo::new(pool.clone())),
            dentist_repo: Arc::new(SqliteDentistRepo::new(pool.clone())),
            review_repo: Arc::new(SqliteReviewRepo::new(pool.clone())),
            hours_repo: Arc::new(SqliteHoursRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            user_repo,
            auth_repo,
            auth_service,
            email_service: Arc::new(MockEmailService),
            geocoding_service: Arc::new(MockGeocodingService),
            templates,
        });

        // Start Background Worker
        let worker_state = state.clone();
        tokio::spawn(async move {
            start_background_worker(worker_state).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    pub async fn login_admin(&self) -> AuthHeaders {
        self.login("admin", TEST_ADMIN_PASSWORD).await
    }
}

async fn seed_admin(user_repo: &dyn UserRepository, config: &Config) {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(config.admin_password.as_bytes(), &salt)
        .expect("Failed to hash test admin password")
        .to_string();

    let admin = AdminUser::new(config.admin_username.clone(), password_hash);
    user_repo.create(&admin).await.expect("Failed to seed test admin");
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
