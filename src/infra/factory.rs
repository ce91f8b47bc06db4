use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::user::AdminUser;
use crate::domain::services::auth_service::AuthService;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::geocode::nominatim_service::NominatimService;
use crate::infra::repositories::{
    postgres_auth_repo::PostgresAuthRepo, postgres_clinic_repo::PostgresClinicRepo,
    postgres_dentist_repo::PostgresDentistRepo, postgres_hours_repo::PostgresHoursRepo,
    postgres_job_repo::PostgresJobRepo, postgres_location_repo::PostgresLocationRepo,
    postgres_review_repo::PostgresReviewRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_clinic_repo::SqliteClinicRepo,
    sqlite_dentist_repo::SqliteDentistRepo, sqlite_hours_repo::SqliteHoursRepo,
    sqlite_job_repo::SqliteJobRepo, sqlite_location_repo::SqliteLocationRepo,
    sqlite_review_repo::SqliteReviewRepo, sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let geocoding_service = Arc::new(NominatimService::new(config.geocoder_url.clone()));

    let mut tera = Tera::default();
    tera.add_raw_template("review_notification.html", include_str!("../templates/review_notification.html"))
        .expect("Failed to load review notification template");
    tera.add_raw_template("clinic_submission.html", include_str!("../templates/clinic_submission.html"))
        .expect("Failed to load clinic submission template");
    let templates = Arc::new(tera);

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            location_repo: Arc::new(PostgresLocationRepo::new(pool.clone())),
            clinic_repo: Arc::new(PostgresClinicRepo::new(pool.clone())),
            dentist_repo: Arc::new(PostgresDentistRepo::new(pool.clone())),
            review_repo: Arc::new(PostgresReviewRepo::new(pool.clone())),
            hours_repo: Arc::new(PostgresHoursRepo::new(pool.clone())),
            job_repo: Arc::new(PostgresJobRepo::new(pool.clone())),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            email_service,
            geocoding_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            location_repo: Arc::new(SqliteLocationRepo::new(pool.clone())),
            clinic_repo: Arc::new(SqliteClinicRepo::new(pool.clone())),
            dentist_repo: Arc::new(SqliteDentistRepo::new(pool.clone())),
            review_repo: Arc::new(SqliteReviewRepo::new(pool.clone())),
            hours_repo: Arc::new(SqliteHoursRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            email_service,
            geocoding_service,
            templates,
        }
    };

    seed_admin_user(&state).await;
    state
}

/// Creates the bootstrap admin account on first start.
async fn seed_admin_user(state: &AppState) {
    let existing = state.user_repo
        .find_by_username(&state.config.admin_username)
        .await
        .expect("Failed to check for admin user");

    if existing.is_some() {
        return;
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(state.config.admin_password.as_bytes(), &salt)
        .expect("Failed to hash admin password")
        .to_string();

    let admin = AdminUser::new(state.config.admin_username.clone(), password_hash);
    state.user_repo.create(&admin).await.expect("Failed to seed admin user");
    info!("Seeded initial admin user: {}", admin.username);
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
