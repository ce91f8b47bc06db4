use crate::domain::models::{
    auth::RefreshTokenRecord,
    clinic::Clinic,
    dentist::Dentist,
    hours::{DateOverride, WeeklyHours},
    job::Job,
    location::{Area, GeoPoint, StateRecord},
    review::{RatingSummary, Review},
    user::AdminUser,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create_state(&self, state: &StateRecord) -> Result<StateRecord, AppError>;
    async fn list_states(&self) -> Result<Vec<StateRecord>, AppError>;
    async fn find_state_by_id(&self, id: &str) -> Result<Option<StateRecord>, AppError>;
    async fn find_state_by_slug(&self, slug: &str) -> Result<Option<StateRecord>, AppError>;
    async fn update_state(&self, state: &StateRecord) -> Result<StateRecord, AppError>;
    async fn delete_state(&self, id: &str) -> Result<(), AppError>;

    async fn create_area(&self, area: &Area) -> Result<Area, AppError>;
    async fn list_areas_by_state(&self, state_id: &str) -> Result<Vec<Area>, AppError>;
    async fn find_area_by_id(&self, id: &str) -> Result<Option<Area>, AppError>;
    async fn find_area_by_slug(&self, slug: &str) -> Result<Option<Area>, AppError>;
    async fn update_area(&self, area: &Area) -> Result<Area, AppError>;
    async fn delete_area(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClinicRepository: Send + Sync {
    async fn create(&self, clinic: &Clinic) -> Result<Clinic, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Clinic>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Clinic>, AppError>;
    async fn list_approved(
        &self,
        state_id: Option<&str>,
        area_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Clinic>, AppError>;
    async fn list_pending(&self) -> Result<Vec<Clinic>, AppError>;
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Clinic>, AppError>;
    async fn update(&self, clinic: &Clinic) -> Result<Clinic, AppError>;
    async fn set_approved(&self, id: &str, approved: bool) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait DentistRepository: Send + Sync {
    async fn create(&self, dentist: &Dentist) -> Result<Dentist, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Dentist>, AppError>;
    async fn list_by_clinic(&self, clinic_id: &str) -> Result<Vec<Dentist>, AppError>;
    async fn update(&self, dentist: &Dentist) -> Result<Dentist, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<Review, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, AppError>;
    async fn list_by_clinic(&self, clinic_id: &str, status: &str) -> Result<Vec<Review>, AppError>;
    async fn list_by_status(&self, status: &str) -> Result<Vec<Review>, AppError>;
    async fn rating_summary(&self, clinic_id: &str) -> Result<RatingSummary, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait HoursRepository: Send + Sync {
    /// Replaces the full weekly schedule of a clinic in one transaction.
    async fn replace_weekly(&self, clinic_id: &str, hours: &[WeeklyHours]) -> Result<(), AppError>;
    async fn list_weekly(&self, clinic_id: &str) -> Result<Vec<WeeklyHours>, AppError>;

    async fn upsert_override(&self, entity: &DateOverride) -> Result<DateOverride, AppError>;
    async fn find_override_by_date(&self, clinic_id: &str, date: NaiveDate) -> Result<Option<DateOverride>, AppError>;
    async fn list_overrides_by_range(&self, clinic_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<DateOverride>, AppError>;
    async fn delete_override(&self, clinic_id: &str, date: NaiveDate) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn list_jobs(&self) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &AdminUser) -> Result<AdminUser, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<AdminUser>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Resolves a street address to coordinates. `Ok(None)` means the
    /// geocoder answered but found no match.
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, AppError>;
}
