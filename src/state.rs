use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, ClinicRepository, DentistRepository, EmailService,
    GeocodingService, HoursRepository, JobRepository, LocationRepository,
    ReviewRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub location_repo: Arc<dyn LocationRepository>,
    pub clinic_repo: Arc<dyn ClinicRepository>,
    pub dentist_repo: Arc<dyn DentistRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,
    pub hours_repo: Arc<dyn HoursRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub geocoding_service: Arc<dyn GeocodingService>,
    pub templates: Arc<Tera>,
}
