use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::models::{
    clinic::Clinic,
    dentist::Dentist,
    hours::{DateOverride, OperatingStatus, WeeklyHours},
    location::{Area, StateRecord},
    review::Review,
};

#[derive(Serialize)]
pub struct StateDetailResponse {
    #[serde(flatten)]
    pub state: StateRecord,
    pub areas: Vec<Area>,
}

#[derive(Serialize)]
pub struct ClinicDetailResponse {
    #[serde(flatten)]
    pub clinic: Clinic,
    pub dentists: Vec<Dentist>,
}

#[derive(Serialize)]
pub struct HoursResponse {
    pub weekly: Vec<WeeklyHours>,
    pub overrides: Vec<DateOverride>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: OperatingStatus,
    pub checked_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}
