use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateStateRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Deserialize)]
pub struct UpdateStateRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateAreaRequest {
    pub state_id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Deserialize)]
pub struct UpdateAreaRequest {
    pub state_id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateClinicRequest {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub state_id: String,
    pub area_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateClinicRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub state_id: Option<String>,
    pub area_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
}

/// Public listing submission; lands unapproved.
#[derive(Deserialize)]
pub struct SubmitClinicRequest {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub area_slug: String,
}

#[derive(Deserialize)]
pub struct CreateDentistRequest {
    pub name: String,
    pub slug: String,
    pub qualifications: String,
    pub bio: String,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateDentistRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub qualifications: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub author_name: String,
    pub rating: i32,
    pub body: String,
}

#[derive(Deserialize)]
pub struct ModerateReviewRequest {
    pub action: String, // "approve" | "reject"
}

#[derive(Deserialize)]
pub struct WeeklyHoursEntry {
    pub day_of_week: i32,
    pub open_time: String,
    pub close_time: String,
}

#[derive(Deserialize)]
pub struct ReplaceHoursRequest {
    pub hours: Vec<WeeklyHoursEntry>,
}

#[derive(Deserialize)]
pub struct DateOverrideRequest {
    pub date: NaiveDate,
    pub is_closed: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub note: Option<String>,
}
