use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Clinic {
    pub id: String,
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
    /// Public submissions start unapproved and are hidden from listings.
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}
