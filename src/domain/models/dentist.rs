use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Dentist {
    pub id: String,
    pub clinic_id: String,
    pub name: String,
    pub slug: String,
    pub qualifications: String,
    pub bio: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Dentist {
    pub fn new(clinic_id: String, name: String, slug: String, qualifications: String, bio: String, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            clinic_id,
            name,
            slug,
            qualifications,
            bio,
            image_url,
            created_at: Utc::now(),
        }
    }
}
