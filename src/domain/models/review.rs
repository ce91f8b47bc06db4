use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Review {
    pub id: String,
    pub clinic_id: String,
    pub author_name: String,
    pub rating: i32,
    pub body: String,
    pub status: String, // "PENDING" | "APPROVED" | "REJECTED"
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(clinic_id: String, author_name: String, rating: i32, body: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            clinic_id,
            author_name,
            rating,
            body,
            status: "PENDING".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Aggregate over a clinic's approved reviews.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct RatingSummary {
    pub average_rating: Option<f64>,
    pub review_count: i64,
}
