use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A Malaysian state (Selangor, Penang, ...). Top level of the directory tree.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct StateRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl StateRecord {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            created_at: Utc::now(),
        }
    }
}

/// Result of forward-geocoding a street address.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A town or suburb within a state.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Area {
    pub id: String,
    pub state_id: String,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Area {
    pub fn new(state_id: String, name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            state_id,
            name,
            slug,
            created_at: Utc::now(),
        }
    }
}
