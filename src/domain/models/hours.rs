use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A recurring weekly open shift. `day_of_week` is Monday-start (0 = Monday,
/// 6 = Sunday); a day may carry several rows (split shifts).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct WeeklyHours {
    pub id: String,
    pub clinic_id: String,
    pub day_of_week: i32,
    pub open_time: String,  // "HH:MM", 24-hour
    pub close_time: String, // "HH:MM", 24-hour
    pub created_at: DateTime<Utc>,
}

impl WeeklyHours {
    pub fn new(clinic_id: String, day_of_week: i32, open_time: String, close_time: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            clinic_id,
            day_of_week,
            open_time,
            close_time,
            created_at: Utc::now(),
        }
    }
}

/// A calendar-date exception taking precedence over weekly hours: either a
/// full closure or special open/close bounds for that date. At most one row
/// per (clinic, date); writes upsert.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct DateOverride {
    pub id: String,
    pub clinic_id: String,
    pub date: NaiveDate,
    pub is_closed: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DateOverride {
    pub fn new(clinic_id: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            clinic_id,
            date,
            is_closed: false,
            open_time: None,
            close_time: None,
            note: None,
            created_at: Utc::now(),
        }
    }
}

/// Display status of a clinic at a given instant.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OperatingStatus {
    Open,
    Closed,
    OpeningSoon,
    ClosingSoon,
}
