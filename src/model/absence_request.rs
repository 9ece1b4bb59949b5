use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Stored as the literal strings `Pending` / `Approved` / `Rejected`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AbsenceRequest {
    #[schema(example = 7)]
    pub id: u64,

    #[schema(example = 42)]
    pub user_id: u64,

    #[schema(example = "Medical appointment")]
    pub reason: String,

    /// Inclusive range, `start_date <= end_date` (validated on create).
    #[schema(example = "2026-01-12", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2026-01-14", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "Pending")]
    pub status: AbsenceStatus,

    #[schema(example = "2026-01-10T09:00:00Z", value_type = Option<String>, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AbsenceRequest {
    /// True when `day` falls inside the request's inclusive range.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}
