use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Stored as the literal strings `Present` / `Late` / `Absent`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
}

/// One attendance row. `check_out_time = NULL` means the session is still
/// open; records materialized from an approved absence carry NULL in both
/// time fields.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 42)]
    pub user_id: u64,

    /// Local calendar day the record applies to.
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "2026-01-05T08:55:00Z", value_type = Option<String>, format = "date-time")]
    pub check_in_time: Option<DateTime<Utc>>,

    #[schema(example = "2026-01-05T17:10:00Z", value_type = Option<String>, format = "date-time")]
    pub check_out_time: Option<DateTime<Utc>>,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,

    #[schema(example = "2026-01-05T08:55:00Z", value_type = Option<String>, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }
}
