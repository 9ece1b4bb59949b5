use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

/// Employee profile, read-only to the workflow core. Role decisions are
/// made from this row, not from the identity token alone.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Profile {
    #[schema(example = 42)]
    pub user_id: u64,

    #[schema(example = "Jane Doe")]
    pub full_name: String,

    #[schema(example = "jane.doe@company.com")]
    pub email: String,

    #[schema(example = "employee")]
    pub role: Role,
}
