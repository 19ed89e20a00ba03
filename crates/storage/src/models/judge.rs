use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A judging identity. `identity_id` may point at a placeholder identity
/// until the judge is claimed with the access code; `code_consumed` flips
/// once the claim succeeds so the code cannot be replayed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Judge {
    pub judge_id: Uuid,
    pub identity_id: Uuid,
    pub tracks: Vec<String>,
    pub access_code: String,
    pub code_consumed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
