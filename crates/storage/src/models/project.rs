use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Submitted hackathon project. Owned by the submission system; scoring
/// only resolves it to find the criteria set for its year and event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: Uuid,
    pub name: String,
    pub project_year: i32,
    pub event: String,
    pub track: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
