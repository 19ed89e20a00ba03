use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A judge's evaluation of one project: raw per-criterion values plus the
/// derived weighted total. One row per (judge, project).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub score_id: Uuid,
    pub judge_id: Uuid,
    pub project_id: Uuid,
    #[schema(value_type = Object)]
    pub score_data: sqlx::types::Json<BTreeMap<String, f64>>,
    pub total_score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
