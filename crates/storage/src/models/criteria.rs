use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Event name used when callers do not specify one.
pub const DEFAULT_EVENT: &str = "HarborHacks";

/// One weighted judging dimension. Weights are not required to sum to any
/// particular total across a set, so total scores are only comparable
/// within a single criteria set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Criterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaSet {
    pub criteria_id: Uuid,
    pub criteria_year: i32,
    pub event: String,
    #[schema(value_type = Object)]
    pub criteria: sqlx::types::Json<BTreeMap<String, Criterion>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
