use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{CriteriaSet, Criterion, Judge, Score};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJudgeRequest {
    pub identity_id: Option<Uuid>,
    pub tracks: Option<Vec<String>>,
}

/// Judge creation result. The access code is only surfaced when a
/// placeholder identity was created, for out-of-band distribution.
#[derive(Debug, Clone)]
pub struct CreatedJudge {
    pub judge: Judge,
    pub access_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JudgeResponse {
    pub message: String,
    pub judge: Judge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachJudgeRequest {
    #[serde(rename = "access_code")]
    pub access_code: String,
    pub identity_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub project_id: Uuid,
    #[schema(value_type = Object)]
    pub score_data: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    #[schema(value_type = Object)]
    pub score_data: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub message: String,
    pub score: Score,
    pub total_score: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCriteriaRequest {
    pub year: i32,
    pub event: Option<String>,
    #[schema(value_type = Object)]
    pub criteria: BTreeMap<String, Criterion>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaResponse {
    pub message: String,
    pub criteria_set: CriteriaSet,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CriteriaQuery {
    pub year: Option<i32>,
    pub event: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScoresResponse {
    pub scores: Vec<Score>,
    pub average_score: f64,
    pub number_of_judges: usize,
}

#[derive(Debug, Clone)]
pub struct NewScore {
    pub judge_id: Uuid,
    pub project_id: Uuid,
    pub score_data: BTreeMap<String, f64>,
    pub total_score: f64,
}

/// Placeholder identity values created alongside an unclaimed judge.
#[derive(Debug, Clone)]
pub struct NewPlaceholderIdentity {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
