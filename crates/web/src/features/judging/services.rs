use storage::dto::judging::{
    AttachJudgeRequest, CreateCriteriaRequest, CreateJudgeRequest, CreatedJudge, CriteriaQuery,
    ProjectScoresResponse, SubmitScoreRequest, UpdateScoreRequest,
};
use storage::error::Result;
use storage::models::{Actor, CriteriaSet, Judge, Score};
use uuid::Uuid;

use crate::state::AppState;

pub async fn create_judge(
    state: &AppState,
    actor: Actor,
    request: CreateJudgeRequest,
) -> Result<CreatedJudge> {
    state.judging.create_judge(actor, request).await
}

pub async fn attach_judge(
    state: &AppState,
    actor: Actor,
    request: AttachJudgeRequest,
) -> Result<Judge> {
    state
        .judging
        .attach_judge_to_identity(actor, &request.access_code, request.identity_id)
        .await
}

pub async fn submit_score(
    state: &AppState,
    actor: Actor,
    request: SubmitScoreRequest,
) -> Result<Score> {
    state
        .scoring
        .submit(actor, request.project_id, request.score_data)
        .await
}

pub async fn update_score(
    state: &AppState,
    actor: Actor,
    score_id: Uuid,
    request: UpdateScoreRequest,
) -> Result<Score> {
    state
        .scoring
        .update(actor, score_id, request.score_data)
        .await
}

pub async fn list_scores(state: &AppState, actor: Actor) -> Result<Vec<Score>> {
    state.scoring.get_by_judge(actor).await
}

pub async fn get_score(state: &AppState, actor: Actor, score_id: Uuid) -> Result<Score> {
    state.scoring.get_by_id(actor, score_id).await
}

pub async fn get_criteria(state: &AppState, query: CriteriaQuery) -> Result<CriteriaSet> {
    state.criteria.get(query.year, query.event).await
}

pub async fn create_criteria(
    state: &AppState,
    actor: Actor,
    request: CreateCriteriaRequest,
) -> Result<CriteriaSet> {
    state
        .criteria
        .create(actor, request.year, request.event, request.criteria)
        .await
}

pub async fn project_scores(
    state: &AppState,
    actor: Actor,
    project_id: Uuid,
) -> Result<ProjectScoresResponse> {
    state.scoring.project_scores(actor, project_id).await
}
