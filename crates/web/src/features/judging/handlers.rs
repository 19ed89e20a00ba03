use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::judging::{
    AttachJudgeRequest, CreateCriteriaRequest, CreateJudgeRequest, CriteriaQuery,
    CriteriaResponse, JudgeResponse, ProjectScoresResponse, ScoreResponse, SubmitScoreRequest,
    UpdateScoreRequest,
};
use storage::models::{Actor, CriteriaSet, Score};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/judging/createjudge",
    request_body = CreateJudgeRequest,
    security(("gateway_auth" = [])),
    responses(
        (status = 201, description = "Judge created; the access code is only present for unclaimed judges", body = JudgeResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Identity not found"),
        (status = 409, description = "Identity already bound to a judge")
    ),
    tag = "judging"
)]
pub async fn create_judge(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateJudgeRequest>,
) -> Result<Response, WebError> {
    let created = services::create_judge(&state, actor, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(JudgeResponse {
            message: "Judge created".to_string(),
            judge: created.judge,
            access_code: created.access_code,
        }),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/judging/attachjudge",
    request_body = AttachJudgeRequest,
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Judge attached to the identity", body = JudgeResponse),
        (status = 403, description = "Codes can only be claimed for your own identity"),
        (status = 404, description = "Unknown access code"),
        (status = 409, description = "Access code already used")
    ),
    tag = "judging"
)]
pub async fn attach_judge(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<AttachJudgeRequest>,
) -> Result<Response, WebError> {
    let judge = services::attach_judge(&state, actor, request).await?;

    Ok(Json(JudgeResponse {
        message: "Judge attached".to_string(),
        judge,
        access_code: None,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/judging/score",
    request_body = SubmitScoreRequest,
    security(("gateway_auth" = [])),
    responses(
        (status = 201, description = "Score recorded", body = ScoreResponse),
        (status = 400, description = "Scores do not match the judging criteria"),
        (status = 403, description = "Caller is not a judge"),
        (status = 404, description = "Project or criteria not found"),
        (status = 409, description = "Score already submitted for this project")
    ),
    tag = "judging"
)]
pub async fn submit_score(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<SubmitScoreRequest>,
) -> Result<Response, WebError> {
    let score = services::submit_score(&state, actor, request).await?;
    let total_score = score.total_score;

    Ok((
        StatusCode::CREATED,
        Json(ScoreResponse {
            message: "Score recorded".to_string(),
            score,
            total_score,
        }),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/judging/score/{score_id}",
    params(("score_id" = Uuid, Path, description = "Score id")),
    request_body = UpdateScoreRequest,
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Score updated with a recomputed total", body = ScoreResponse),
        (status = 400, description = "Scores do not match the judging criteria"),
        (status = 403, description = "Not this judge's score"),
        (status = 404, description = "Score not found")
    ),
    tag = "judging"
)]
pub async fn update_score(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(score_id): Path<Uuid>,
    Json(request): Json<UpdateScoreRequest>,
) -> Result<Response, WebError> {
    let score = services::update_score(&state, actor, score_id, request).await?;
    let total_score = score.total_score;

    Ok(Json(ScoreResponse {
        message: "Score updated".to_string(),
        score,
        total_score,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/judging/score",
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "The acting judge's scores", body = Vec<Score>),
        (status = 403, description = "Caller is not a judge")
    ),
    tag = "judging"
)]
pub async fn list_scores(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Response, WebError> {
    let scores = services::list_scores(&state, actor).await?;

    Ok(Json(scores).into_response())
}

#[utoipa::path(
    get,
    path = "/judging/score/{score_id}",
    params(("score_id" = Uuid, Path, description = "Score id")),
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Score found", body = Score),
        (status = 403, description = "Not this judge's score"),
        (status = 404, description = "Score not found")
    ),
    tag = "judging"
)]
pub async fn get_score(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(score_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let score = services::get_score(&state, actor, score_id).await?;

    Ok(Json(score).into_response())
}

#[utoipa::path(
    get,
    path = "/judging/criteria",
    params(CriteriaQuery),
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Criteria set for the year and event", body = CriteriaSet),
        (status = 404, description = "No criteria registered for the key")
    ),
    tag = "judging"
)]
pub async fn get_criteria(
    State(state): State<AppState>,
    Query(query): Query<CriteriaQuery>,
) -> Result<Response, WebError> {
    let criteria_set = services::get_criteria(&state, query).await?;

    Ok(Json(criteria_set).into_response())
}

#[utoipa::path(
    post,
    path = "/admin/judging/criteria",
    request_body = CreateCriteriaRequest,
    security(("gateway_auth" = [])),
    responses(
        (status = 201, description = "Criteria set registered", body = CriteriaResponse),
        (status = 400, description = "Malformed criteria"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Criteria already exist for the year and event")
    ),
    tag = "judging"
)]
pub async fn create_criteria(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateCriteriaRequest>,
) -> Result<Response, WebError> {
    let criteria_set = services::create_criteria(&state, actor, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CriteriaResponse {
            message: "Criteria registered".to_string(),
            criteria_set,
        }),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/admin/judging/score/project/{project_id}",
    params(("project_id" = Uuid, Path, description = "Project id")),
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "All scores for the project with the average", body = ProjectScoresResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Project not found")
    ),
    tag = "judging"
)]
pub async fn project_scores(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(project_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let aggregate = services::project_scores(&state, actor, project_id).await?;

    Ok(Json(aggregate).into_response())
}
