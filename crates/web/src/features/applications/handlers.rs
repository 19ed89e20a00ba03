use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::dto::application::{
    ApplicationResponse, ConfirmApplicationRequest, CreateApplicationRequest, ResumeUrlResponse,
    UpdateApplicationRequest,
};
use storage::models::Actor;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::{form, services};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ApplicationListQuery {
    pub identity_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/application",
    request_body(content = CreateApplicationRequest, content_type = "multipart/form-data"),
    security(("gateway_auth" = [])),
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "An application already exists for this year"),
        (status = 502, description = "Resume storage unavailable")
    ),
    tag = "applications"
)]
pub async fn create_application(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let form = form::read_form(multipart).await?;
    let request: CreateApplicationRequest = form::decode(form.fields)?;
    request.validate()?;

    let application = services::create_application(&state, actor, request, form.resume).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            message: "Application submitted".to_string(),
            application,
        }),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/application/{id}",
    params(("id" = Uuid, Path, description = "Application id")),
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Application found", body = ApplicationResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Application not found")
    ),
    tag = "applications"
)]
pub async fn get_application(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let application = services::get_application(&state, actor, id).await?;

    Ok(Json(ApplicationResponse {
        message: "Application found".to_string(),
        application,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/application",
    params(ApplicationListQuery),
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Applications for the identity"),
        (status = 403, description = "Not the owner")
    ),
    tag = "applications"
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Response, WebError> {
    let identity_id = query.identity_id.unwrap_or(actor.id);
    let applications = services::list_applications(&state, actor, identity_id).await?;

    Ok(Json(applications).into_response())
}

#[utoipa::path(
    put,
    path = "/application/{id}",
    params(("id" = Uuid, Path, description = "Application id")),
    request_body(content = UpdateApplicationRequest, content_type = "multipart/form-data"),
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Application not found")
    ),
    tag = "applications"
)]
pub async fn update_application(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let form = form::read_form(multipart).await?;
    let request: UpdateApplicationRequest = form::decode(form.fields)?;
    request.validate()?;

    let application = services::update_application(&state, actor, id, request, form.resume).await?;

    Ok(Json(ApplicationResponse {
        message: "Application updated".to_string(),
        application,
    })
    .into_response())
}

#[utoipa::path(
    put,
    path = "/application/{id}/confirm",
    params(("id" = Uuid, Path, description = "Application id")),
    request_body = ConfirmApplicationRequest,
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Decision recorded", body = ApplicationResponse),
        (status = 400, description = "Not an accepted application"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Application not found")
    ),
    tag = "applications"
)]
pub async fn confirm_application(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<ConfirmApplicationRequest>,
) -> Result<Response, WebError> {
    let application = services::confirm_application(&state, actor, id, request).await?;

    Ok(Json(ApplicationResponse {
        message: "Decision recorded".to_string(),
        application,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/application/{id}/resume/url",
    params(("id" = Uuid, Path, description = "Application id")),
    security(("gateway_auth" = [])),
    responses(
        (status = 200, description = "Short-lived resume URL", body = ResumeUrlResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No resume attached")
    ),
    tag = "applications"
)]
pub async fn resume_url(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let signed = services::resume_url(&state, actor, id).await?;

    Ok(Json(ResumeUrlResponse::from(signed)).into_response())
}
