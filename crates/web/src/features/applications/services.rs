use storage::blob::SignedUrl;
use storage::dto::application::{
    ConfirmApplicationRequest, CreateApplicationRequest, ResumeUpload, UpdateApplicationRequest,
};
use storage::error::Result;
use storage::models::{Actor, Application};
use uuid::Uuid;

use crate::state::AppState;

pub async fn create_application(
    state: &AppState,
    actor: Actor,
    request: CreateApplicationRequest,
    resume: Option<ResumeUpload>,
) -> Result<Application> {
    state.applications.create(actor, request, resume).await
}

pub async fn get_application(state: &AppState, actor: Actor, id: Uuid) -> Result<Application> {
    state.applications.get(actor, id).await
}

pub async fn list_applications(
    state: &AppState,
    actor: Actor,
    identity_id: Uuid,
) -> Result<Vec<Application>> {
    state.applications.list_for_identity(actor, identity_id).await
}

pub async fn update_application(
    state: &AppState,
    actor: Actor,
    id: Uuid,
    request: UpdateApplicationRequest,
    resume: Option<ResumeUpload>,
) -> Result<Application> {
    state.applications.update(actor, id, request, resume).await
}

pub async fn confirm_application(
    state: &AppState,
    actor: Actor,
    id: Uuid,
    request: ConfirmApplicationRequest,
) -> Result<Application> {
    state
        .applications
        .confirm_or_decline(actor, id, request.status)
        .await
}

pub async fn resume_url(state: &AppState, actor: Actor, id: Uuid) -> Result<SignedUrl> {
    state.applications.temporary_resume_url(actor, id).await
}
