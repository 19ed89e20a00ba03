use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::handlers::{
    confirm_application, create_application, get_application, list_applications, resume_url,
    update_application,
};

// Headroom above the 10MB resume cap so multipart framing fits.
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_application).get(list_applications))
        .route("/:id", get(get_application).put(update_application))
        .route("/:id/confirm", put(confirm_application))
        .route("/:id/resume/url", get(resume_url))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
