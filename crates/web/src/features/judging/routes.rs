use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth::require_admin;
use crate::state::AppState;

use super::handlers::{
    attach_judge, create_criteria, create_judge, get_criteria, get_score, list_scores,
    project_scores, submit_score, update_score,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/createjudge", post(create_judge))
        .route("/attachjudge", post(attach_judge))
        .route("/score", post(submit_score).get(list_scores))
        .route("/score/:score_id", put(update_score).get(get_score))
        .route("/criteria", get(get_criteria))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/criteria", post(create_criteria))
        .route("/score/project/:project_id", get(project_scores))
        .route_layer(middleware::from_fn(require_admin))
}
