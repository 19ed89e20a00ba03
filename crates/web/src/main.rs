use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use storage::blob::{BlobStore, S3BlobStore};
use storage::repository::{
    ApplicationRepository, CriteriaRepository, IdentityRepository, JudgeRepository,
    ProjectRepository, ScoreRepository,
};
use storage::services::{
    ApplicationRecordManager, CriteriaRegistry, JudgeIdentityBinder, ScoringEngine,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use middleware::auth::{GatewayKeys, require_identity};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::applications::handlers::create_application,
        features::applications::handlers::get_application,
        features::applications::handlers::list_applications,
        features::applications::handlers::update_application,
        features::applications::handlers::confirm_application,
        features::applications::handlers::resume_url,
        features::judging::handlers::create_judge,
        features::judging::handlers::attach_judge,
        features::judging::handlers::submit_score,
        features::judging::handlers::update_score,
        features::judging::handlers::list_scores,
        features::judging::handlers::get_score,
        features::judging::handlers::get_criteria,
        features::judging::handlers::create_criteria,
        features::judging::handlers::project_scores,
    ),
    components(
        schemas(
            storage::dto::application::CreateApplicationRequest,
            storage::dto::application::UpdateApplicationRequest,
            storage::dto::application::ConfirmApplicationRequest,
            storage::dto::application::ApplicationResponse,
            storage::dto::application::ResumeUrlResponse,
            storage::dto::judging::CreateJudgeRequest,
            storage::dto::judging::JudgeResponse,
            storage::dto::judging::AttachJudgeRequest,
            storage::dto::judging::SubmitScoreRequest,
            storage::dto::judging::UpdateScoreRequest,
            storage::dto::judging::ScoreResponse,
            storage::dto::judging::CreateCriteriaRequest,
            storage::dto::judging::CriteriaResponse,
            storage::dto::judging::ProjectScoresResponse,
            storage::blob::SignedUrl,
            storage::models::Application,
            storage::models::ApplicationStatus,
            storage::models::Identity,
            storage::models::Role,
            storage::models::Judge,
            storage::models::Project,
            storage::models::CriteriaSet,
            storage::models::Criterion,
            storage::models::Score,
        )
    ),
    tags(
        (name = "applications", description = "Participant application lifecycle"),
        (name = "judging", description = "Judge binding, criteria, and scoring"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "gateway_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Gateway Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting HarborHacks API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let aws_config = aws_config::load_from_env().await;
    let s3 = aws_sdk_s3::Client::new(&aws_config);
    let blobs: Arc<dyn BlobStore> = Arc::new(S3BlobStore::new(
        s3,
        config.resume_bucket.clone(),
        Duration::from_secs(config.blob_op_timeout_secs),
    ));
    tracing::info!("Resume blob store ready (bucket: {})", config.resume_bucket);

    let pool = db.pool().clone();
    let application_repo = Arc::new(ApplicationRepository::new(pool.clone()));
    let identity_repo = Arc::new(IdentityRepository::new(pool.clone()));
    let judge_repo = Arc::new(JudgeRepository::new(pool.clone()));
    let project_repo = Arc::new(ProjectRepository::new(pool.clone()));
    let criteria_repo = Arc::new(CriteriaRepository::new(pool.clone()));
    let score_repo = Arc::new(ScoreRepository::new(pool));

    let app_state = AppState {
        applications: Arc::new(ApplicationRecordManager::new(
            application_repo,
            blobs,
            config.resume_url_ttl_minutes,
        )),
        judging: Arc::new(JudgeIdentityBinder::new(judge_repo.clone(), identity_repo)),
        criteria: Arc::new(CriteriaRegistry::new(criteria_repo.clone())),
        scoring: Arc::new(ScoringEngine::new(
            score_repo,
            judge_repo,
            project_repo,
            criteria_repo,
        )),
    };

    let gateway_keys = GatewayKeys::from_comma_separated(&config.gateway_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .nest("/application", features::applications::routes::routes())
        .nest("/judging", features::judging::routes::routes())
        .nest("/admin/judging", features::judging::routes::admin_routes())
        .layer(axum::middleware::from_fn_with_state(
            gateway_keys,
            require_identity,
        ));

    let app = Router::new()
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(app_state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
