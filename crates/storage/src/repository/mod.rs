pub mod application;
pub mod criteria;
pub mod identity;
pub mod judge;
pub mod memory;
pub mod project;
pub mod score;

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::dto::application::{ApplicationChanges, NewApplication};
use crate::dto::judging::{NewPlaceholderIdentity, NewScore};
use crate::error::Result;
use crate::models::{
    Application, ApplicationStatus, CriteriaSet, Criterion, Identity, Judge, Project, Score,
};

pub use application::ApplicationRepository;
pub use criteria::CriteriaRepository;
pub use identity::IdentityRepository;
pub use judge::JudgeRepository;
pub use memory::{MemoryBlobStore, MemoryStore};
pub use project::ProjectRepository;
pub use score::ScoreRepository;

/// Store ports. Services receive these as `Arc<dyn …>` capabilities so the
/// same logic runs against Postgres in production and the in-memory backend
/// in tests.
#[async_trait::async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, new: NewApplication) -> Result<Application>;

    async fn find_by_id(&self, id: Uuid) -> Result<Application>;

    async fn find_by_identity_and_year(
        &self,
        identity_id: Uuid,
        year: i32,
    ) -> Result<Option<Application>>;

    async fn list_for_identity(&self, identity_id: Uuid) -> Result<Vec<Application>>;

    async fn update(&self, id: Uuid, changes: &ApplicationChanges) -> Result<Application>;

    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application>;
}

#[async_trait::async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Identity>;

    async fn create_placeholder(&self, new: NewPlaceholderIdentity) -> Result<Identity>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait::async_trait]
pub trait JudgeStore: Send + Sync {
    /// Bind a judge to an existing identity.
    async fn insert(
        &self,
        identity_id: Uuid,
        tracks: Vec<String>,
        access_code: String,
    ) -> Result<Judge>;

    /// Create a placeholder identity and its judge as one unit; neither row
    /// exists unless both do.
    async fn insert_with_placeholder(
        &self,
        placeholder: NewPlaceholderIdentity,
        tracks: Vec<String>,
        access_code: String,
    ) -> Result<Judge>;

    async fn find_by_identity(&self, identity_id: Uuid) -> Result<Option<Judge>>;

    async fn find_by_access_code(&self, access_code: &str) -> Result<Judge>;

    /// Repoint the judge at a new identity and consume the access code in
    /// the same durable write.
    async fn repoint_identity(&self, judge_id: Uuid, identity_id: Uuid) -> Result<Judge>;
}

#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Project>;
}

#[async_trait::async_trait]
pub trait CriteriaStore: Send + Sync {
    async fn insert(
        &self,
        year: i32,
        event: String,
        criteria: BTreeMap<String, Criterion>,
    ) -> Result<CriteriaSet>;

    async fn find(&self, year: i32, event: &str) -> Result<Option<CriteriaSet>>;
}

#[async_trait::async_trait]
pub trait ScoreStore: Send + Sync {
    async fn insert(&self, new: NewScore) -> Result<Score>;

    async fn find_by_id(&self, id: Uuid) -> Result<Score>;

    async fn find_by_judge_and_project(
        &self,
        judge_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<Score>>;

    async fn list_by_judge(&self, judge_id: Uuid) -> Result<Vec<Score>>;

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Score>>;

    async fn update_data(
        &self,
        id: Uuid,
        score_data: BTreeMap<String, f64>,
        total_score: f64,
    ) -> Result<Score>;
}
