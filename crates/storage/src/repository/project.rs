use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Project;

use super::ProjectStore;

pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectStore for ProjectRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Project> {
        sqlx::query_as::<_, Project>(
            "SELECT project_id, name, project_year, event, track, created_at \
             FROM projects WHERE project_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
