use std::collections::BTreeMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::judging::NewScore;
use crate::error::{Result, StorageError};
use crate::models::Score;

use super::ScoreStore;

const SCORE_COLUMNS: &str =
    "score_id, judge_id, project_id, score_data, total_score, created_at, updated_at";

pub struct ScoreRepository {
    pool: PgPool,
}

impl ScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ScoreStore for ScoreRepository {
    async fn insert(&self, new: NewScore) -> Result<Score> {
        let query = format!(
            r#"
            INSERT INTO scores (judge_id, project_id, score_data, total_score)
            VALUES ($1, $2, $3, $4)
            RETURNING {SCORE_COLUMNS}
            "#
        );

        let score = sqlx::query_as::<_, Score>(&query)
            .bind(new.judge_id)
            .bind(new.project_id)
            .bind(sqlx::types::Json(new.score_data))
            .bind(new.total_score)
            .fetch_one(&self.pool)
            .await?;

        Ok(score)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Score> {
        let query = format!("SELECT {SCORE_COLUMNS} FROM scores WHERE score_id = $1");

        sqlx::query_as::<_, Score>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn find_by_judge_and_project(
        &self,
        judge_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<Score>> {
        let query =
            format!("SELECT {SCORE_COLUMNS} FROM scores WHERE judge_id = $1 AND project_id = $2");

        let score = sqlx::query_as::<_, Score>(&query)
            .bind(judge_id)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(score)
    }

    async fn list_by_judge(&self, judge_id: Uuid) -> Result<Vec<Score>> {
        let query = format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE judge_id = $1 ORDER BY created_at DESC"
        );

        let scores = sqlx::query_as::<_, Score>(&query)
            .bind(judge_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(scores)
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Score>> {
        let query = format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE project_id = $1 ORDER BY created_at DESC"
        );

        let scores = sqlx::query_as::<_, Score>(&query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(scores)
    }

    async fn update_data(
        &self,
        id: Uuid,
        score_data: BTreeMap<String, f64>,
        total_score: f64,
    ) -> Result<Score> {
        let query = format!(
            r#"
            UPDATE scores
            SET score_data = $2, total_score = $3, updated_at = now()
            WHERE score_id = $1
            RETURNING {SCORE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Score>(&query)
            .bind(id)
            .bind(sqlx::types::Json(score_data))
            .bind(total_score)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }
}
