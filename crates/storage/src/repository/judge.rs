use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::judging::NewPlaceholderIdentity;
use crate::error::{Result, StorageError};
use crate::models::Judge;

use super::JudgeStore;

const JUDGE_COLUMNS: &str =
    "judge_id, identity_id, tracks, access_code, code_consumed, created_at";

pub struct JudgeRepository {
    pool: PgPool,
}

impl JudgeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl JudgeStore for JudgeRepository {
    async fn insert(
        &self,
        identity_id: Uuid,
        tracks: Vec<String>,
        access_code: String,
    ) -> Result<Judge> {
        let query = format!(
            r#"
            INSERT INTO judges (identity_id, tracks, access_code)
            VALUES ($1, $2, $3)
            RETURNING {JUDGE_COLUMNS}
            "#
        );

        let judge = sqlx::query_as::<_, Judge>(&query)
            .bind(identity_id)
            .bind(&tracks)
            .bind(&access_code)
            .fetch_one(&self.pool)
            .await?;

        Ok(judge)
    }

    async fn insert_with_placeholder(
        &self,
        placeholder: NewPlaceholderIdentity,
        tracks: Vec<String>,
        access_code: String,
    ) -> Result<Judge> {
        let mut tx = self.pool.begin().await?;

        let identity_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO identities (email, first_name, last_name, role, is_placeholder)
            VALUES ($1, $2, $3, 'USER', TRUE)
            RETURNING identity_id
            "#,
        )
        .bind(&placeholder.email)
        .bind(&placeholder.first_name)
        .bind(&placeholder.last_name)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            r#"
            INSERT INTO judges (identity_id, tracks, access_code)
            VALUES ($1, $2, $3)
            RETURNING {JUDGE_COLUMNS}
            "#
        );

        let judge = sqlx::query_as::<_, Judge>(&query)
            .bind(identity_id)
            .bind(&tracks)
            .bind(&access_code)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(judge)
    }

    async fn find_by_identity(&self, identity_id: Uuid) -> Result<Option<Judge>> {
        let query = format!("SELECT {JUDGE_COLUMNS} FROM judges WHERE identity_id = $1");

        let judge = sqlx::query_as::<_, Judge>(&query)
            .bind(identity_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(judge)
    }

    async fn find_by_access_code(&self, access_code: &str) -> Result<Judge> {
        let query = format!("SELECT {JUDGE_COLUMNS} FROM judges WHERE access_code = $1");

        sqlx::query_as::<_, Judge>(&query)
            .bind(access_code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn repoint_identity(&self, judge_id: Uuid, identity_id: Uuid) -> Result<Judge> {
        let query = format!(
            r#"
            UPDATE judges
            SET identity_id = $2, code_consumed = TRUE
            WHERE judge_id = $1
            RETURNING {JUDGE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Judge>(&query)
            .bind(judge_id)
            .bind(identity_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }
}
