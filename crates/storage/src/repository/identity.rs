use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::judging::NewPlaceholderIdentity;
use crate::error::{Result, StorageError};
use crate::models::Identity;

use super::IdentityStore;

const IDENTITY_COLUMNS: &str =
    "identity_id, email, first_name, last_name, role, is_placeholder, created_at";

pub struct IdentityRepository {
    pool: PgPool,
}

impl IdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IdentityStore for IdentityRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Identity> {
        let query = format!("SELECT {IDENTITY_COLUMNS} FROM identities WHERE identity_id = $1");

        sqlx::query_as::<_, Identity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn create_placeholder(&self, new: NewPlaceholderIdentity) -> Result<Identity> {
        let query = format!(
            r#"
            INSERT INTO identities (email, first_name, last_name, role, is_placeholder)
            VALUES ($1, $2, $3, 'USER', TRUE)
            RETURNING {IDENTITY_COLUMNS}
            "#
        );

        let identity = sqlx::query_as::<_, Identity>(&query)
            .bind(&new.email)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .fetch_one(&self.pool)
            .await?;

        Ok(identity)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM identities WHERE identity_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
