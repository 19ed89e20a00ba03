use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{CriteriaSet, Criterion};

use super::CriteriaStore;

const CRITERIA_COLUMNS: &str = "criteria_id, criteria_year, event, criteria, created_at";

pub struct CriteriaRepository {
    pool: PgPool,
}

impl CriteriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CriteriaStore for CriteriaRepository {
    async fn insert(
        &self,
        year: i32,
        event: String,
        criteria: BTreeMap<String, Criterion>,
    ) -> Result<CriteriaSet> {
        let query = format!(
            r#"
            INSERT INTO judging_criteria (criteria_year, event, criteria)
            VALUES ($1, $2, $3)
            RETURNING {CRITERIA_COLUMNS}
            "#
        );

        let set = sqlx::query_as::<_, CriteriaSet>(&query)
            .bind(year)
            .bind(&event)
            .bind(sqlx::types::Json(criteria))
            .fetch_one(&self.pool)
            .await?;

        Ok(set)
    }

    async fn find(&self, year: i32, event: &str) -> Result<Option<CriteriaSet>> {
        let query = format!(
            "SELECT {CRITERIA_COLUMNS} FROM judging_criteria \
             WHERE criteria_year = $1 AND event = $2"
        );

        let set = sqlx::query_as::<_, CriteriaSet>(&query)
            .bind(year)
            .bind(event)
            .fetch_optional(&self.pool)
            .await?;

        Ok(set)
    }
}
