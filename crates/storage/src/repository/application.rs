use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application::{ApplicationChanges, NewApplication};
use crate::error::{Result, StorageError};
use crate::models::{Application, ApplicationStatus};

use super::ApplicationStore;

const APPLICATION_COLUMNS: &str = "application_id, identity_id, application_year, status, \
     resume_path, age, gender, pronouns, ethnicity, grad_year, phone_number, school, city, \
     state, country, education_level, major, diet, shirt_size, sleep, github, linkedin, \
     portfolio, motivation, created_at, updated_at";

pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ApplicationStore for ApplicationRepository {
    async fn insert(&self, new: NewApplication) -> Result<Application> {
        let query = format!(
            r#"
            INSERT INTO applications (
                identity_id, application_year, resume_path, age, gender, pronouns,
                ethnicity, grad_year, phone_number, school, city, state, country,
                education_level, major, diet, shirt_size, sleep, github, linkedin,
                portfolio, motivation
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22)
            RETURNING {APPLICATION_COLUMNS}
            "#
        );

        let application = sqlx::query_as::<_, Application>(&query)
            .bind(new.identity_id)
            .bind(new.application_year)
            .bind(&new.resume_path)
            .bind(new.age)
            .bind(&new.gender)
            .bind(&new.pronouns)
            .bind(&new.ethnicity)
            .bind(new.grad_year)
            .bind(&new.phone_number)
            .bind(&new.school)
            .bind(&new.city)
            .bind(&new.state)
            .bind(&new.country)
            .bind(&new.education_level)
            .bind(&new.major)
            .bind(&new.diet)
            .bind(&new.shirt_size)
            .bind(new.sleep)
            .bind(&new.github)
            .bind(&new.linkedin)
            .bind(&new.portfolio)
            .bind(&new.motivation)
            .fetch_one(&self.pool)
            .await?;

        Ok(application)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Application> {
        let query =
            format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE application_id = $1");

        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn find_by_identity_and_year(
        &self,
        identity_id: Uuid,
        year: i32,
    ) -> Result<Option<Application>> {
        let query = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE identity_id = $1 AND application_year = $2"
        );

        let application = sqlx::query_as::<_, Application>(&query)
            .bind(identity_id)
            .bind(year)
            .fetch_optional(&self.pool)
            .await?;

        Ok(application)
    }

    async fn list_for_identity(&self, identity_id: Uuid) -> Result<Vec<Application>> {
        let query = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE identity_id = $1 ORDER BY application_year DESC"
        );

        let applications = sqlx::query_as::<_, Application>(&query)
            .bind(identity_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(applications)
    }

    async fn update(&self, id: Uuid, changes: &ApplicationChanges) -> Result<Application> {
        let existing = self.find_by_id(id).await?;
        let merged = changes.apply(&existing);

        let query = format!(
            r#"
            UPDATE applications
            SET application_year = $2,
                status = $3,
                resume_path = $4,
                age = $5,
                gender = $6,
                pronouns = $7,
                ethnicity = $8,
                grad_year = $9,
                phone_number = $10,
                school = $11,
                city = $12,
                state = $13,
                country = $14,
                education_level = $15,
                major = $16,
                diet = $17,
                shirt_size = $18,
                sleep = $19,
                github = $20,
                linkedin = $21,
                portfolio = $22,
                motivation = $23,
                updated_at = now()
            WHERE application_id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(merged.application_year)
            .bind(merged.status)
            .bind(&merged.resume_path)
            .bind(merged.age)
            .bind(&merged.gender)
            .bind(&merged.pronouns)
            .bind(&merged.ethnicity)
            .bind(merged.grad_year)
            .bind(&merged.phone_number)
            .bind(&merged.school)
            .bind(&merged.city)
            .bind(&merged.state)
            .bind(&merged.country)
            .bind(&merged.education_level)
            .bind(&merged.major)
            .bind(&merged.diet)
            .bind(&merged.shirt_size)
            .bind(merged.sleep)
            .bind(&merged.github)
            .bind(&merged.linkedin)
            .bind(&merged.portfolio)
            .bind(&merged.motivation)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        let query = format!(
            r#"
            UPDATE applications
            SET status = $2, updated_at = now()
            WHERE application_id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }
}
