use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::blob::SignedUrl;
use crate::error::ValidationFailure;
use crate::models::{Application, ApplicationStatus};

/// Raw bytes of an uploaded resume, as received from the multipart layer.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[validate(range(min = 13, max = 120))]
    pub age: i32,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub ethnicity: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub grad_year: i32,
    #[validate(length(min = 7, max = 20))]
    pub phone_number: String,
    #[validate(length(min = 1, max = 200))]
    pub school: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    pub state: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(length(min = 1, max = 100))]
    pub education_level: String,
    pub major: Option<String>,
    pub diet: Option<String>,
    pub shirt_size: Option<String>,
    pub sleep: Option<bool>,
    #[validate(url)]
    pub github: Option<String>,
    #[validate(url)]
    pub linkedin: Option<String>,
    #[validate(url)]
    pub portfolio: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub motivation: String,
    pub application_year: i32,
}

impl CreateApplicationRequest {
    pub fn into_new(self, identity_id: Uuid, resume_path: Option<String>) -> NewApplication {
        NewApplication {
            identity_id,
            application_year: self.application_year,
            resume_path,
            age: self.age,
            gender: self.gender,
            pronouns: self.pronouns,
            ethnicity: self.ethnicity,
            grad_year: self.grad_year,
            phone_number: self.phone_number,
            school: self.school,
            city: self.city,
            state: self.state,
            country: self.country,
            education_level: self.education_level,
            major: self.major,
            diet: self.diet,
            shirt_size: self.shirt_size,
            sleep: self.sleep,
            github: self.github,
            linkedin: self.linkedin,
            portfolio: self.portfolio,
            motivation: self.motivation,
        }
    }
}

/// Which validation rules apply to an update: applicants may not touch the
/// status or application year; admins may set both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateVariant {
    SelfService,
    Admin,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[validate(range(min = 13, max = 120))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub ethnicity: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub grad_year: Option<i32>,
    #[validate(length(min = 7, max = 20))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub school: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    pub state: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub education_level: Option<String>,
    pub major: Option<String>,
    pub diet: Option<String>,
    pub shirt_size: Option<String>,
    pub sleep: Option<bool>,
    #[validate(url)]
    pub github: Option<String>,
    #[validate(url)]
    pub linkedin: Option<String>,
    #[validate(url)]
    pub portfolio: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub motivation: Option<String>,
    pub application_year: Option<i32>,
    pub status: Option<ApplicationStatus>,
}

impl UpdateApplicationRequest {
    /// Role-conditional field rules, chosen explicitly by the caller rather
    /// than by mutating shared validation state.
    pub fn validate_for(&self, variant: UpdateVariant) -> Result<(), ValidationFailure> {
        if variant == UpdateVariant::SelfService {
            if self.status.is_some() {
                return Err(ValidationFailure::message(
                    "Status cannot be changed directly; use the confirm endpoint",
                ));
            }
            if self.application_year.is_some() {
                return Err(ValidationFailure::message(
                    "The application year cannot be changed",
                ));
            }
        }
        Ok(())
    }

    pub fn into_changes(self, resume_path: Option<String>) -> ApplicationChanges {
        ApplicationChanges {
            resume_path,
            age: self.age,
            gender: self.gender,
            pronouns: self.pronouns,
            ethnicity: self.ethnicity,
            grad_year: self.grad_year,
            phone_number: self.phone_number,
            school: self.school,
            city: self.city,
            state: self.state,
            country: self.country,
            education_level: self.education_level,
            major: self.major,
            diet: self.diet,
            shirt_size: self.shirt_size,
            sleep: self.sleep,
            github: self.github,
            linkedin: self.linkedin,
            portfolio: self.portfolio,
            motivation: self.motivation,
            application_year: self.application_year,
            status: self.status,
        }
    }
}

/// Column values for a new application row.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub identity_id: Uuid,
    pub application_year: i32,
    pub resume_path: Option<String>,
    pub age: i32,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub ethnicity: Option<String>,
    pub grad_year: i32,
    pub phone_number: String,
    pub school: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub education_level: String,
    pub major: Option<String>,
    pub diet: Option<String>,
    pub shirt_size: Option<String>,
    pub sleep: Option<bool>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub motivation: String,
}

/// Partial update; `None` leaves the existing value in place. A new resume
/// path is only present when a replacement file was uploaded.
#[derive(Debug, Clone, Default)]
pub struct ApplicationChanges {
    pub resume_path: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub ethnicity: Option<String>,
    pub grad_year: Option<i32>,
    pub phone_number: Option<String>,
    pub school: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub education_level: Option<String>,
    pub major: Option<String>,
    pub diet: Option<String>,
    pub shirt_size: Option<String>,
    pub sleep: Option<bool>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub motivation: Option<String>,
    pub application_year: Option<i32>,
    pub status: Option<ApplicationStatus>,
}

impl ApplicationChanges {
    /// Merge these changes over an existing row, producing the new values.
    pub fn apply(&self, existing: &Application) -> Application {
        let mut merged = existing.clone();
        if let Some(path) = &self.resume_path {
            merged.resume_path = Some(path.clone());
        }
        if let Some(age) = self.age {
            merged.age = age;
        }
        if let Some(gender) = &self.gender {
            merged.gender = Some(gender.clone());
        }
        if let Some(pronouns) = &self.pronouns {
            merged.pronouns = Some(pronouns.clone());
        }
        if let Some(ethnicity) = &self.ethnicity {
            merged.ethnicity = Some(ethnicity.clone());
        }
        if let Some(grad_year) = self.grad_year {
            merged.grad_year = grad_year;
        }
        if let Some(phone_number) = &self.phone_number {
            merged.phone_number = phone_number.clone();
        }
        if let Some(school) = &self.school {
            merged.school = school.clone();
        }
        if let Some(city) = &self.city {
            merged.city = city.clone();
        }
        if let Some(state) = &self.state {
            merged.state = Some(state.clone());
        }
        if let Some(country) = &self.country {
            merged.country = country.clone();
        }
        if let Some(education_level) = &self.education_level {
            merged.education_level = education_level.clone();
        }
        if let Some(major) = &self.major {
            merged.major = Some(major.clone());
        }
        if let Some(diet) = &self.diet {
            merged.diet = Some(diet.clone());
        }
        if let Some(shirt_size) = &self.shirt_size {
            merged.shirt_size = Some(shirt_size.clone());
        }
        if let Some(sleep) = self.sleep {
            merged.sleep = Some(sleep);
        }
        if let Some(github) = &self.github {
            merged.github = Some(github.clone());
        }
        if let Some(linkedin) = &self.linkedin {
            merged.linkedin = Some(linkedin.clone());
        }
        if let Some(portfolio) = &self.portfolio {
            merged.portfolio = Some(portfolio.clone());
        }
        if let Some(motivation) = &self.motivation {
            merged.motivation = motivation.clone();
        }
        if let Some(application_year) = self.application_year {
            merged.application_year = application_year;
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        merged
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConfirmApplicationRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub message: String,
    pub application: Application,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUrlResponse {
    pub resume_url: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub expires_in_minutes: i64,
}

impl From<SignedUrl> for ResumeUrlResponse {
    fn from(signed: SignedUrl) -> Self {
        ResumeUrlResponse {
            resume_url: signed.url,
            expires_at: signed.expires_at,
            expires_in_minutes: signed.expires_in_minutes,
        }
    }
}
