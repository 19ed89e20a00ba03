use std::sync::Arc;

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::blob::{BlobStore, SignedUrl};
use crate::dto::application::{
    ApplicationChanges, CreateApplicationRequest, ResumeUpload, UpdateApplicationRequest,
    UpdateVariant,
};
use crate::error::{ConflictKind, Result, StorageError};
use crate::models::{Actor, Application, ApplicationStatus};
use crate::repository::ApplicationStore;

const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_RESUME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Owns the application state machine and the resume saga. The relational
/// row is the source of truth: a resume blob is uploaded before the row
/// that references it is written, and a failed write triggers a best-effort
/// delete of the fresh blob. Cleanup failures are logged, never surfaced.
pub struct ApplicationRecordManager {
    applications: Arc<dyn ApplicationStore>,
    blobs: Arc<dyn BlobStore>,
    resume_ttl_minutes: i64,
}

impl ApplicationRecordManager {
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        blobs: Arc<dyn BlobStore>,
        resume_ttl_minutes: i64,
    ) -> Self {
        Self {
            applications,
            blobs,
            resume_ttl_minutes,
        }
    }

    pub async fn create(
        &self,
        actor: Actor,
        request: CreateApplicationRequest,
        resume: Option<ResumeUpload>,
    ) -> Result<Application> {
        let current_year = Utc::now().year();
        if request.application_year != current_year {
            return Err(StorageError::validation(format!(
                "Applications are only open for {current_year}"
            )));
        }

        if self
            .applications
            .find_by_identity_and_year(actor.id, request.application_year)
            .await?
            .is_some()
        {
            return Err(StorageError::Conflict(ConflictKind::DuplicateApplication));
        }

        if let Some(resume) = &resume {
            validate_resume(resume)?;
        }

        let resume_path = match &resume {
            Some(resume) => {
                let path = resume_blob_path(actor.id, &resume.file_name);
                Some(
                    self.blobs
                        .upload(&path, &resume.content_type, resume.data.clone())
                        .await?,
                )
            }
            None => None,
        };

        match self
            .applications
            .insert(request.into_new(actor.id, resume_path.clone()))
            .await
        {
            Ok(application) => Ok(application),
            Err(e) => {
                if let Some(path) = &resume_path {
                    if let Err(cleanup) = self.blobs.delete(path).await {
                        tracing::warn!(
                            "failed to delete orphaned resume blob {path}: {cleanup}"
                        );
                    }
                }
                if e.is_unique_violation() {
                    Err(StorageError::Conflict(ConflictKind::DuplicateApplication))
                } else {
                    Err(e)
                }
            }
        }
    }

    pub async fn update(
        &self,
        actor: Actor,
        id: Uuid,
        request: UpdateApplicationRequest,
        resume: Option<ResumeUpload>,
    ) -> Result<Application> {
        let existing = self.applications.find_by_id(id).await?;

        let variant = if actor.is_admin() {
            UpdateVariant::Admin
        } else {
            UpdateVariant::SelfService
        };
        if variant == UpdateVariant::SelfService && !existing.owned_by(actor.id) {
            return Err(StorageError::forbidden(
                "You can only update your own application",
            ));
        }

        request.validate_for(variant).map_err(StorageError::Validation)?;

        if let Some(next) = request.status {
            if next != existing.status && !existing.status.can_transition_to(next) {
                return Err(StorageError::InvalidStateTransition(format!(
                    "cannot move an application from {} to {}",
                    existing.status, next
                )));
            }
        }

        if let Some(resume) = &resume {
            validate_resume(resume)?;
        }

        let new_path = match &resume {
            Some(resume) => {
                let path = resume_blob_path(existing.identity_id, &resume.file_name);
                Some(
                    self.blobs
                        .upload(&path, &resume.content_type, resume.data.clone())
                        .await?,
                )
            }
            None => None,
        };

        let changes: ApplicationChanges = request.into_changes(new_path.clone());

        match self.applications.update(id, &changes).await {
            Ok(updated) => {
                // The old blob is only unreferenced once the row commit
                // succeeded; losing the delete leaves a transient orphan.
                if new_path.is_some() {
                    if let Some(old_path) = &existing.resume_path {
                        if Some(old_path) != new_path.as_ref() {
                            if let Err(cleanup) = self.blobs.delete(old_path).await {
                                tracing::warn!(
                                    "failed to delete replaced resume blob {old_path}: {cleanup}"
                                );
                            }
                        }
                    }
                }
                Ok(updated)
            }
            Err(e) => {
                if let Some(path) = &new_path {
                    if let Err(cleanup) = self.blobs.delete(path).await {
                        tracing::warn!(
                            "failed to delete orphaned resume blob {path}: {cleanup}"
                        );
                    }
                }
                Err(e)
            }
        }
    }

    pub async fn confirm_or_decline(
        &self,
        actor: Actor,
        id: Uuid,
        decision: ApplicationStatus,
    ) -> Result<Application> {
        let existing = self.applications.find_by_id(id).await?;
        if !existing.owned_by(actor.id) {
            return Err(StorageError::forbidden(
                "Only the applicant can confirm or decline",
            ));
        }

        if !decision.is_decision() {
            return Err(StorageError::validation(
                "Decision must be CONFIRMED or DECLINED",
            ));
        }

        if !existing.status.can_transition_to(decision) {
            return Err(StorageError::InvalidStateTransition(format!(
                "only an ACCEPTED application can be confirmed or declined, found {}",
                existing.status
            )));
        }

        self.applications.set_status(id, decision).await
    }

    pub async fn temporary_resume_url(&self, actor: Actor, id: Uuid) -> Result<SignedUrl> {
        let existing = self.applications.find_by_id(id).await?;
        if !existing.owned_by(actor.id) && !actor.is_admin() {
            return Err(StorageError::forbidden(
                "You can only access your own resume",
            ));
        }

        let path = existing.resume_path.as_deref().ok_or(StorageError::NotFound)?;
        self.blobs
            .sign_temporary_url(path, self.resume_ttl_minutes)
            .await
    }

    pub async fn get(&self, actor: Actor, id: Uuid) -> Result<Application> {
        let existing = self.applications.find_by_id(id).await?;
        if !existing.owned_by(actor.id) && !actor.is_admin() {
            return Err(StorageError::forbidden(
                "You can only view your own application",
            ));
        }
        Ok(existing)
    }

    pub async fn list_for_identity(
        &self,
        actor: Actor,
        identity_id: Uuid,
    ) -> Result<Vec<Application>> {
        if actor.id != identity_id && !actor.is_admin() {
            return Err(StorageError::forbidden(
                "You can only list your own applications",
            ));
        }
        self.applications.list_for_identity(identity_id).await
    }
}

fn validate_resume(resume: &ResumeUpload) -> Result<()> {
    if !ALLOWED_RESUME_TYPES.contains(&resume.content_type.as_str()) {
        return Err(StorageError::validation(
            "Resume must be a PDF or Word document",
        ));
    }
    if resume.data.len() > MAX_RESUME_BYTES {
        return Err(StorageError::validation("Resume must be 10MB or smaller"));
    }
    Ok(())
}

fn resume_blob_path(identity_id: Uuid, file_name: &str) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("resumes/{identity_id}/{}-{sanitized}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: &str, len: usize) -> ResumeUpload {
        ResumeUpload {
            file_name: "resume.pdf".to_string(),
            content_type: content_type.to_string(),
            data: vec![0u8; len],
        }
    }

    #[test]
    fn accepts_pdf_and_word_documents() {
        assert!(validate_resume(&upload("application/pdf", 128)).is_ok());
        assert!(validate_resume(&upload("application/msword", 128)).is_ok());
        assert!(
            validate_resume(&upload(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                128
            ))
            .is_ok()
        );
    }

    #[test]
    fn rejects_other_content_types() {
        assert!(validate_resume(&upload("image/png", 128)).is_err());
        assert!(validate_resume(&upload("text/plain", 128)).is_err());
    }

    #[test]
    fn rejects_files_over_ten_megabytes() {
        assert!(validate_resume(&upload("application/pdf", MAX_RESUME_BYTES)).is_ok());
        assert!(validate_resume(&upload("application/pdf", MAX_RESUME_BYTES + 1)).is_err());
    }

    #[test]
    fn blob_paths_strip_unsafe_characters() {
        let identity = Uuid::new_v4();
        let path = resume_blob_path(identity, "my resume (final).pdf");
        assert!(path.starts_with(&format!("resumes/{identity}/")));
        assert!(path.ends_with("my_resume__final_.pdf"));
    }
}
