use std::sync::Arc;

use uuid::Uuid;

use crate::dto::judging::{CreateJudgeRequest, CreatedJudge, NewPlaceholderIdentity};
use crate::error::{ConflictKind, Result, StorageError};
use crate::models::{Actor, Identity, Judge};
use crate::repository::{IdentityStore, JudgeStore};

const DEFAULT_TRACKS: &[&str] = &["all"];

const PLACEHOLDER_EMAIL_DOMAIN: &str = "placeholder.harborhacks.org";

/// Creates judges and reconciles them to real identities. A judge created
/// without an identity gets a placeholder row so its foreign key holds; the
/// claim flow repoints the judge durably, then cleans the placeholder up on
/// a best-effort basis.
pub struct JudgeIdentityBinder {
    judges: Arc<dyn JudgeStore>,
    identities: Arc<dyn IdentityStore>,
}

impl JudgeIdentityBinder {
    pub fn new(judges: Arc<dyn JudgeStore>, identities: Arc<dyn IdentityStore>) -> Self {
        Self { judges, identities }
    }

    pub async fn create_judge(
        &self,
        actor: Actor,
        request: CreateJudgeRequest,
    ) -> Result<CreatedJudge> {
        if !actor.is_admin() {
            return Err(StorageError::forbidden("Only admins can create judges"));
        }

        let access_code = generate_access_code();
        let tracks = request
            .tracks
            .unwrap_or_else(|| DEFAULT_TRACKS.iter().map(|t| t.to_string()).collect());

        match request.identity_id {
            Some(identity_id) => {
                self.identities.find_by_id(identity_id).await?;

                let judge = self
                    .judges
                    .insert(identity_id, tracks, access_code)
                    .await
                    .map_err(|e| {
                        if e.is_unique_violation() {
                            StorageError::Conflict(ConflictKind::JudgeAlreadyBound)
                        } else {
                            e
                        }
                    })?;

                Ok(CreatedJudge {
                    judge,
                    access_code: None,
                })
            }
            None => {
                let placeholder = NewPlaceholderIdentity {
                    email: format!("judge-{access_code}@{PLACEHOLDER_EMAIL_DOMAIN}"),
                    first_name: "Judge".to_string(),
                    last_name: access_code.clone(),
                };

                let judge = self
                    .judges
                    .insert_with_placeholder(placeholder, tracks, access_code.clone())
                    .await?;

                Ok(CreatedJudge {
                    judge,
                    access_code: Some(access_code),
                })
            }
        }
    }

    /// Claim a judge with its access code. Step one repoints the judge and
    /// consumes the code in a single durable write; step two deletes a
    /// leftover placeholder identity and is allowed to fail.
    pub async fn attach_judge_to_identity(
        &self,
        actor: Actor,
        access_code: &str,
        target_identity_id: Uuid,
    ) -> Result<Judge> {
        if actor.id != target_identity_id {
            return Err(StorageError::forbidden(
                "An access code can only be claimed for your own identity",
            ));
        }

        let judge = self.judges.find_by_access_code(access_code).await?;
        if judge.code_consumed {
            return Err(StorageError::Conflict(ConflictKind::AccessCodeConsumed));
        }

        self.identities.find_by_id(target_identity_id).await?;

        let previous: Option<Identity> = match self.identities.find_by_id(judge.identity_id).await
        {
            Ok(identity) => Some(identity),
            Err(StorageError::NotFound) => None,
            Err(e) => return Err(e),
        };

        let repointed = self
            .judges
            .repoint_identity(judge.judge_id, target_identity_id)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    StorageError::Conflict(ConflictKind::JudgeAlreadyBound)
                } else {
                    e
                }
            })?;

        if let Some(previous) = previous {
            if previous.is_placeholder && previous.identity_id != target_identity_id {
                if let Err(cleanup) = self.identities.delete(previous.identity_id).await {
                    tracing::error!(
                        "failed to delete placeholder identity {}: {cleanup}",
                        previous.identity_id
                    );
                }
            }
        }

        Ok(repointed)
    }
}

/// Eight lowercase hex characters, unique per judge via the access-code
/// column's constraint.
fn generate_access_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
