use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Judging criteria not set for this year")]
    CriteriaNotSet,

    #[error("{0}")]
    Conflict(ConflictKind),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(ValidationFailure),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Blob store failure: {0}")]
    Dependency(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        StorageError::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        StorageError::Validation(ValidationFailure::message(message))
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DuplicateApplication,
    AlreadySubmitted,
    AccessCodeConsumed,
    JudgeAlreadyBound,
    CriteriaExists,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ConflictKind::DuplicateApplication => {
                "An application already exists for this identity and year"
            }
            ConflictKind::AlreadySubmitted => "A score for this project has already been submitted",
            ConflictKind::AccessCodeConsumed => "This access code has already been used",
            ConflictKind::JudgeAlreadyBound => "This identity is already bound to a judge",
            ConflictKind::CriteriaExists => "Judging criteria for this year already exist",
        };
        f.write_str(message)
    }
}

/// Field-level validation failure. `invalid` and `missing` carry the
/// offending and absent key lists for criteria mismatches; both are empty
/// for plain message-only failures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationFailure {
    pub message: String,
    pub invalid: Vec<String>,
    pub missing: Vec<String>,
}

impl ValidationFailure {
    pub fn message(message: impl Into<String>) -> Self {
        ValidationFailure {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn criteria_mismatch(invalid: Vec<String>, missing: Vec<String>) -> Self {
        ValidationFailure {
            message: "Submitted scores do not match the judging criteria".to_string(),
            invalid,
            missing,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self.invalid.is_empty() {
            write!(f, "; invalid: {}", self.invalid.join(", "))?;
        }
        if !self.missing.is_empty() {
            write!(f, "; missing: {}", self.missing.join(", "))?;
        }
        Ok(())
    }
}
