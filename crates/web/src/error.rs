use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors. Storage errors carry the business taxonomy; the rest
/// cover transport concerns (auth headers, multipart decoding).
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::InvalidStateTransition(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::CriteriaNotSet) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::Dependency(_)) => StatusCode::BAD_GATEWAY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        let body = match &self {
            Self::Storage(StorageError::Validation(failure)) => {
                let mut body = json!({
                    "error": "validation_error",
                    "message": failure.message,
                });
                if !failure.invalid.is_empty() {
                    body["invalidCriteria"] = json!(failure.invalid);
                }
                if !failure.missing.is_empty() {
                    body["missingCriteria"] = json!(failure.missing);
                }
                body
            }
            Self::Storage(StorageError::InvalidStateTransition(msg)) => {
                json!({
                    "error": "invalid_state_transition",
                    "message": msg
                })
            }
            Self::Storage(StorageError::Forbidden(msg)) => {
                json!({
                    "error": "forbidden",
                    "message": msg
                })
            }
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "not_found",
                    "message": "Resource not found"
                })
            }
            Self::Storage(e @ StorageError::CriteriaNotSet) => {
                json!({
                    "error": "criteria_not_set",
                    "message": e.to_string()
                })
            }
            Self::Storage(StorageError::Conflict(kind)) => {
                json!({
                    "error": "conflict",
                    "message": kind.to_string()
                })
            }
            Self::Storage(StorageError::Dependency(msg)) => {
                tracing::error!("Blob store failure: {}", msg);
                json!({
                    "error": "dependency_failure",
                    "message": "A required storage dependency is unavailable"
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "validation_error",
                    "message": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": "validation_error",
                    "message": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "unauthorized",
                    "message": "A verified identity is required"
                })
            }
            Self::Forbidden(msg) => {
                json!({
                    "error": "forbidden",
                    "message": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}
