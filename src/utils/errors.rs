//! Application error handling
//!
//! Defines the error taxonomy of the service and its conversion to
//! HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Top-level application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Destroy refused because the company still has live applications.
    /// This is a base-level failure, not tied to any single field.
    #[error("Destroy blocked: {0}")]
    DestroyBlocked(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Error response body for the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                log::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                log::warn!("Validation error: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                },
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    details: None,
                    code: Some("CONFLICT".to_string()),
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: Some("BAD_REQUEST".to_string()),
                },
            ),

            AppError::DestroyBlocked(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Destroy Blocked".to_string(),
                    message: msg,
                    details: None,
                    code: Some("DESTROY_BLOCKED".to_string()),
                },
            ),

            AppError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }

            AppError::ExternalApi(msg) => {
                log::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message: "An error occurred while communicating with external service"
                            .to_string(),
                        details: Some(json!({ "external_api_error": msg })),
                        code: Some("EXTERNAL_API_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Typed result for fallible operations
pub type AppResult<T> = Result<T, AppError>;

/// Build a field-scoped validation failure with an explicit error code.
///
/// Used for failures that come from domain rules rather than the derive
/// macro, e.g. the two calendar-identifier sub-kinds ("invalid" and
/// "invalid_characters").
pub fn field_error(field: &'static str, code: &'static str, message: &str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Helper for resource-not-found errors
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Helper for uniqueness conflicts
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Helper for the destroy guard
pub fn destroy_blocked_error() -> AppError {
    AppError::DestroyBlocked(
        "Company cannot be deleted while it has applications from current or former members"
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_carries_code_and_field() {
        let err = field_error("external_calendar_id", "invalid_characters", "bad key");
        match err {
            AppError::Validation(errors) => {
                let field_errors = errors.field_errors();
                let entries = field_errors
                    .get("external_calendar_id")
                    .expect("field should be present");
                assert_eq!(entries[0].code, "invalid_characters");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_conflict_error_message() {
        let err = conflict_error("Company", "company_number", "5560360793");
        assert!(err
            .to_string()
            .contains("Company with company_number '5560360793' already exists"));
    }
}
