// src/application/error_handling.rs
//
// Error Handling for Callers
//
// ARCHITECTURE:
// - Maps internal errors → caller-facing responses
// - Provides a consistent error format at the boundary
// - Carries every validation message, in rule order
// - Logs unexpected errors for debugging

use log::error;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    /// Individual validation messages; empty for non-validation errors
    pub errors: Vec<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invariant violations (422)
    Validation,

    /// Stale write lost against a concurrent update (409)
    Conflict,

    /// Media storage or file system failure (500)
    Storage,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound(message) => Self::new(ErrorType::NotFound, message),

            AppError::Domain(domain_error) => {
                let errors = domain_error
                    .errors()
                    .into_iter()
                    .map(|e| e.message)
                    .collect();
                let message = match domain_error {
                    DomainError::Notification { message, .. } => message,
                    DomainError::Validation(error) => error.message,
                };
                Self {
                    success: false,
                    error_type: ErrorType::Validation,
                    message,
                    errors,
                }
            }

            AppError::Conflict(message) => Self::new(ErrorType::Conflict, message),

            AppError::Storage(message) => {
                error!("Storage error: {}", message);
                Self::new(ErrorType::Storage, "Media storage operation failed")
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Storage, "File system operation failed")
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed")
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message)
            }
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource))
    }

    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            errors: Vec::new(),
        }
    }
}

/// Helper trait to convert Results to a serialized ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response)
                .unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, Notification, ThrowsValidationHandler, ValidationHandler};

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::not_found("Video", "v1"));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Video with ID v1 was not found");
        assert!(error.errors.is_empty());
    }

    #[test]
    fn test_notification_keeps_every_message() {
        let mut notification = Notification::create();
        notification.push("'name' should not be null");
        notification.push("'type' should not be null");
        let domain_error = notification
            .into_result("Failed to validate Aggregate CastMember")
            .unwrap_err();

        let response = ErrorResponse::from_app_error(domain_error.into());
        assert_eq!(response.error_type, ErrorType::Validation);
        assert_eq!(response.message, "Failed to validate Aggregate CastMember");
        assert_eq!(
            response.errors,
            vec!["'name' should not be null", "'type' should not be null"]
        );
    }

    #[test]
    fn test_fail_fast_error_is_single_message() {
        let mut handler = ThrowsValidationHandler;
        let domain_error = handler
            .append(Error::new("'title' should not be empty"))
            .unwrap_err();

        let response = ErrorResponse::from_app_error(AppError::Domain(domain_error));
        assert_eq!(response.message, "'title' should not be empty");
        assert_eq!(response.errors, vec!["'title' should not be empty"]);
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let response =
            ErrorResponse::from_app_error(AppError::Storage("/var/secret/path".to_string()));
        assert_eq!(response.error_type, ErrorType::Storage);
        assert!(!response.message.contains("secret"));
    }

    #[test]
    fn test_serialization() {
        let result: Result<(), AppError> = Err(AppError::Conflict("stale".to_string()));
        let json = result.to_error_response().unwrap_err();
        assert!(json.contains("\"error_type\":\"conflict\""));
        assert!(json.contains("\"success\":false"));
    }
}
