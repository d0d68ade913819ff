//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;
use domain_case::{CaseError, FieldError, ValidationReport};
use interface_report::ExportError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },
}

impl ApiError {
    /// A validation error without field details
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Wraps the errors of a derive-based validation run on a request body
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let mut report = ValidationReport::ok();
        report.absorb(&errors);
        ApiError::Validation {
            message: "Request validation failed".to_string(),
            details: report.into_errors(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_type, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg, None),
            ApiError::BadRequest(msg) => ("bad_request", msg, None),
            ApiError::Unauthorized => ("unauthorized", "Unauthorized".to_string(), None),
            ApiError::Conflict(msg) => ("conflict", msg, None),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Internal error while handling request");
                ("internal_error", "An internal error occurred".to_string(), None)
            }
            ApiError::Storage(msg) => {
                error!(error = %msg, "Storage error while handling request");
                ("storage_error", "The case could not be saved or loaded".to_string(), None)
            }
            ApiError::Validation { message, details } => {
                let details = (!details.is_empty()).then_some(details);
                ("validation_error", message, details)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{} not found", entity_type))
            }
            PortError::Validation { message, field } => ApiError::Validation {
                details: field
                    .map(|field| {
                        vec![FieldError {
                            field,
                            message: message.clone(),
                        }]
                    })
                    .unwrap_or_default(),
                message,
            },
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Connection { message, .. } => ApiError::Storage(message),
            PortError::Transformation { message } | PortError::Internal { message, .. } => {
                ApiError::Internal(message)
            }
        }
    }
}

impl From<CaseError> for ApiError {
    fn from(err: CaseError) -> Self {
        match err {
            CaseError::Validation { section, errors } => ApiError::Validation {
                message: format!("The {} section has invalid fields", section),
                details: errors,
            },
            CaseError::MalformedPayload { .. } => ApiError::validation(err.to_string()),
            CaseError::InvalidCaseNumber(ref reason) => ApiError::Validation {
                message: err.to_string(),
                details: vec![FieldError {
                    field: "caseNumber".to_string(),
                    message: reason.clone(),
                }],
            },
            CaseError::UnknownSection(_) => ApiError::NotFound(err.to_string()),
            CaseError::InvalidStatusTransition { .. } | CaseError::CaseArchived(_) => {
                ApiError::Conflict(err.to_string())
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_case::{CaseStatus, SectionId};

    #[test]
    fn test_port_errors_map_to_status_codes() {
        let cases = [
            (PortError::not_found("Case", "x"), StatusCode::NOT_FOUND),
            (PortError::validation("bad"), StatusCode::UNPROCESSABLE_ENTITY),
            (PortError::conflict("taken"), StatusCode::CONFLICT),
            (PortError::connection("down"), StatusCode::INTERNAL_SERVER_ERROR),
            (PortError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (port_error, expected) in cases {
            assert_eq!(ApiError::from(port_error).status_code(), expected);
        }
    }

    #[test]
    fn test_field_validation_keeps_field() {
        let err = ApiError::from(PortError::validation_field("too long", "fullName"));
        match err {
            ApiError::Validation { details, .. } => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "fullName");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_case_validation_carries_every_field() {
        let err = ApiError::from(CaseError::Validation {
            section: SectionId::PhysicalInjury,
            errors: vec![
                FieldError {
                    field: "injuries[0].painScale".to_string(),
                    message: "must be between 0 and 10".to_string(),
                },
                FieldError {
                    field: "injuries[0].bodyRegionOther".to_string(),
                    message: "required when bodyRegion is other".to_string(),
                },
            ],
        });

        match err {
            ApiError::Validation { details, .. } => assert_eq!(details.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_lifecycle_errors_are_conflicts() {
        let err = ApiError::from(CaseError::InvalidStatusTransition {
            from: CaseStatus::Completed,
            to: CaseStatus::Completed,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ApiError::from(CaseError::UnknownSection("vitals".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
