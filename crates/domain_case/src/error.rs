//! Case domain errors

use thiserror::Error;

use core_kernel::PortError;

use crate::case::CaseStatus;
use crate::sections::{FieldError, SectionId};

/// Errors that can occur in the case domain
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("Validation failed for section {section} ({} field errors)", .errors.len())]
    Validation {
        section: SectionId,
        errors: Vec<FieldError>,
    },

    #[error("Malformed {section} payload: {message}")]
    MalformedPayload { section: SectionId, message: String },

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: CaseStatus, to: CaseStatus },

    #[error("Case {0} is archived")]
    CaseArchived(String),

    #[error("Invalid case number: {0}")]
    InvalidCaseNumber(String),
}

impl CaseError {
    /// Field-level errors, when this is a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CaseError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl From<CaseError> for PortError {
    fn from(error: CaseError) -> Self {
        match &error {
            CaseError::Validation { errors, .. } => match errors.first() {
                Some(first) => PortError::validation_field(error.to_string(), first.field.clone()),
                None => PortError::validation(error.to_string()),
            },
            CaseError::MalformedPayload { .. }
            | CaseError::UnknownSection(_)
            | CaseError::InvalidCaseNumber(_) => PortError::validation(error.to_string()),
            CaseError::InvalidStatusTransition { .. } | CaseError::CaseArchived(_) => {
                PortError::conflict(error.to_string())
            }
        }
    }
}
