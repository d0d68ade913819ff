//! Custom Test Assertions
//!
//! Assertion helpers for cases, validation errors and suggestions that
//! give more meaningful failure messages than standard assertions.

use core_kernel::PortError;
use domain_case::{completion, registry, Case, CaseError, SectionId, Severity, Suggestion};

/// Asserts that a case's stored percentage matches a fresh recomputation
pub fn assert_completion_consistent(case: &Case) {
    let expected = completion::calculate(case);
    assert_eq!(
        case.completion_percentage(),
        expected,
        "Stored completion {}% differs from recomputed {}% for case {}",
        case.completion_percentage(),
        expected,
        case.case_number
    );
}

/// Asserts that a section satisfies its completeness predicate
pub fn assert_section_complete(case: &Case, section: SectionId) {
    assert!(
        registry::is_section_complete(case, section),
        "Expected section {} to be complete",
        section
    );
}

/// Asserts that a section does not satisfy its completeness predicate
pub fn assert_section_incomplete(case: &Case, section: SectionId) {
    assert!(
        !registry::is_section_complete(case, section),
        "Expected section {} to be incomplete",
        section
    );
}

/// Asserts that a validation error reports the given field path
pub fn assert_field_error(error: &CaseError, field: &str) {
    let fields: Vec<&str> = error.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert!(
        fields.contains(&field),
        "Expected a validation error on '{}', got {:?} ({})",
        field,
        fields,
        error
    );
}

/// Asserts that a suggestion with the given code was produced
pub fn assert_has_suggestion<'a>(suggestions: &'a [Suggestion], code: &str) -> &'a Suggestion {
    suggestions
        .iter()
        .find(|s| s.code == code)
        .unwrap_or_else(|| {
            let codes: Vec<&str> = suggestions.iter().map(|s| s.code).collect();
            panic!("Expected suggestion '{}', got {:?}", code, codes)
        })
}

/// Asserts that no suggestion with the given code was produced
pub fn assert_no_suggestion(suggestions: &[Suggestion], code: &str) {
    assert!(
        suggestions.iter().all(|s| s.code != code),
        "Did not expect suggestion '{}'",
        code
    );
}

/// Asserts that no suggestion reaches the given severity
pub fn assert_no_suggestions_at(suggestions: &[Suggestion], severity: Severity) {
    let offending: Vec<&str> = suggestions
        .iter()
        .filter(|s| s.severity >= severity)
        .map(|s| s.code)
        .collect();
    assert!(
        offending.is_empty(),
        "Expected no suggestions at {} or above, got {:?}",
        severity,
        offending
    );
}

/// Asserts that a port error is a conflict
pub fn assert_conflict(error: &PortError) {
    assert!(
        matches!(error, PortError::Conflict { .. }),
        "Expected a conflict, got {:?}",
        error
    );
}
