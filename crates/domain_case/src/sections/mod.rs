//! Section records
//!
//! Each case is split into ten sections. Every section is stored as an
//! optional, independently validated sub-object. This module holds the
//! section identifiers, the shared validation plumbing, and the
//! [`SectionPayload`] envelope used to move one section between the API,
//! the aggregate, and storage.
//!
//! # Validation
//!
//! Validation runs in two passes:
//! 1. Field constraints declared with `#[derive(Validate)]` (lengths, ranges,
//!    email format, nested records). Free text must not be whitespace only.
//! 2. Conditional rules from [`SectionRecord::check_rules`], most notably the
//!    "Other" rule: an `xOther` free-text field is required when the
//!    enumerated field `x` is `other`, and rejected otherwise.
//!
//! Both passes report errors against camelCase field paths
//! (`injuries[0].painScale`) so a form can show them inline.

pub mod claimant;
pub mod accident;
pub mod physical;
pub mod psychological;
pub mod treatment;
pub mod lifestyle;
pub mod family;
pub mod work;
pub mod prognosis;
pub mod expert;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CaseError;

pub use claimant::{ClaimantDetails, Gender, IdentificationType};
pub use accident::{AccidentDetails, AccidentType, ClaimantPosition};
pub use physical::{BodyRegion, Injury, InjurySeverity, PhysicalInjury};
pub use psychological::{PsychologicalCondition, PsychologicalConditionKind, PsychologicalInjuries};
pub use treatment::{Treatment, TreatmentType, Treatments};
pub use lifestyle::{Activity, AffectedActivity, ImpactLevel, LifestyleImpact};
pub use family::{FamilyHistory, MaritalStatus};
pub use work::{EmploymentStatus, WorkHistory};
pub use prognosis::{Outlook, Prognosis};
pub use expert::ExpertDetails;

/// Identifier of a case section
///
/// The declaration order is the registry order used for navigation,
/// progress display, and the report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionId {
    #[serde(alias = "claimant_details")]
    ClaimantDetails,
    #[serde(alias = "accident_details")]
    AccidentDetails,
    #[serde(alias = "physical_injury")]
    PhysicalInjury,
    #[serde(alias = "psychological_injuries")]
    PsychologicalInjuries,
    Treatments,
    #[serde(alias = "lifestyle_impact")]
    LifestyleImpact,
    #[serde(alias = "family_history")]
    FamilyHistory,
    #[serde(alias = "work_history")]
    WorkHistory,
    Prognosis,
    #[serde(alias = "expert_details")]
    ExpertDetails,
}

impl SectionId {
    /// All section identifiers in registry order
    pub const ALL: [SectionId; 10] = [
        SectionId::ClaimantDetails,
        SectionId::AccidentDetails,
        SectionId::PhysicalInjury,
        SectionId::PsychologicalInjuries,
        SectionId::Treatments,
        SectionId::LifestyleImpact,
        SectionId::FamilyHistory,
        SectionId::WorkHistory,
        SectionId::Prognosis,
        SectionId::ExpertDetails,
    ];

    /// The camelCase identifier used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::ClaimantDetails => "claimantDetails",
            SectionId::AccidentDetails => "accidentDetails",
            SectionId::PhysicalInjury => "physicalInjury",
            SectionId::PsychologicalInjuries => "psychologicalInjuries",
            SectionId::Treatments => "treatments",
            SectionId::LifestyleImpact => "lifestyleImpact",
            SectionId::FamilyHistory => "familyHistory",
            SectionId::WorkHistory => "workHistory",
            SectionId::Prognosis => "prognosis",
            SectionId::ExpertDetails => "expertDetails",
        }
    }

    /// The snake_case name, used for storage column names
    pub fn column_name(&self) -> &'static str {
        match self {
            SectionId::ClaimantDetails => "claimant_details",
            SectionId::AccidentDetails => "accident_details",
            SectionId::PhysicalInjury => "physical_injury",
            SectionId::PsychologicalInjuries => "psychological_injuries",
            SectionId::Treatments => "treatments",
            SectionId::LifestyleImpact => "lifestyle_impact",
            SectionId::FamilyHistory => "family_history",
            SectionId::WorkHistory => "work_history",
            SectionId::Prognosis => "prognosis",
            SectionId::ExpertDetails => "expert_details",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s || id.column_name() == s)
            .ok_or_else(|| CaseError::UnknownSection(s.to_string()))
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// camelCase path of the offending field, e.g. `injuries[0].painScale`
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating one section record
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Creates an empty (valid) report
    pub fn ok() -> Self {
        Self::default()
    }

    /// Records an error against a field path
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Whether no errors were recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The recorded errors, in discovery order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Consumes the report, yielding its errors
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Appends every error from a derive-based validation run
    pub fn absorb(&mut self, errors: &ValidationErrors) {
        collect_errors("", errors, &mut self.errors);
    }
}

fn collect_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    // HashMap iteration order is unstable; sort so reports are deterministic.
    let mut entries: Vec<_> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (camel_case(&field.to_string()), kind))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, kind) in entries {
        let path = join_path(prefix, &field);
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' validation", error.code));
                    out.push(FieldError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

pub(crate) fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

pub(crate) fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Returns true when an optional text field holds a non-blank value
pub fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Rejects text that holds only whitespace
///
/// Empty strings are left to the field's `length` rule so each field reports
/// a single error.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// `lower_back` -> `Lower back`
pub fn sentence_case(s: &str) -> String {
    let spaced = s.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Enumerations carrying an `Other` option that unlocks a free-text field
pub trait OtherOption {
    fn is_other(&self) -> bool;
}

macro_rules! impl_other_option {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::sections::OtherOption for $ty {
                fn is_other(&self) -> bool {
                    matches!(self, Self::Other)
                }
            }
        )*
    };
}
pub(crate) use impl_other_option;

/// Applies the "Other" rule to an enumerated field and its free-text partner
///
/// `field` is the camelCase path of the enumerated field; the free-text
/// partner is reported as `{field}Other`.
pub fn check_other<E: OtherOption>(
    report: &mut ValidationReport,
    field: &str,
    selected: Option<&E>,
    other_text: &Option<String>,
) {
    let other_field = format!("{}Other", field);
    let is_other = selected.is_some_and(|s| s.is_other());

    if is_other && other_text.is_none() {
        report.add_error(other_field, "required when 'other' is selected");
    } else if !is_other && other_text.is_some() {
        report.add_error(other_field, "only allowed when 'other' is selected");
    }
}

/// Behaviour shared by every section sub-object
pub trait SectionRecord: Validate + Serialize + DeserializeOwned + Clone {
    /// The section this record belongs to
    const SECTION: SectionId;

    /// Conditional rules the derive-based constraints cannot express
    fn check_rules(&self, _report: &mut ValidationReport) {}

    /// Runs both validation passes
    fn validation_report(&self) -> ValidationReport {
        let mut report = ValidationReport::ok();
        if let Err(errors) = Validate::validate(self) {
            report.absorb(&errors);
        }
        self.check_rules(&mut report);
        report
    }
}

/// One section's sub-object, tagged with the section it belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum SectionPayload {
    ClaimantDetails(ClaimantDetails),
    AccidentDetails(AccidentDetails),
    PhysicalInjury(PhysicalInjury),
    PsychologicalInjuries(PsychologicalInjuries),
    Treatments(Treatments),
    LifestyleImpact(LifestyleImpact),
    FamilyHistory(FamilyHistory),
    WorkHistory(WorkHistory),
    Prognosis(Prognosis),
    ExpertDetails(ExpertDetails),
}

fn decode<T: SectionRecord>(value: serde_json::Value) -> Result<T, CaseError> {
    serde_json::from_value(value).map_err(|e| CaseError::MalformedPayload {
        section: T::SECTION,
        message: e.to_string(),
    })
}

impl SectionPayload {
    /// Decodes a JSON document into the typed record for `section`
    ///
    /// # Errors
    ///
    /// Returns `CaseError::MalformedPayload` when the document does not match
    /// the section's shape (unknown fields, wrong types, unknown enum values).
    pub fn from_json(section: SectionId, value: serde_json::Value) -> Result<Self, CaseError> {
        Ok(match section {
            SectionId::ClaimantDetails => SectionPayload::ClaimantDetails(decode(value)?),
            SectionId::AccidentDetails => SectionPayload::AccidentDetails(decode(value)?),
            SectionId::PhysicalInjury => SectionPayload::PhysicalInjury(decode(value)?),
            SectionId::PsychologicalInjuries => {
                SectionPayload::PsychologicalInjuries(decode(value)?)
            }
            SectionId::Treatments => SectionPayload::Treatments(decode(value)?),
            SectionId::LifestyleImpact => SectionPayload::LifestyleImpact(decode(value)?),
            SectionId::FamilyHistory => SectionPayload::FamilyHistory(decode(value)?),
            SectionId::WorkHistory => SectionPayload::WorkHistory(decode(value)?),
            SectionId::Prognosis => SectionPayload::Prognosis(decode(value)?),
            SectionId::ExpertDetails => SectionPayload::ExpertDetails(decode(value)?),
        })
    }

    /// The section this payload belongs to
    pub fn section_id(&self) -> SectionId {
        match self {
            SectionPayload::ClaimantDetails(_) => SectionId::ClaimantDetails,
            SectionPayload::AccidentDetails(_) => SectionId::AccidentDetails,
            SectionPayload::PhysicalInjury(_) => SectionId::PhysicalInjury,
            SectionPayload::PsychologicalInjuries(_) => SectionId::PsychologicalInjuries,
            SectionPayload::Treatments(_) => SectionId::Treatments,
            SectionPayload::LifestyleImpact(_) => SectionId::LifestyleImpact,
            SectionPayload::FamilyHistory(_) => SectionId::FamilyHistory,
            SectionPayload::WorkHistory(_) => SectionId::WorkHistory,
            SectionPayload::Prognosis(_) => SectionId::Prognosis,
            SectionPayload::ExpertDetails(_) => SectionId::ExpertDetails,
        }
    }

    /// Validates the payload
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Validation` carrying every field error found.
    pub fn validate(&self) -> Result<(), CaseError> {
        let report = match self {
            SectionPayload::ClaimantDetails(r) => r.validation_report(),
            SectionPayload::AccidentDetails(r) => r.validation_report(),
            SectionPayload::PhysicalInjury(r) => r.validation_report(),
            SectionPayload::PsychologicalInjuries(r) => r.validation_report(),
            SectionPayload::Treatments(r) => r.validation_report(),
            SectionPayload::LifestyleImpact(r) => r.validation_report(),
            SectionPayload::FamilyHistory(r) => r.validation_report(),
            SectionPayload::WorkHistory(r) => r.validation_report(),
            SectionPayload::Prognosis(r) => r.validation_report(),
            SectionPayload::ExpertDetails(r) => r.validation_report(),
        };

        if report.is_valid() {
            Ok(())
        } else {
            Err(CaseError::Validation {
                section: self.section_id(),
                errors: report.into_errors(),
            })
        }
    }

    /// Encodes the payload as a JSON document
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            SectionPayload::ClaimantDetails(r) => serde_json::to_value(r),
            SectionPayload::AccidentDetails(r) => serde_json::to_value(r),
            SectionPayload::PhysicalInjury(r) => serde_json::to_value(r),
            SectionPayload::PsychologicalInjuries(r) => serde_json::to_value(r),
            SectionPayload::Treatments(r) => serde_json::to_value(r),
            SectionPayload::LifestyleImpact(r) => serde_json::to_value(r),
            SectionPayload::FamilyHistory(r) => serde_json::to_value(r),
            SectionPayload::WorkHistory(r) => serde_json::to_value(r),
            SectionPayload::Prognosis(r) => serde_json::to_value(r),
            SectionPayload::ExpertDetails(r) => serde_json::to_value(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_round_trips_through_str() {
        for id in SectionId::ALL {
            assert_eq!(id.as_str().parse::<SectionId>().unwrap(), id);
            assert_eq!(id.column_name().parse::<SectionId>().unwrap(), id);
        }
    }

    #[test]
    fn test_section_id_serde_uses_camel_case() {
        let json = serde_json::to_string(&SectionId::PsychologicalInjuries).unwrap();
        assert_eq!(json, "\"psychologicalInjuries\"");
        let parsed: SectionId = serde_json::from_str("\"work_history\"").unwrap();
        assert_eq!(parsed, SectionId::WorkHistory);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(matches!(
            "billing".parse::<SectionId>(),
            Err(CaseError::UnknownSection(_))
        ));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("pain_scale"), "painScale");
        assert_eq!(camel_case("full_name"), "fullName");
        assert_eq!(camel_case("injuries"), "injuries");
    }

    #[test]
    fn test_present_treats_blank_as_absent() {
        assert!(!present(&None));
        assert!(!present(&Some("   ".to_string())));
        assert!(present(&Some("Jane".to_string())));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Jane").is_ok());
        assert!(not_blank("").is_ok());
        assert!(not_blank(" \t\n").is_err());
    }

    #[test]
    fn test_blank_text_fails_validation() {
        let value = serde_json::json!({ "fullName": "   ", "occupation": "  " });
        let payload = SectionPayload::from_json(SectionId::ClaimantDetails, value).unwrap();
        match payload.validate() {
            Err(CaseError::Validation { errors, .. }) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["fullName", "occupation"]);
                assert!(errors.iter().all(|e| e.message == "must not be blank"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let value = serde_json::json!({ "fullName": "Jane Doe", "shoeSize": 7 });
        let result = SectionPayload::from_json(SectionId::ClaimantDetails, value);
        assert!(matches!(
            result,
            Err(CaseError::MalformedPayload { section: SectionId::ClaimantDetails, .. })
        ));
    }
}
