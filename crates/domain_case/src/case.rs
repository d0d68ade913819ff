//! Case aggregate

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use core_kernel::{CaseId, UserId};

use crate::completion;
use crate::error::CaseError;
use crate::sections::{
    AccidentDetails, ClaimantDetails, ExpertDetails, FamilyHistory, LifestyleImpact,
    PhysicalInjury, Prognosis, PsychologicalInjuries, SectionId, SectionPayload, Treatments,
    WorkHistory,
};

/// Case status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Sections are still being filled in
    InProgress,
    /// Finalized by the author
    Completed,
    /// Retained for reference, read-only
    Archived,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::InProgress => "in_progress",
            CaseStatus::Completed => "completed",
            CaseStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(CaseStatus::InProgress),
            "completed" => Ok(CaseStatus::Completed),
            "archived" => Ok(CaseStatus::Archived),
            other => Err(format!("unknown case status '{}'", other)),
        }
    }
}

/// The per-section sub-objects of a case; any of them may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSections {
    #[serde(default)]
    pub claimant_details: Option<ClaimantDetails>,
    #[serde(default)]
    pub accident_details: Option<AccidentDetails>,
    #[serde(default)]
    pub physical_injury: Option<PhysicalInjury>,
    #[serde(default)]
    pub psychological_injuries: Option<PsychologicalInjuries>,
    #[serde(default)]
    pub treatments: Option<Treatments>,
    #[serde(default)]
    pub lifestyle_impact: Option<LifestyleImpact>,
    #[serde(default)]
    pub family_history: Option<FamilyHistory>,
    #[serde(default)]
    pub work_history: Option<WorkHistory>,
    #[serde(default)]
    pub prognosis: Option<Prognosis>,
    #[serde(default)]
    pub expert_details: Option<ExpertDetails>,
}

impl CaseSections {
    /// Replaces the sub-object addressed by the payload
    pub fn set(&mut self, payload: SectionPayload) {
        match payload {
            SectionPayload::ClaimantDetails(r) => self.claimant_details = Some(r),
            SectionPayload::AccidentDetails(r) => self.accident_details = Some(r),
            SectionPayload::PhysicalInjury(r) => self.physical_injury = Some(r),
            SectionPayload::PsychologicalInjuries(r) => self.psychological_injuries = Some(r),
            SectionPayload::Treatments(r) => self.treatments = Some(r),
            SectionPayload::LifestyleImpact(r) => self.lifestyle_impact = Some(r),
            SectionPayload::FamilyHistory(r) => self.family_history = Some(r),
            SectionPayload::WorkHistory(r) => self.work_history = Some(r),
            SectionPayload::Prognosis(r) => self.prognosis = Some(r),
            SectionPayload::ExpertDetails(r) => self.expert_details = Some(r),
        }
    }

    /// Returns a copy of one section as a payload, if it has been recorded
    pub fn get(&self, section: SectionId) -> Option<SectionPayload> {
        match section {
            SectionId::ClaimantDetails => {
                self.claimant_details.clone().map(SectionPayload::ClaimantDetails)
            }
            SectionId::AccidentDetails => {
                self.accident_details.clone().map(SectionPayload::AccidentDetails)
            }
            SectionId::PhysicalInjury => {
                self.physical_injury.clone().map(SectionPayload::PhysicalInjury)
            }
            SectionId::PsychologicalInjuries => self
                .psychological_injuries
                .clone()
                .map(SectionPayload::PsychologicalInjuries),
            SectionId::Treatments => self.treatments.clone().map(SectionPayload::Treatments),
            SectionId::LifestyleImpact => {
                self.lifestyle_impact.clone().map(SectionPayload::LifestyleImpact)
            }
            SectionId::FamilyHistory => {
                self.family_history.clone().map(SectionPayload::FamilyHistory)
            }
            SectionId::WorkHistory => self.work_history.clone().map(SectionPayload::WorkHistory),
            SectionId::Prognosis => self.prognosis.clone().map(SectionPayload::Prognosis),
            SectionId::ExpertDetails => {
                self.expert_details.clone().map(SectionPayload::ExpertDetails)
            }
        }
    }

    /// Whether a sub-object exists for the section (complete or not)
    pub fn is_recorded(&self, section: SectionId) -> bool {
        match section {
            SectionId::ClaimantDetails => self.claimant_details.is_some(),
            SectionId::AccidentDetails => self.accident_details.is_some(),
            SectionId::PhysicalInjury => self.physical_injury.is_some(),
            SectionId::PsychologicalInjuries => self.psychological_injuries.is_some(),
            SectionId::Treatments => self.treatments.is_some(),
            SectionId::LifestyleImpact => self.lifestyle_impact.is_some(),
            SectionId::FamilyHistory => self.family_history.is_some(),
            SectionId::WorkHistory => self.work_history.is_some(),
            SectionId::Prognosis => self.prognosis.is_some(),
            SectionId::ExpertDetails => self.expert_details.is_some(),
        }
    }
}

/// One claimant's medical-legal report record
///
/// The completion percentage is derived from the sections and can only be
/// changed by recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    pub case_number: String,
    pub status: CaseStatus,
    pub owner_id: UserId,
    pub sections: CaseSections,
    completion_percentage: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Creates an empty in-progress case
    ///
    /// A case number is generated when none is supplied.
    pub fn new(owner_id: UserId, case_number: Option<String>) -> Result<Self, CaseError> {
        let now = Utc::now();
        let case_number = match case_number {
            Some(number) => normalize_case_number(&number)?,
            None => generate_case_number(now),
        };

        Ok(Self {
            id: CaseId::new_v7(),
            case_number,
            status: CaseStatus::InProgress,
            owner_id,
            sections: CaseSections::default(),
            completion_percentage: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a case from stored parts, recomputing its completion
    pub fn restore(
        id: CaseId,
        case_number: String,
        status: CaseStatus,
        owner_id: UserId,
        sections: CaseSections,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut case = Self {
            id,
            case_number,
            status,
            owner_id,
            sections,
            completion_percentage: 0,
            created_at,
            updated_at,
        };
        case.completion_percentage = completion::calculate(&case);
        case
    }

    /// The last computed completion percentage (0-100)
    pub fn completion_percentage(&self) -> u8 {
        self.completion_percentage
    }

    /// Recomputes the completion percentage from the current sections
    pub fn recompute_completion(&mut self) -> u8 {
        self.completion_percentage = completion::calculate(self);
        self.completion_percentage
    }

    /// Validates and stores one section's sub-object
    ///
    /// # Errors
    ///
    /// - `CaseError::CaseArchived` if the case is archived
    /// - `CaseError::Validation` if the payload fails validation
    pub fn apply_section(&mut self, payload: SectionPayload) -> Result<(), CaseError> {
        if self.status == CaseStatus::Archived {
            return Err(CaseError::CaseArchived(self.case_number.clone()));
        }
        payload.validate()?;

        self.sections.set(payload);
        self.recompute_completion();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Moves the case to a new status
    pub fn transition_to(&mut self, status: CaseStatus) -> Result<(), CaseError> {
        if !self.can_transition_to(status) {
            return Err(CaseError::InvalidStatusTransition {
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Finalizes the report
    pub fn complete(&mut self) -> Result<(), CaseError> {
        self.transition_to(CaseStatus::Completed)
    }

    /// Archives the case
    pub fn archive(&mut self) -> Result<(), CaseError> {
        self.transition_to(CaseStatus::Archived)
    }

    /// Returns a completed or archived case to editing
    pub fn reopen(&mut self) -> Result<(), CaseError> {
        self.transition_to(CaseStatus::InProgress)
    }

    fn can_transition_to(&self, target: CaseStatus) -> bool {
        use CaseStatus::*;
        matches!(
            (self.status, target),
            (InProgress, Completed)
                | (Completed, InProgress)
                | (InProgress, Archived)
                | (Completed, Archived)
                | (Archived, InProgress)
        )
    }
}

fn normalize_case_number(number: &str) -> Result<String, CaseError> {
    let trimmed = number.trim();
    if trimmed.is_empty() || trimmed.len() > 50 {
        return Err(CaseError::InvalidCaseNumber(
            "must be between 1 and 50 characters".to_string(),
        ));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '/' || c == '_')
    {
        return Err(CaseError::InvalidCaseNumber(format!(
            "'{}' may only contain letters, digits, '-', '_' and '/'",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Attempts a store makes to find an unused generated case number
pub const CASE_NUMBER_ATTEMPTS: usize = 8;

/// Generates a case number of the form `MLR-YYYY-NNNNNN`
pub fn generate_case_number(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().as_u128() % 1_000_000;
    format!("MLR-{}-{:06}", now.year(), suffix)
}

/// Source of case numbers for cases created without one
///
/// Generated numbers are not guaranteed unique; stores draw a fresh one
/// when the last was already taken.
pub trait CaseNumberGenerator: fmt::Debug + Send + Sync {
    fn next_number(&self, now: DateTime<Utc>) -> String;
}

/// Random six-digit suffixes within the current year
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCaseNumbers;

impl CaseNumberGenerator for RandomCaseNumbers {
    fn next_number(&self, now: DateTime<Utc>) -> String {
        generate_case_number(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::ClaimantDetails;
    use chrono::NaiveDate;

    fn claimant(full_name: &str) -> SectionPayload {
        SectionPayload::ClaimantDetails(ClaimantDetails {
            full_name: Some(full_name.to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 1, 1),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_case_is_empty() {
        let case = Case::new(UserId::new(), None).unwrap();
        assert_eq!(case.status, CaseStatus::InProgress);
        assert_eq!(case.completion_percentage(), 0);
        assert!(case.case_number.starts_with("MLR-"));
        assert_eq!(case.sections, CaseSections::default());
    }

    #[test]
    fn test_supplied_case_number_is_trimmed() {
        let case = Case::new(UserId::new(), Some("  RTA/2024/17 ".to_string())).unwrap();
        assert_eq!(case.case_number, "RTA/2024/17");
    }

    #[test]
    fn test_invalid_case_number_rejected() {
        assert!(Case::new(UserId::new(), Some("   ".to_string())).is_err());
        assert!(Case::new(UserId::new(), Some("bad number!".to_string())).is_err());
    }

    #[test]
    fn test_generated_case_number_format() {
        let now = Utc::now();
        let number = RandomCaseNumbers.next_number(now);
        let prefix = format!("MLR-{}-", now.year());
        assert!(number.starts_with(&prefix));
        assert_eq!(number.len(), prefix.len() + 6);
        assert!(Case::new(UserId::new(), Some(number)).is_ok());
    }

    #[test]
    fn test_apply_section_recomputes_completion() {
        let mut case = Case::new(UserId::new(), None).unwrap();
        case.apply_section(claimant("Jane Doe")).unwrap();
        assert_eq!(case.completion_percentage(), 10);
    }

    #[test]
    fn test_archived_case_rejects_section_save() {
        let mut case = Case::new(UserId::new(), None).unwrap();
        case.archive().unwrap();
        assert!(matches!(
            case.apply_section(claimant("Jane Doe")),
            Err(CaseError::CaseArchived(_))
        ));
    }

    #[test]
    fn test_invalid_payload_leaves_case_unchanged() {
        let mut case = Case::new(UserId::new(), None).unwrap();
        let before = case.clone();
        let result = case.apply_section(claimant(""));
        assert!(matches!(result, Err(CaseError::Validation { .. })));
        assert_eq!(case, before);
    }

    #[test]
    fn test_status_transitions() {
        let mut case = Case::new(UserId::new(), None).unwrap();
        assert!(case.complete().is_ok());
        assert!(case.reopen().is_ok());
        assert!(case.archive().is_ok());
        assert!(case.complete().is_err());
        assert!(case.reopen().is_ok());
        assert_eq!(case.status, CaseStatus::InProgress);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [CaseStatus::InProgress, CaseStatus::Completed, CaseStatus::Archived] {
            assert_eq!(status.as_str().parse::<CaseStatus>().unwrap(), status);
        }
        assert!("deleted".parse::<CaseStatus>().is_err());
    }
}
