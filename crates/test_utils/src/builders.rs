//! Test Data Builders
//!
//! Builder patterns for constructing cases with sensible defaults. Tests
//! name only the sections and status they care about.

use chrono::{DateTime, Utc};
use core_kernel::{CaseId, UserId};
use domain_case::{Case, CaseSections, CaseStatus, SectionId, SectionPayload};

use crate::fixtures::{DateFixtures, IdFixtures, MinimalSections};

/// Builder for constructing test cases
///
/// Sections are stored directly, without validation, so tests can also
/// build cases holding data the API would reject.
pub struct TestCaseBuilder {
    id: CaseId,
    case_number: String,
    status: CaseStatus,
    owner_id: UserId,
    sections: CaseSections,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for TestCaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCaseBuilder {
    /// Creates a new builder for an empty in-progress case
    pub fn new() -> Self {
        Self {
            id: CaseId::new_v7(),
            case_number: IdFixtures::case_number().to_string(),
            status: CaseStatus::InProgress,
            owner_id: IdFixtures::owner_id(),
            sections: CaseSections::default(),
            created_at: DateFixtures::created_at(),
            updated_at: DateFixtures::created_at(),
        }
    }

    pub fn with_id(mut self, id: CaseId) -> Self {
        self.id = id;
        self
    }

    pub fn with_case_number(mut self, number: impl Into<String>) -> Self {
        self.case_number = number.into();
        self
    }

    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Stores one section's record
    pub fn with_section(mut self, payload: SectionPayload) -> Self {
        self.sections.set(payload);
        self
    }

    /// Stores the minimal record for each listed section
    pub fn with_minimal_sections(mut self, sections: &[SectionId]) -> Self {
        for id in sections {
            self.sections.set(MinimalSections::payload(*id));
        }
        self
    }

    /// Stores the minimal record for every section
    pub fn complete(self) -> Self {
        self.with_minimal_sections(&SectionId::ALL)
    }

    /// Builds the case, computing its completion percentage
    pub fn build(self) -> Case {
        Case::restore(
            self.id,
            self.case_number,
            self.status,
            self.owner_id,
            self.sections,
            self.created_at,
            self.updated_at,
        )
    }
}

/// Builds a case with the minimal records for the given sections
pub fn case_with_sections(sections: &[SectionId]) -> Case {
    TestCaseBuilder::new().with_minimal_sections(sections).build()
}
