//! Work history section

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{check_other, impl_other_option, not_blank, SectionId, SectionRecord, ValidationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Student,
    Retired,
    Other,
}

impl EmploymentStatus {
    /// Whether the claimant was in paid work
    pub fn is_working(&self) -> bool {
        matches!(self, EmploymentStatus::Employed | EmploymentStatus::SelfEmployed)
    }
}

impl_other_option!(EmploymentStatus);

/// Employment at the time of the accident and time lost since
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<EmploymentStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub employment_status_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub employer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub job_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 3650, message = "must be at most 3650"))]
    pub time_off_work_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_to_work: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_duties: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub notes: Option<String>,
}

impl SectionRecord for WorkHistory {
    const SECTION: SectionId = SectionId::WorkHistory;

    fn check_rules(&self, report: &mut ValidationReport) {
        check_other(
            report,
            "employmentStatus",
            self.employment_status.as_ref(),
            &self.employment_status_other,
        );
    }
}
