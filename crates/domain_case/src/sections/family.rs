//! Family history section

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{check_other, impl_other_option, not_blank, SectionId, SectionRecord, ValidationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    CivilPartnership,
    Cohabiting,
    Separated,
    Divorced,
    Widowed,
    Other,
}

impl_other_option!(MaritalStatus);

/// Household circumstances and relevant family medical history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FamilyHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub marital_status_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 30, message = "must be at most 30"))]
    pub dependants: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub household_support: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub relevant_medical_history: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub pre_existing_conditions: Option<String>,
}

impl SectionRecord for FamilyHistory {
    const SECTION: SectionId = SectionId::FamilyHistory;

    fn check_rules(&self, report: &mut ValidationReport) {
        check_other(
            report,
            "maritalStatus",
            self.marital_status.as_ref(),
            &self.marital_status_other,
        );
    }
}
