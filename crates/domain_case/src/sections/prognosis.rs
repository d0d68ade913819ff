//! Prognosis section

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, SectionId, SectionRecord};

/// Expected course of recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    FullRecovery,
    PartialRecovery,
    PermanentSymptoms,
    Uncertain,
}

impl Outlook {
    /// Outlooks for which a recovery period is expected to be stated
    pub fn expects_recovery_period(&self) -> bool {
        matches!(self, Outlook::FullRecovery | Outlook::PartialRecovery)
    }
}

/// The expert's opinion on recovery
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Prognosis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlook: Option<Outlook>,

    /// Months from the accident until the expected recovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 240, message = "must be between 0 and 240"))]
    pub recovery_period_months: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub future_treatment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permanent_impairment: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 5000, message = "must be between 1 and 5000 characters"),
        custom(function = "not_blank")
    )]
    pub opinion: Option<String>,
}

impl SectionRecord for Prognosis {
    const SECTION: SectionId = SectionId::Prognosis;
}
