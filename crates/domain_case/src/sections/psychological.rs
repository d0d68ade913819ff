//! Psychological injuries section

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    check_other, impl_other_option, not_blank, InjurySeverity, SectionId, SectionRecord,
    ValidationReport,
};

/// Psychological condition reported after the accident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PsychologicalConditionKind {
    Anxiety,
    Depression,
    PostTraumaticStress,
    TravelAnxiety,
    SleepDisturbance,
    Flashbacks,
    Other,
}

impl_other_option!(PsychologicalConditionKind);

/// One psychological condition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PsychologicalCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<PsychologicalConditionKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub condition_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<InjurySeverity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub symptoms: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 500, message = "must be between 1 and 500 characters"),
        custom(function = "not_blank")
    )]
    pub diagnosis: Option<String>,
}

/// Psychological consequences of the accident
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PsychologicalInjuries {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub conditions: Vec<PsychologicalCondition>,

    /// Standardised instrument used, e.g. GAD-7 or PHQ-9
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub screening_tool: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub notes: Option<String>,
}

impl SectionRecord for PsychologicalInjuries {
    const SECTION: SectionId = SectionId::PsychologicalInjuries;

    fn check_rules(&self, report: &mut ValidationReport) {
        for (index, condition) in self.conditions.iter().enumerate() {
            check_other(
                report,
                &format!("conditions[{}].condition", index),
                condition.condition.as_ref(),
                &condition.condition_other,
            );
        }
    }
}
