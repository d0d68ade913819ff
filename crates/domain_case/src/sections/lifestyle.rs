//! Lifestyle impact section

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{check_other, impl_other_option, not_blank, SectionId, SectionRecord, ValidationReport};

/// Everyday activity affected by the injuries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Sport,
    Housework,
    Childcare,
    Driving,
    SocialLife,
    Sleep,
    Hobbies,
    PersonalCare,
    Other,
}

/// How strongly an activity is affected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Mild,
    Moderate,
    Severe,
    Unable,
}

impl_other_option!(Activity);

/// One affected activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AffectedActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub activity_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_level: Option<ImpactLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub description: Option<String>,
}

/// Effect of the injuries on the claimant's daily life
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LifestyleImpact {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub affected_activities: Vec<AffectedActivity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_disturbance: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub hobbies_abandoned: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub summary: Option<String>,
}

impl SectionRecord for LifestyleImpact {
    const SECTION: SectionId = SectionId::LifestyleImpact;

    fn check_rules(&self, report: &mut ValidationReport) {
        for (index, affected) in self.affected_activities.iter().enumerate() {
            check_other(
                report,
                &format!("affectedActivities[{}].activity", index),
                affected.activity.as_ref(),
                &affected.activity_other,
            );
        }
    }
}
