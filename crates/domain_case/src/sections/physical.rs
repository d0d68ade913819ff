//! Physical injury section

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    check_other, impl_other_option, not_blank, present, sentence_case, SectionId, SectionRecord,
    ValidationReport,
};

/// Anatomical region of an injury
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    Head,
    Neck,
    Shoulder,
    UpperBack,
    LowerBack,
    Chest,
    Abdomen,
    Arm,
    Wrist,
    Hand,
    Hip,
    Knee,
    Leg,
    Ankle,
    Foot,
    Other,
}

/// Clinical severity grading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
    Minor,
    Moderate,
    Severe,
}

impl_other_option!(BodyRegion);

impl BodyRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyRegion::Head => "head",
            BodyRegion::Neck => "neck",
            BodyRegion::Shoulder => "shoulder",
            BodyRegion::UpperBack => "upper_back",
            BodyRegion::LowerBack => "lower_back",
            BodyRegion::Chest => "chest",
            BodyRegion::Abdomen => "abdomen",
            BodyRegion::Arm => "arm",
            BodyRegion::Wrist => "wrist",
            BodyRegion::Hand => "hand",
            BodyRegion::Hip => "hip",
            BodyRegion::Knee => "knee",
            BodyRegion::Leg => "leg",
            BodyRegion::Ankle => "ankle",
            BodyRegion::Foot => "foot",
            BodyRegion::Other => "other",
        }
    }
}

/// One physical injury
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Injury {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_region: Option<BodyRegion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub body_region_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 500, message = "must be between 1 and 500 characters"),
        custom(function = "not_blank")
    )]
    pub diagnosis: Option<String>,

    /// Self-reported pain, 0 (none) to 10 (worst imaginable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 10, message = "must be between 0 and 10"))]
    pub pain_scale: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 500, message = "must be between 1 and 500 characters"),
        custom(function = "not_blank")
    )]
    pub current_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<InjurySeverity>,
}

impl Injury {
    /// Display label for the injured region
    pub fn region_label(&self) -> String {
        match (&self.body_region, &self.body_region_other) {
            (Some(BodyRegion::Other), Some(other)) if present(&self.body_region_other) => {
                other.trim().to_string()
            }
            (Some(region), _) => sentence_case(region.as_str()),
            (None, _) => "Unspecified region".to_string(),
        }
    }

    /// Whether a diagnosis has been recorded
    pub fn has_diagnosis(&self) -> bool {
        present(&self.diagnosis)
    }
}

/// Physical injuries sustained in the accident
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PhysicalInjury {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub injuries: Vec<Injury>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub additional_notes: Option<String>,
}

impl SectionRecord for PhysicalInjury {
    const SECTION: SectionId = SectionId::PhysicalInjury;

    fn check_rules(&self, report: &mut ValidationReport) {
        for (index, injury) in self.injuries.iter().enumerate() {
            check_other(
                report,
                &format!("injuries[{}].bodyRegion", index),
                injury.body_region.as_ref(),
                &injury.body_region_other,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pain_scale_out_of_range() {
        let section = PhysicalInjury {
            injuries: vec![Injury {
                body_region: Some(BodyRegion::Neck),
                pain_scale: Some(11),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = section.validation_report();
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].field, "injuries[0].painScale");
    }

    #[test]
    fn test_body_region_other_rule_indexed() {
        let section = PhysicalInjury {
            injuries: vec![
                Injury {
                    body_region: Some(BodyRegion::Neck),
                    ..Default::default()
                },
                Injury {
                    body_region: Some(BodyRegion::Other),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let report = section.validation_report();
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].field, "injuries[1].bodyRegionOther");
    }

    #[test]
    fn test_region_label() {
        let injury = Injury {
            body_region: Some(BodyRegion::Other),
            body_region_other: Some("Jaw".to_string()),
            ..Default::default()
        };
        assert_eq!(injury.region_label(), "Jaw");
        assert_eq!(Injury::default().region_label(), "Unspecified region");

        let injury = Injury {
            body_region: Some(BodyRegion::UpperBack),
            ..Default::default()
        };
        assert_eq!(injury.region_label(), "Upper back");
    }

    #[test]
    fn test_region_names_match_serde() {
        for region in [BodyRegion::UpperBack, BodyRegion::LowerBack, BodyRegion::Other] {
            let json = serde_json::to_value(region).unwrap();
            assert_eq!(json.as_str(), Some(region.as_str()));
        }
    }
}
