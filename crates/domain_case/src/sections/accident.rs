//! Accident details section

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{check_other, impl_other_option, not_blank, SectionId, SectionRecord, ValidationReport};

/// Collision mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccidentType {
    RearEndCollision,
    SideImpact,
    HeadOnCollision,
    Rollover,
    PedestrianStruck,
    CyclistStruck,
    Other,
}

/// Where the claimant was at the time of the accident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimantPosition {
    Driver,
    FrontPassenger,
    RearPassenger,
    Pedestrian,
    Cyclist,
    Motorcyclist,
    Other,
}

impl_other_option!(AccidentType, ClaimantPosition);

/// Circumstances of the road traffic accident
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccidentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accident_date: Option<NaiveDate>,

    /// Local time as entered, e.g. `17:45`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 20, message = "must be between 1 and 20 characters"),
        custom(function = "not_blank")
    )]
    pub accident_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 500, message = "must be between 1 and 500 characters"),
        custom(function = "not_blank")
    )]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accident_type: Option<AccidentType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub accident_type_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimant_position: Option<ClaimantPosition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub claimant_position_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seatbelt_worn: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airbag_deployed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub vehicle_damage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub description: Option<String>,
}

impl AccidentDetails {
    /// Whether the claimant was inside a vehicle
    pub fn is_vehicle_occupant(&self) -> bool {
        matches!(
            self.claimant_position,
            Some(ClaimantPosition::Driver)
                | Some(ClaimantPosition::FrontPassenger)
                | Some(ClaimantPosition::RearPassenger)
        )
    }
}

impl SectionRecord for AccidentDetails {
    const SECTION: SectionId = SectionId::AccidentDetails;

    fn check_rules(&self, report: &mut ValidationReport) {
        check_other(
            report,
            "accidentType",
            self.accident_type.as_ref(),
            &self.accident_type_other,
        );
        check_other(
            report,
            "claimantPosition",
            self.claimant_position.as_ref(),
            &self.claimant_position_other,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accident_type_other_requires_description() {
        let details = AccidentDetails {
            accident_type: Some(AccidentType::Other),
            accident_type_other: Some("  ".to_string()),
            ..Default::default()
        };
        let report = details.validation_report();
        assert!(!report.is_valid());
        assert_eq!(report.errors()[0].field, "accidentTypeOther");
    }

    #[test]
    fn test_vehicle_occupant() {
        let mut details = AccidentDetails {
            claimant_position: Some(ClaimantPosition::RearPassenger),
            ..Default::default()
        };
        assert!(details.is_vehicle_occupant());

        details.claimant_position = Some(ClaimantPosition::Pedestrian);
        assert!(!details.is_vehicle_occupant());
    }

    #[test]
    fn test_serializes_snake_case_enums() {
        let details = AccidentDetails {
            accident_type: Some(AccidentType::RearEndCollision),
            ..Default::default()
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json, serde_json::json!({ "accidentType": "rear_end_collision" }));
    }
}
