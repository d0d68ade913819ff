//! Claimant details section

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{check_other, impl_other_option, not_blank, SectionId, SectionRecord, ValidationReport};

/// Gender as recorded on the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
    PreferNotToSay,
    Other,
}

/// Document used to confirm the claimant's identity at examination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentificationType {
    Passport,
    DrivingLicence,
    NationalIdCard,
    Other,
}

impl_other_option!(Gender, IdentificationType);

/// Personal details of the injured claimant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClaimantDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub gender_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 500, message = "must be between 1 and 500 characters"),
        custom(function = "not_blank")
    )]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub occupation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 5, max = 30, message = "must be between 5 and 30 characters"),
        custom(function = "not_blank")
    )]
    pub contact_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_verified: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification_type: Option<IdentificationType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub identification_type_other: Option<String>,
}

impl SectionRecord for ClaimantDetails {
    const SECTION: SectionId = SectionId::ClaimantDetails;

    fn check_rules(&self, report: &mut ValidationReport) {
        check_other(report, "gender", self.gender.as_ref(), &self.gender_other);
        check_other(
            report,
            "identificationType",
            self.identification_type.as_ref(),
            &self.identification_type_other,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_claimant_is_valid() {
        let details = ClaimantDetails {
            full_name: Some("Jane Doe".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 4, 12),
            ..Default::default()
        };
        assert!(details.validation_report().is_valid());
    }

    #[test]
    fn test_gender_other_requires_text() {
        let details = ClaimantDetails {
            gender: Some(Gender::Other),
            ..Default::default()
        };
        let report = details.validation_report();
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].field, "genderOther");
    }

    #[test]
    fn test_gender_other_rejected_without_other_selected() {
        let details = ClaimantDetails {
            gender: Some(Gender::Female),
            gender_other: Some("something".to_string()),
            ..Default::default()
        };
        let report = details.validation_report();
        assert_eq!(report.errors()[0].field, "genderOther");
        assert!(report.errors()[0].message.contains("only allowed"));
    }

    #[test]
    fn test_invalid_email_reported_in_camel_case() {
        let details = ClaimantDetails {
            email: Some("not-an-email".to_string()),
            full_name: Some(String::new()),
            ..Default::default()
        };
        let report = details.validation_report();
        let fields: Vec<&str> = report.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "fullName"]);
    }
}
