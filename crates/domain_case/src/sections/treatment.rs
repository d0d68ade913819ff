//! Treatments section

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{check_other, impl_other_option, not_blank, SectionId, SectionRecord, ValidationReport};

/// Kind of treatment received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentType {
    GeneralPractitioner,
    AccidentAndEmergency,
    Physiotherapy,
    Medication,
    Surgery,
    Counselling,
    Chiropractic,
    Osteopathy,
    Other,
}

impl_other_option!(TreatmentType);

/// One course of treatment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Treatment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_type: Option<TreatmentType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub treatment_type_other: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 500, message = "must be at most 500"))]
    pub sessions: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ongoing: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub outcome: Option<String>,
}

/// Treatment history since the accident
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Treatments {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub treatments: Vec<Treatment>,
}

impl Treatments {
    /// Whether any treatment of the given type was recorded
    pub fn includes(&self, kind: TreatmentType) -> bool {
        self.treatments.iter().any(|t| t.treatment_type == Some(kind))
    }
}

impl SectionRecord for Treatments {
    const SECTION: SectionId = SectionId::Treatments;

    fn check_rules(&self, report: &mut ValidationReport) {
        for (index, treatment) in self.treatments.iter().enumerate() {
            let path = format!("treatments[{}]", index);
            check_other(
                report,
                &format!("{}.treatmentType", path),
                treatment.treatment_type.as_ref(),
                &treatment.treatment_type_other,
            );

            if let (Some(start), Some(end)) = (treatment.start_date, treatment.end_date) {
                if end < start {
                    report.add_error(format!("{}.endDate", path), "must not precede startDate");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_date_before_start_date() {
        let section = Treatments {
            treatments: vec![Treatment {
                treatment_type: Some(TreatmentType::Physiotherapy),
                start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                end_date: NaiveDate::from_ymd_opt(2024, 2, 1),
                ..Default::default()
            }],
        };
        let report = section.validation_report();
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].field, "treatments[0].endDate");
    }

    #[test]
    fn test_includes() {
        let section = Treatments {
            treatments: vec![Treatment {
                treatment_type: Some(TreatmentType::Counselling),
                ..Default::default()
            }],
        };
        assert!(section.includes(TreatmentType::Counselling));
        assert!(!section.includes(TreatmentType::Surgery));
    }
}
