//! Documentation suggestions
//!
//! A static rule table inspected against a case. Every rule belongs to one
//! section, carries a fixed severity, and fires when its check matches. The
//! engine is pure: the same case always yields the same suggestions in the
//! same order (registry section order, then table order).

use serde::Serialize;
use std::fmt;

use crate::case::Case;
use crate::registry;
use crate::sections::{
    present, InjurySeverity, Outlook, SectionId, TreatmentType,
};

/// How urgently a suggestion should be addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// A note about missing or inconsistent case data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub section: SectionId,
    pub code: &'static str,
    pub message: &'static str,
    pub severity: Severity,
}

/// Counts of suggestions by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSummary {
    pub info: usize,
    pub warning: usize,
    pub critical: usize,
    pub total: usize,
}

impl SuggestionSummary {
    pub fn from_suggestions(suggestions: &[Suggestion]) -> Self {
        let mut summary = SuggestionSummary::default();
        for suggestion in suggestions {
            match suggestion.severity {
                Severity::Info => summary.info += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Critical => summary.critical += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// One entry of the rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub code: &'static str,
    pub section: SectionId,
    pub severity: Severity,
    pub message: &'static str,
    pub applies: fn(&Case) -> bool,
}

impl Rule {
    fn suggestion(&self) -> Suggestion {
        Suggestion {
            section: self.section,
            code: self.code,
            message: self.message,
            severity: self.severity,
        }
    }
}

/// Runs every rule against the case
pub fn analyze(case: &Case) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    for definition in registry::sections() {
        suggestions.extend(
            RULES
                .iter()
                .filter(|rule| rule.section == definition.id && (rule.applies)(case))
                .map(Rule::suggestion),
        );
    }
    suggestions
}

/// Suggestions for a single section
pub fn analyze_section(case: &Case, section: SectionId) -> Vec<Suggestion> {
    RULES
        .iter()
        .filter(|rule| rule.section == section && (rule.applies)(case))
        .map(Rule::suggestion)
        .collect()
}

/// The rule table, grouped by section in registry order
pub static RULES: &[Rule] = &[
    // Claimant details
    Rule {
        code: "claimant.missing",
        section: SectionId::ClaimantDetails,
        severity: Severity::Critical,
        message: "Claimant details have not been recorded.",
        applies: |case| case.sections.claimant_details.is_none(),
    },
    Rule {
        code: "claimant.name_missing",
        section: SectionId::ClaimantDetails,
        severity: Severity::Critical,
        message: "The claimant's full name is missing.",
        applies: |case| {
            case.sections
                .claimant_details
                .as_ref()
                .is_some_and(|c| !present(&c.full_name))
        },
    },
    Rule {
        code: "claimant.date_of_birth_missing",
        section: SectionId::ClaimantDetails,
        severity: Severity::Warning,
        message: "The claimant's date of birth is missing; age at the time of the accident cannot be stated.",
        applies: |case| {
            case.sections
                .claimant_details
                .as_ref()
                .is_some_and(|c| c.date_of_birth.is_none())
        },
    },
    Rule {
        code: "claimant.born_after_accident",
        section: SectionId::ClaimantDetails,
        severity: Severity::Critical,
        message: "The claimant's date of birth falls after the accident date.",
        applies: |case| {
            let dob = case.sections.claimant_details.as_ref().and_then(|c| c.date_of_birth);
            let accident = case.sections.accident_details.as_ref().and_then(|a| a.accident_date);
            matches!((dob, accident), (Some(dob), Some(accident)) if dob > accident)
        },
    },
    Rule {
        code: "claimant.identity_unverified",
        section: SectionId::ClaimantDetails,
        severity: Severity::Info,
        message: "Record how the claimant's identity was verified at examination.",
        applies: |case| {
            case.sections
                .claimant_details
                .as_ref()
                .is_some_and(|c| c.identity_verified != Some(true))
        },
    },
    // Accident details
    Rule {
        code: "accident.missing",
        section: SectionId::AccidentDetails,
        severity: Severity::Critical,
        message: "Accident details have not been recorded.",
        applies: |case| case.sections.accident_details.is_none(),
    },
    Rule {
        code: "accident.date_missing",
        section: SectionId::AccidentDetails,
        severity: Severity::Warning,
        message: "The accident date is missing.",
        applies: |case| {
            case.sections
                .accident_details
                .as_ref()
                .is_some_and(|a| a.accident_date.is_none())
        },
    },
    Rule {
        code: "accident.type_missing",
        section: SectionId::AccidentDetails,
        severity: Severity::Warning,
        message: "The type of accident has not been selected.",
        applies: |case| {
            case.sections
                .accident_details
                .as_ref()
                .is_some_and(|a| a.accident_type.is_none())
        },
    },
    Rule {
        code: "accident.description_missing",
        section: SectionId::AccidentDetails,
        severity: Severity::Info,
        message: "Add the claimant's account of how the accident happened.",
        applies: |case| {
            case.sections
                .accident_details
                .as_ref()
                .is_some_and(|a| !present(&a.description))
        },
    },
    Rule {
        code: "accident.seatbelt_unknown",
        section: SectionId::AccidentDetails,
        severity: Severity::Info,
        message: "State whether the claimant was wearing a seatbelt.",
        applies: |case| {
            case.sections
                .accident_details
                .as_ref()
                .is_some_and(|a| a.is_vehicle_occupant() && a.seatbelt_worn.is_none())
        },
    },
    // Physical injury
    Rule {
        code: "physical.no_injuries",
        section: SectionId::PhysicalInjury,
        severity: Severity::Critical,
        message: "No injuries recorded.",
        applies: |case| {
            case.sections
                .physical_injury
                .as_ref()
                .map_or(true, |p| p.injuries.is_empty())
        },
    },
    Rule {
        code: "physical.pain_without_diagnosis",
        section: SectionId::PhysicalInjury,
        severity: Severity::Warning,
        message: "A pain score is recorded for an injury that has no diagnosis.",
        applies: |case| {
            case.sections.physical_injury.as_ref().is_some_and(|p| {
                p.injuries
                    .iter()
                    .any(|i| i.pain_scale.is_some() && !i.has_diagnosis())
            })
        },
    },
    Rule {
        code: "physical.pain_scale_missing",
        section: SectionId::PhysicalInjury,
        severity: Severity::Info,
        message: "Record a pain score for each injury.",
        applies: |case| {
            case.sections
                .physical_injury
                .as_ref()
                .is_some_and(|p| p.injuries.iter().any(|i| i.pain_scale.is_none()))
        },
    },
    Rule {
        code: "physical.severe_untreated",
        section: SectionId::PhysicalInjury,
        severity: Severity::Warning,
        message: "A severe injury is recorded but no treatment has been documented.",
        applies: |case| {
            let severe = case.sections.physical_injury.as_ref().is_some_and(|p| {
                p.injuries
                    .iter()
                    .any(|i| i.severity == Some(InjurySeverity::Severe))
            });
            let treated = case
                .sections
                .treatments
                .as_ref()
                .is_some_and(|t| !t.treatments.is_empty());
            severe && !treated
        },
    },
    Rule {
        code: "physical.onset_before_accident",
        section: SectionId::PhysicalInjury,
        severity: Severity::Warning,
        message: "An injury onset date precedes the accident date.",
        applies: |case| {
            let Some(accident) = case.sections.accident_details.as_ref().and_then(|a| a.accident_date) else {
                return false;
            };
            case.sections.physical_injury.as_ref().is_some_and(|p| {
                p.injuries
                    .iter()
                    .any(|i| i.onset.is_some_and(|onset| onset < accident))
            })
        },
    },
    // Psychological injuries
    Rule {
        code: "psychological.not_assessed",
        section: SectionId::PsychologicalInjuries,
        severity: Severity::Info,
        message: "No psychological assessment recorded; confirm whether psychological symptoms were screened.",
        applies: |case| {
            case.sections
                .psychological_injuries
                .as_ref()
                .map_or(true, |p| p.conditions.is_empty())
        },
    },
    Rule {
        code: "psychological.screening_tool_missing",
        section: SectionId::PsychologicalInjuries,
        severity: Severity::Info,
        message: "Name the screening instrument used for the psychological assessment.",
        applies: |case| {
            case.sections
                .psychological_injuries
                .as_ref()
                .is_some_and(|p| !p.conditions.is_empty() && !present(&p.screening_tool))
        },
    },
    Rule {
        code: "psychological.untreated",
        section: SectionId::PsychologicalInjuries,
        severity: Severity::Info,
        message: "Psychological symptoms are recorded without counselling or therapy; consider a referral.",
        applies: |case| {
            let symptomatic = case
                .sections
                .psychological_injuries
                .as_ref()
                .is_some_and(|p| !p.conditions.is_empty());
            let counselled = case
                .sections
                .treatments
                .as_ref()
                .is_some_and(|t| t.includes(TreatmentType::Counselling));
            symptomatic && !counselled
        },
    },
    // Treatments
    Rule {
        code: "treatments.none",
        section: SectionId::Treatments,
        severity: Severity::Warning,
        message: "No treatment has been recorded.",
        applies: |case| {
            case.sections
                .treatments
                .as_ref()
                .map_or(true, |t| t.treatments.is_empty())
        },
    },
    Rule {
        code: "treatments.provider_missing",
        section: SectionId::Treatments,
        severity: Severity::Info,
        message: "Name the provider for each treatment.",
        applies: |case| {
            case.sections
                .treatments
                .as_ref()
                .is_some_and(|t| t.treatments.iter().any(|tr| !present(&tr.provider)))
        },
    },
    // Lifestyle impact
    Rule {
        code: "lifestyle.missing",
        section: SectionId::LifestyleImpact,
        severity: Severity::Warning,
        message: "The impact of the injuries on daily life has not been described.",
        applies: |case| !registry::is_section_complete(case, SectionId::LifestyleImpact),
    },
    Rule {
        code: "lifestyle.impact_level_missing",
        section: SectionId::LifestyleImpact,
        severity: Severity::Info,
        message: "Grade the impact for each affected activity.",
        applies: |case| {
            case.sections.lifestyle_impact.as_ref().is_some_and(|l| {
                l.affected_activities
                    .iter()
                    .any(|a| a.impact_level.is_none())
            })
        },
    },
    // Family history
    Rule {
        code: "family.missing",
        section: SectionId::FamilyHistory,
        severity: Severity::Info,
        message: "Family and household circumstances have not been recorded.",
        applies: |case| case.sections.family_history.is_none(),
    },
    Rule {
        code: "family.pre_existing_unrecorded",
        section: SectionId::FamilyHistory,
        severity: Severity::Info,
        message: "Record any pre-existing conditions, or state that there are none.",
        applies: |case| {
            case.sections.family_history.as_ref().is_some_and(|f| {
                !present(&f.pre_existing_conditions) && !present(&f.relevant_medical_history)
            })
        },
    },
    // Work history
    Rule {
        code: "work.missing",
        section: SectionId::WorkHistory,
        severity: Severity::Warning,
        message: "Employment status has not been recorded.",
        applies: |case| !registry::is_section_complete(case, SectionId::WorkHistory),
    },
    Rule {
        code: "work.time_off_missing",
        section: SectionId::WorkHistory,
        severity: Severity::Info,
        message: "The claimant was working; record the time taken off work.",
        applies: |case| {
            case.sections.work_history.as_ref().is_some_and(|w| {
                w.employment_status.is_some_and(|s| s.is_working())
                    && w.time_off_work_days.is_none()
            })
        },
    },
    // Prognosis
    Rule {
        code: "prognosis.missing",
        section: SectionId::Prognosis,
        severity: Severity::Critical,
        message: "No prognosis has been given.",
        applies: |case| !registry::is_section_complete(case, SectionId::Prognosis),
    },
    Rule {
        code: "prognosis.recovery_period_missing",
        section: SectionId::Prognosis,
        severity: Severity::Warning,
        message: "State the expected recovery period for this outlook.",
        applies: |case| {
            case.sections.prognosis.as_ref().is_some_and(|p| {
                p.outlook.is_some_and(|o| o.expects_recovery_period())
                    && p.recovery_period_months.is_none()
            })
        },
    },
    Rule {
        code: "prognosis.recovery_contradicts_impairment",
        section: SectionId::Prognosis,
        severity: Severity::Warning,
        message: "The prognosis states full recovery but also records a permanent impairment.",
        applies: |case| {
            case.sections.prognosis.as_ref().is_some_and(|p| {
                p.outlook == Some(Outlook::FullRecovery) && p.permanent_impairment == Some(true)
            })
        },
    },
    // Expert details
    Rule {
        code: "expert.missing",
        section: SectionId::ExpertDetails,
        severity: Severity::Critical,
        message: "The reporting expert has not been identified.",
        applies: |case| !registry::is_section_complete(case, SectionId::ExpertDetails),
    },
    Rule {
        code: "expert.statement_of_truth_missing",
        section: SectionId::ExpertDetails,
        severity: Severity::Warning,
        message: "The expert has not confirmed the statement of truth.",
        applies: |case| {
            case.sections
                .expert_details
                .as_ref()
                .is_some_and(|e| e.statement_of_truth != Some(true))
        },
    },
    Rule {
        code: "expert.examination_date_missing",
        section: SectionId::ExpertDetails,
        severity: Severity::Info,
        message: "Record the date the claimant was examined.",
        applies: |case| {
            case.sections
                .expert_details
                .as_ref()
                .is_some_and(|e| e.examination_date.is_none())
        },
    },
    Rule {
        code: "expert.examined_before_accident",
        section: SectionId::ExpertDetails,
        severity: Severity::Critical,
        message: "The examination date precedes the accident date.",
        applies: |case| {
            let examined = case.sections.expert_details.as_ref().and_then(|e| e.examination_date);
            let accident = case.sections.accident_details.as_ref().and_then(|a| a.accident_date);
            matches!((examined, accident), (Some(examined), Some(accident)) if examined < accident)
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_codes_unique() {
        let codes: HashSet<&str> = RULES.iter().map(|r| r.code).collect();
        assert_eq!(codes.len(), RULES.len());
    }

    #[test]
    fn test_rules_grouped_in_registry_order() {
        let order: Vec<SectionId> = RULES.iter().map(|r| r.section).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_every_section_has_a_rule() {
        for id in SectionId::ALL {
            assert!(RULES.iter().any(|r| r.section == id), "no rule for {}", id);
        }
    }

    #[test]
    fn test_summary_counts() {
        let suggestions = vec![
            Suggestion {
                section: SectionId::Prognosis,
                code: "a",
                message: "a",
                severity: Severity::Critical,
            },
            Suggestion {
                section: SectionId::Prognosis,
                code: "b",
                message: "b",
                severity: Severity::Info,
            },
        ];
        let summary = SuggestionSummary::from_suggestions(&suggestions);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.warning, 0);
        assert_eq!(summary.total, 2);
    }
}
