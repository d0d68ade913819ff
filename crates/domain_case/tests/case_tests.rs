//! Case domain scenarios and completion properties

use chrono::NaiveDate;
use proptest::prelude::*;

use domain_case::sections::{
    AccidentDetails, ClaimantDetails, ExpertDetails, Injury, InjurySeverity, Outlook,
    PhysicalInjury, Prognosis, PsychologicalCondition, PsychologicalConditionKind,
    PsychologicalInjuries, Treatment, TreatmentType, Treatments, WorkHistory,
    EmploymentStatus, BodyRegion,
};
use domain_case::{
    completion, registry, suggestions, Case, CaseError, CasePort, CaseStatus, CreateCaseRequest,
    InMemoryCasePort, SectionId, SectionPayload, Severity, CASE_NUMBER_ATTEMPTS,
};
use test_utils::{
    assert_completion_consistent, assert_conflict, assert_field_error, assert_has_suggestion,
    assert_no_suggestion, assert_section_complete, assert_section_incomplete, case_strategy,
    case_with_sections, claimant_strategy, section_id_strategy, DateFixtures, IdFixtures,
    MinimalSections, RealisticSections, SequenceCaseNumbers, TestCaseBuilder,
};

// ============================================================================
// Completion scenarios
// ============================================================================

#[test]
fn empty_case_is_zero_percent() {
    let case = Case::new(IdFixtures::owner_id(), None).unwrap();
    assert_eq!(case.completion_percentage(), 0);
    assert_eq!(completion::progress(&case).completed_sections, 0);
}

#[test]
fn all_minimal_sections_make_one_hundred_percent() {
    let mut case = Case::new(IdFixtures::owner_id(), None).unwrap();
    for payload in MinimalSections::all() {
        case.apply_section(payload).unwrap();
    }
    assert_eq!(case.completion_percentage(), 100);
    assert_completion_consistent(&case);
}

#[test]
fn claimant_with_only_full_name_is_incomplete() {
    let case = TestCaseBuilder::new()
        .with_section(SectionPayload::ClaimantDetails(ClaimantDetails {
            full_name: Some("Jane Doe".to_string()),
            ..Default::default()
        }))
        .build();

    assert_section_incomplete(&case, SectionId::ClaimantDetails);
    assert_eq!(case.completion_percentage(), 0);
}

#[test]
fn progress_lists_sections_in_registry_order() {
    let case = case_with_sections(&[SectionId::Prognosis, SectionId::ClaimantDetails]);
    let report = completion::progress(&case);

    let ids: Vec<SectionId> = report.sections.iter().map(|s| s.id).collect();
    assert_eq!(ids, SectionId::ALL.to_vec());
    assert_eq!(report.total_sections, 10);
    assert_eq!(report.completed_sections, 2);
    assert_eq!(report.percentage, 20);
    assert!(report.sections[0].complete);
    assert!(report.sections[8].complete);
}

#[test]
fn blank_defining_field_counts_as_absent() {
    let case = TestCaseBuilder::new()
        .with_section(SectionPayload::ExpertDetails(ExpertDetails {
            expert_name: Some("   ".to_string()),
            specialty: Some("Orthopaedics".to_string()),
            ..Default::default()
        }))
        .build();
    assert_section_incomplete(&case, SectionId::ExpertDetails);
}

// ============================================================================
// Validation and lifecycle
// ============================================================================

#[test]
fn invalid_payload_is_rejected_without_changing_the_case() {
    let mut case = case_with_sections(&[SectionId::ClaimantDetails]);
    let before = case.clone();

    let err = case
        .apply_section(SectionPayload::PhysicalInjury(PhysicalInjury {
            injuries: vec![Injury {
                body_region: Some(BodyRegion::Other),
                pain_scale: Some(12),
                ..Default::default()
            }],
            ..Default::default()
        }))
        .unwrap_err();

    assert_field_error(&err, "injuries[0].painScale");
    assert_field_error(&err, "injuries[0].bodyRegionOther");
    assert_eq!(case, before);
}

#[test]
fn treatment_end_before_start_is_rejected() {
    let payload = SectionPayload::Treatments(Treatments {
        treatments: vec![Treatment {
            treatment_type: Some(TreatmentType::Physiotherapy),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            ..Default::default()
        }],
    });
    let err = payload.validate().unwrap_err();
    assert_field_error(&err, "treatments[0].endDate");
}

#[test]
fn unknown_json_field_is_malformed() {
    let err = SectionPayload::from_json(
        SectionId::Prognosis,
        serde_json::json!({ "outlook": "full_recovery", "mood": "good" }),
    )
    .unwrap_err();
    assert!(matches!(err, CaseError::MalformedPayload { .. }));
}

#[test]
fn archived_case_rejects_section_saves_until_reopened() {
    let mut case = TestCaseBuilder::new().build();
    case.archive().unwrap();

    let err = case
        .apply_section(MinimalSections::payload(SectionId::Prognosis))
        .unwrap_err();
    assert!(matches!(err, CaseError::CaseArchived(_)));

    case.reopen().unwrap();
    case.apply_section(MinimalSections::payload(SectionId::Prognosis))
        .unwrap();
    assert_eq!(case.status, CaseStatus::InProgress);
    assert_eq!(case.completion_percentage(), 10);
}

#[test]
fn completed_case_cannot_be_completed_again() {
    let mut case = TestCaseBuilder::new().complete().build();
    case.complete().unwrap();
    let err = case.complete().unwrap_err();
    assert!(matches!(err, CaseError::InvalidStatusTransition { .. }));
}

// ============================================================================
// Case numbers
// ============================================================================

#[tokio::test]
async fn generated_case_number_skips_taken_numbers() {
    let owner = IdFixtures::owner_id();
    let numbers = SequenceCaseNumbers::new(&["MLR-2024-000001", "MLR-2024-000002"]);
    let port = InMemoryCasePort::with_cases(vec![TestCaseBuilder::new()
        .with_owner(owner)
        .with_case_number("MLR-2024-000001")
        .build()])
    .await
    .with_number_generator(numbers.clone());

    let case = port
        .create_case(CreateCaseRequest {
            owner_id: owner,
            case_number: None,
        })
        .await
        .unwrap();

    assert_eq!(case.case_number, "MLR-2024-000002");
    assert_eq!(numbers.drawn(), 2);
    assert_eq!(port.len().await, 2);
}

#[tokio::test]
async fn generated_case_number_gives_up_after_bounded_attempts() {
    let numbers = SequenceCaseNumbers::new(&["MLR-2024-000001"]);
    let port = InMemoryCasePort::with_cases(vec![TestCaseBuilder::new()
        .with_case_number("MLR-2024-000001")
        .build()])
    .await
    .with_number_generator(numbers.clone());

    let err = port
        .create_case(CreateCaseRequest {
            owner_id: IdFixtures::owner_id(),
            case_number: None,
        })
        .await
        .unwrap_err();

    assert_conflict(&err);
    assert_eq!(numbers.drawn(), CASE_NUMBER_ATTEMPTS);
    assert_eq!(port.len().await, 1);
}

#[tokio::test]
async fn supplied_case_number_is_never_replaced() {
    let numbers = SequenceCaseNumbers::new(&["MLR-2024-000009"]);
    let port = InMemoryCasePort::with_cases(vec![TestCaseBuilder::new()
        .with_case_number("RTA/2024/17")
        .build()])
    .await
    .with_number_generator(numbers.clone());

    let err = port
        .create_case(CreateCaseRequest {
            owner_id: IdFixtures::owner_id(),
            case_number: Some("RTA/2024/17".to_string()),
        })
        .await
        .unwrap_err();

    assert_conflict(&err);
    assert_eq!(numbers.drawn(), 0);
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn empty_case_gets_critical_suggestions() {
    let case = TestCaseBuilder::new().build();
    let found = suggestions::analyze(&case);

    assert_eq!(
        assert_has_suggestion(&found, "claimant.missing").severity,
        Severity::Critical
    );
    assert_has_suggestion(&found, "prognosis.missing");
    assert_has_suggestion(&found, "expert.missing");
    assert_has_suggestion(&found, "treatments.none");
}

#[test]
fn realistic_case_has_no_critical_suggestions() {
    let case = TestCaseBuilder::new()
        .with_section(SectionPayload::ClaimantDetails(RealisticSections::claimant()))
        .with_section(SectionPayload::AccidentDetails(RealisticSections::accident()))
        .with_section(SectionPayload::PhysicalInjury(RealisticSections::physical()))
        .with_section(SectionPayload::Treatments(RealisticSections::treatments()))
        .with_section(SectionPayload::LifestyleImpact(RealisticSections::lifestyle()))
        .with_section(SectionPayload::WorkHistory(RealisticSections::work()))
        .with_section(SectionPayload::Prognosis(RealisticSections::prognosis()))
        .with_section(SectionPayload::ExpertDetails(RealisticSections::expert()))
        .build();

    let found = suggestions::analyze(&case);
    assert!(found.iter().all(|s| s.severity != Severity::Critical), "{:?}", found);
    assert_no_suggestion(&found, "psychological.untreated");
}

#[test]
fn examination_before_accident_is_flagged() {
    let case = TestCaseBuilder::new()
        .with_section(SectionPayload::AccidentDetails(AccidentDetails {
            accident_date: Some(DateFixtures::accident_date()),
            ..Default::default()
        }))
        .with_section(SectionPayload::ExpertDetails(ExpertDetails {
            examination_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..MinimalSections::expert()
        }))
        .build();

    let found = suggestions::analyze(&case);
    assert_has_suggestion(&found, "expert.examined_before_accident");
}

#[test]
fn severe_injury_without_treatment_is_flagged() {
    let case = TestCaseBuilder::new()
        .with_section(SectionPayload::PhysicalInjury(PhysicalInjury {
            injuries: vec![Injury {
                body_region: Some(BodyRegion::Knee),
                severity: Some(InjurySeverity::Severe),
                ..Default::default()
            }],
            ..Default::default()
        }))
        .build();
    assert_has_suggestion(&suggestions::analyze(&case), "physical.severe_untreated");

    let treated = TestCaseBuilder::new()
        .with_section(SectionPayload::PhysicalInjury(PhysicalInjury {
            injuries: vec![Injury {
                body_region: Some(BodyRegion::Knee),
                severity: Some(InjurySeverity::Severe),
                ..Default::default()
            }],
            ..Default::default()
        }))
        .with_minimal_sections(&[SectionId::Treatments])
        .build();
    assert_no_suggestion(&suggestions::analyze(&treated), "physical.severe_untreated");
}

#[test]
fn psychological_symptoms_without_counselling_are_flagged() {
    let case = TestCaseBuilder::new()
        .with_section(SectionPayload::PsychologicalInjuries(PsychologicalInjuries {
            conditions: vec![PsychologicalCondition {
                condition: Some(PsychologicalConditionKind::Anxiety),
                ..Default::default()
            }],
            ..Default::default()
        }))
        .build();
    assert_has_suggestion(&suggestions::analyze(&case), "psychological.untreated");
}

#[test]
fn contradictory_prognosis_is_flagged() {
    let case = TestCaseBuilder::new()
        .with_section(SectionPayload::Prognosis(Prognosis {
            outlook: Some(Outlook::FullRecovery),
            recovery_period_months: Some(6),
            permanent_impairment: Some(true),
            ..Default::default()
        }))
        .build();
    let found = suggestions::analyze(&case);
    assert_has_suggestion(&found, "prognosis.recovery_contradicts_impairment");
    assert_no_suggestion(&found, "prognosis.recovery_period_missing");
}

#[test]
fn working_claimant_without_time_off_is_flagged() {
    let case = TestCaseBuilder::new()
        .with_section(SectionPayload::WorkHistory(WorkHistory {
            employment_status: Some(EmploymentStatus::SelfEmployed),
            ..Default::default()
        }))
        .build();
    assert_has_suggestion(&suggestions::analyze(&case), "work.time_off_missing");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn completion_matches_formula(case in case_strategy()) {
        let complete = registry::sections()
            .iter()
            .filter(|d| (d.is_complete)(&case))
            .count();
        let expected = ((complete * 100) as f64 / 10.0).round() as u8;

        prop_assert!(case.completion_percentage() <= 100);
        prop_assert_eq!(case.completion_percentage(), expected);
    }

    #[test]
    fn adding_a_section_never_lowers_completion(case in case_strategy(), section in section_id_strategy()) {
        let before = case.completion_percentage();
        let mut updated = case.clone();
        updated.apply_section(MinimalSections::payload(section)).unwrap();

        prop_assert!(updated.completion_percentage() >= before);
        prop_assert!(registry::is_section_complete(&updated, section));
    }

    #[test]
    fn claimant_completeness_follows_defining_fields(claimant in claimant_strategy()) {
        let named = claimant.full_name.as_deref().is_some_and(|n| !n.trim().is_empty());
        let dated = claimant.date_of_birth.is_some();

        let case = TestCaseBuilder::new()
            .with_section(SectionPayload::ClaimantDetails(claimant))
            .build();

        prop_assert_eq!(registry::is_section_complete(&case, SectionId::ClaimantDetails), named && dated);
    }

    #[test]
    fn suggestions_are_deterministic(case in case_strategy()) {
        prop_assert_eq!(suggestions::analyze(&case), suggestions::analyze(&case));
    }

    #[test]
    fn section_json_round_trips_through_the_case(section in section_id_strategy()) {
        let payload = MinimalSections::payload(section);
        let json = payload.to_json().unwrap();
        let restored = SectionPayload::from_json(section, json).unwrap();

        let case = TestCaseBuilder::new().with_section(restored).build();
        prop_assert_eq!(case.sections.get(section), Some(payload));
    }
}

#[test]
fn sections_complete_once_filled() {
    let case = TestCaseBuilder::new().complete().build();
    for id in SectionId::ALL {
        assert_section_complete(&case, id);
    }
}
