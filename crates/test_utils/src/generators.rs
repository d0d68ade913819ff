//! Property-Based Test Generators
//!
//! Proptest strategies for section records and whole cases.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use core_kernel::{CaseId, UserId};
use domain_case::sections::{ClaimantDetails, ExpertDetails, InjurySeverity, Outlook, Prognosis};
use domain_case::{Case, SectionId};

use crate::builders::TestCaseBuilder;

/// Strategy for generating a section identifier
pub fn section_id_strategy() -> impl Strategy<Value = SectionId> {
    proptest::sample::select(SectionId::ALL.to_vec())
}

/// Strategy for generating an arbitrary subset of sections, in registry order
pub fn section_subset_strategy() -> impl Strategy<Value = Vec<SectionId>> {
    proptest::collection::vec(any::<bool>(), SectionId::ALL.len()).prop_map(|mask| {
        SectionId::ALL
            .iter()
            .zip(mask)
            .filter(|(_, included)| *included)
            .map(|(id, _)| *id)
            .collect()
    })
}

/// Strategy for generating a case whose sections are a random subset of
/// the minimal fixtures
pub fn case_strategy() -> impl Strategy<Value = Case> {
    (section_subset_strategy(), any::<[u8; 16]>()).prop_map(|(sections, bytes)| {
        TestCaseBuilder::new()
            .with_id(CaseId::from_uuid(uuid::Uuid::from_bytes(bytes)))
            .with_minimal_sections(&sections)
            .build()
    })
}

/// Strategy for generating UserId
pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
    any::<[u8; 16]>().prop_map(|bytes| UserId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating dates between 1930 and 2029
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..36_500i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(1930, 1, 1).unwrap_or_default() + Duration::days(days)
    })
}

/// Strategy for generating names, including blank ones
pub fn optional_name_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("   ".to_string())),
        "[A-Z][a-z]{2,10} [A-Z][a-z]{2,12}".prop_map(Some),
    ]
}

/// Strategy for generating claimant records with any mix of the defining fields
pub fn claimant_strategy() -> impl Strategy<Value = ClaimantDetails> {
    (optional_name_strategy(), proptest::option::of(date_strategy())).prop_map(
        |(full_name, date_of_birth)| ClaimantDetails {
            full_name,
            date_of_birth,
            ..Default::default()
        },
    )
}

/// Strategy for generating expert records with any mix of the defining fields
pub fn expert_strategy() -> impl Strategy<Value = ExpertDetails> {
    (optional_name_strategy(), proptest::option::of("[A-Z][a-z]{4,14}")).prop_map(
        |(expert_name, specialty)| ExpertDetails {
            expert_name,
            specialty,
            ..Default::default()
        },
    )
}

pub fn outlook_strategy() -> impl Strategy<Value = Outlook> {
    prop_oneof![
        Just(Outlook::FullRecovery),
        Just(Outlook::PartialRecovery),
        Just(Outlook::PermanentSymptoms),
        Just(Outlook::Uncertain),
    ]
}

pub fn severity_strategy() -> impl Strategy<Value = InjurySeverity> {
    prop_oneof![
        Just(InjurySeverity::Minor),
        Just(InjurySeverity::Moderate),
        Just(InjurySeverity::Severe),
    ]
}

/// Strategy for generating prognosis records within the validated ranges
pub fn prognosis_strategy() -> impl Strategy<Value = Prognosis> {
    (
        proptest::option::of(outlook_strategy()),
        proptest::option::of(0u16..=240u16),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(outlook, recovery_period_months, permanent_impairment)| Prognosis {
            outlook,
            recovery_period_months,
            permanent_impairment,
            ..Default::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_case::SectionPayload;

    proptest! {
        #[test]
        fn subsets_preserve_registry_order(sections in section_subset_strategy()) {
            let mut sorted = sections.clone();
            sorted.sort();
            prop_assert_eq!(sections, sorted);
        }

        #[test]
        fn generated_prognosis_is_valid(prognosis in prognosis_strategy()) {
            prop_assert!(SectionPayload::Prognosis(prognosis).validate().is_ok());
        }

        #[test]
        fn generated_cases_stay_in_range(case in case_strategy()) {
            prop_assert!(case.completion_percentage() <= 100);
        }
    }
}
