//! Section registry
//!
//! The fixed, ordered list of case sections. Navigation, progress display,
//! the completion calculator, the suggestion engine, and the report layout
//! all walk this list, so a section only exists once it is registered here
//! with a completion predicate.

use crate::case::Case;
use crate::sections::{present, SectionId};

/// Descriptor of one case section
#[derive(Debug, Clone, Copy)]
pub struct SectionDefinition {
    pub id: SectionId,
    /// Display name
    pub name: &'static str,
    /// Icon reference understood by the front end
    pub icon: &'static str,
    /// Pure completeness predicate over the section's sub-object
    pub is_complete: fn(&Case) -> bool,
}

/// Registered sections, in display order
///
/// Indexed by `SectionId` discriminant.
pub static SECTIONS: [SectionDefinition; 10] = [
    SectionDefinition {
        id: SectionId::ClaimantDetails,
        name: "Claimant Details",
        icon: "user",
        is_complete: claimant_details_complete,
    },
    SectionDefinition {
        id: SectionId::AccidentDetails,
        name: "Accident Details",
        icon: "car",
        is_complete: accident_details_complete,
    },
    SectionDefinition {
        id: SectionId::PhysicalInjury,
        name: "Physical Injury",
        icon: "activity",
        is_complete: physical_injury_complete,
    },
    SectionDefinition {
        id: SectionId::PsychologicalInjuries,
        name: "Psychological Injuries",
        icon: "brain",
        is_complete: psychological_injuries_complete,
    },
    SectionDefinition {
        id: SectionId::Treatments,
        name: "Treatments",
        icon: "stethoscope",
        is_complete: treatments_complete,
    },
    SectionDefinition {
        id: SectionId::LifestyleImpact,
        name: "Lifestyle Impact",
        icon: "home",
        is_complete: lifestyle_impact_complete,
    },
    SectionDefinition {
        id: SectionId::FamilyHistory,
        name: "Family History",
        icon: "users",
        is_complete: family_history_complete,
    },
    SectionDefinition {
        id: SectionId::WorkHistory,
        name: "Work History",
        icon: "briefcase",
        is_complete: work_history_complete,
    },
    SectionDefinition {
        id: SectionId::Prognosis,
        name: "Prognosis",
        icon: "trending-up",
        is_complete: prognosis_complete,
    },
    SectionDefinition {
        id: SectionId::ExpertDetails,
        name: "Expert Details",
        icon: "award",
        is_complete: expert_details_complete,
    },
];

/// All registered sections, in display order
pub fn sections() -> &'static [SectionDefinition] {
    &SECTIONS
}

/// The definition registered for a section
pub fn definition(id: SectionId) -> &'static SectionDefinition {
    &SECTIONS[id as usize]
}

/// Whether a section of the case satisfies its completeness predicate
pub fn is_section_complete(case: &Case, id: SectionId) -> bool {
    (definition(id).is_complete)(case)
}

fn claimant_details_complete(case: &Case) -> bool {
    case.sections
        .claimant_details
        .as_ref()
        .is_some_and(|c| present(&c.full_name) && c.date_of_birth.is_some())
}

fn accident_details_complete(case: &Case) -> bool {
    case.sections
        .accident_details
        .as_ref()
        .is_some_and(|a| a.accident_date.is_some() && a.accident_type.is_some())
}

fn physical_injury_complete(case: &Case) -> bool {
    case.sections
        .physical_injury
        .as_ref()
        .is_some_and(|p| !p.injuries.is_empty())
}

fn psychological_injuries_complete(case: &Case) -> bool {
    case.sections
        .psychological_injuries
        .as_ref()
        .is_some_and(|p| !p.conditions.is_empty())
}

fn treatments_complete(case: &Case) -> bool {
    case.sections
        .treatments
        .as_ref()
        .is_some_and(|t| !t.treatments.is_empty())
}

fn lifestyle_impact_complete(case: &Case) -> bool {
    case.sections
        .lifestyle_impact
        .as_ref()
        .is_some_and(|l| !l.affected_activities.is_empty() || present(&l.summary))
}

fn family_history_complete(case: &Case) -> bool {
    case.sections
        .family_history
        .as_ref()
        .is_some_and(|f| f.marital_status.is_some())
}

fn work_history_complete(case: &Case) -> bool {
    case.sections
        .work_history
        .as_ref()
        .is_some_and(|w| w.employment_status.is_some())
}

fn prognosis_complete(case: &Case) -> bool {
    case.sections
        .prognosis
        .as_ref()
        .is_some_and(|p| p.outlook.is_some())
}

fn expert_details_complete(case: &Case) -> bool {
    case.sections
        .expert_details
        .as_ref()
        .is_some_and(|e| present(&e.expert_name) && present(&e.specialty))
}
