//! Pre-built Test Fixtures
//!
//! Ready-to-use section records and identifiers. The `minimal_*` fixtures
//! carry exactly the fields a section's completeness predicate needs, so a
//! case holding all ten of them is 100% complete. The `realistic_*`
//! fixtures fill in names and addresses with `fake`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::faker::address::en::{CityName, PostCode, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::job::en::Title;
use fake::faker::name::en::Name;
use fake::Fake;
use once_cell::sync::Lazy;
use uuid::Uuid;

use core_kernel::{CaseId, UserId};
use domain_case::sections::{
    AccidentDetails, AccidentType, Activity, AffectedActivity, BodyRegion, ClaimantDetails,
    ClaimantPosition, EmploymentStatus, ExpertDetails, FamilyHistory, Gender, ImpactLevel,
    Injury, InjurySeverity, LifestyleImpact, MaritalStatus, Outlook, PhysicalInjury,
    Prognosis, PsychologicalCondition, PsychologicalConditionKind, PsychologicalInjuries,
    Treatment, TreatmentType, Treatments, WorkHistory,
};
use domain_case::{CaseNumberGenerator, SectionId, SectionPayload};

/// Fixture for date test data
pub struct DateFixtures;

impl DateFixtures {
    /// Standard accident date (Mar 15, 2024)
    pub fn accident_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Standard claimant date of birth
    pub fn date_of_birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()
    }

    /// Examination date, three months after the accident
    pub fn examination_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    /// First treatment date
    pub fn treatment_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    }

    /// Fixed timestamp for deterministic case metadata
    pub fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Deterministic case ID
    pub fn case_id() -> CaseId {
        CaseId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Deterministic author ID
    pub fn owner_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// A second user, for ownership tests
    pub fn other_user_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Standard case number
    pub fn case_number() -> &'static str {
        "MLR-2024-000001"
    }
}

/// Case number source that hands out a fixed sequence, repeating the last
///
/// Lets tests force a generated case number to collide with a stored one.
#[derive(Debug)]
pub struct SequenceCaseNumbers {
    numbers: Vec<String>,
    next: AtomicUsize,
}

impl SequenceCaseNumbers {
    pub fn new(numbers: &[&str]) -> Arc<Self> {
        assert!(!numbers.is_empty(), "at least one case number is required");
        Arc::new(Self {
            numbers: numbers.iter().map(|n| n.to_string()).collect(),
            next: AtomicUsize::new(0),
        })
    }

    /// How many numbers have been drawn
    pub fn drawn(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl CaseNumberGenerator for SequenceCaseNumbers {
    fn next_number(&self, _now: DateTime<Utc>) -> String {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.numbers[index.min(self.numbers.len() - 1)].clone()
    }
}

/// Section records with only the fields that make each section complete
pub struct MinimalSections;

impl MinimalSections {
    pub fn claimant() -> ClaimantDetails {
        ClaimantDetails {
            full_name: Some("Jane Doe".to_string()),
            date_of_birth: Some(DateFixtures::date_of_birth()),
            ..Default::default()
        }
    }

    pub fn accident() -> AccidentDetails {
        AccidentDetails {
            accident_date: Some(DateFixtures::accident_date()),
            accident_type: Some(AccidentType::RearEndCollision),
            ..Default::default()
        }
    }

    pub fn physical() -> PhysicalInjury {
        PhysicalInjury {
            injuries: vec![Injury {
                body_region: Some(BodyRegion::Neck),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    pub fn psychological() -> PsychologicalInjuries {
        PsychologicalInjuries {
            conditions: vec![PsychologicalCondition {
                condition: Some(PsychologicalConditionKind::TravelAnxiety),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    pub fn treatments() -> Treatments {
        Treatments {
            treatments: vec![Treatment {
                treatment_type: Some(TreatmentType::Physiotherapy),
                ..Default::default()
            }],
        }
    }

    pub fn lifestyle() -> LifestyleImpact {
        LifestyleImpact {
            affected_activities: vec![AffectedActivity {
                activity: Some(Activity::Sport),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    pub fn family() -> FamilyHistory {
        FamilyHistory {
            marital_status: Some(MaritalStatus::Married),
            ..Default::default()
        }
    }

    pub fn work() -> WorkHistory {
        WorkHistory {
            employment_status: Some(EmploymentStatus::Employed),
            ..Default::default()
        }
    }

    pub fn prognosis() -> Prognosis {
        Prognosis {
            outlook: Some(Outlook::FullRecovery),
            ..Default::default()
        }
    }

    pub fn expert() -> ExpertDetails {
        ExpertDetails {
            expert_name: Some("Dr Alan Grant".to_string()),
            specialty: Some("Orthopaedics".to_string()),
            ..Default::default()
        }
    }

    /// The minimal payload for one section
    pub fn payload(section: SectionId) -> SectionPayload {
        match section {
            SectionId::ClaimantDetails => SectionPayload::ClaimantDetails(Self::claimant()),
            SectionId::AccidentDetails => SectionPayload::AccidentDetails(Self::accident()),
            SectionId::PhysicalInjury => SectionPayload::PhysicalInjury(Self::physical()),
            SectionId::PsychologicalInjuries => {
                SectionPayload::PsychologicalInjuries(Self::psychological())
            }
            SectionId::Treatments => SectionPayload::Treatments(Self::treatments()),
            SectionId::LifestyleImpact => SectionPayload::LifestyleImpact(Self::lifestyle()),
            SectionId::FamilyHistory => SectionPayload::FamilyHistory(Self::family()),
            SectionId::WorkHistory => SectionPayload::WorkHistory(Self::work()),
            SectionId::Prognosis => SectionPayload::Prognosis(Self::prognosis()),
            SectionId::ExpertDetails => SectionPayload::ExpertDetails(Self::expert()),
        }
    }

    /// Minimal payloads for every section, in registry order
    pub fn all() -> Vec<SectionPayload> {
        SectionId::ALL.iter().map(|id| Self::payload(*id)).collect()
    }
}

/// A fully documented expert, shared across tests
pub static EXPERT: Lazy<ExpertDetails> = Lazy::new(|| ExpertDetails {
    expert_name: Some("Dr Ellie Sattler".to_string()),
    qualifications: Some("MBChB FRCS (Tr & Orth)".to_string()),
    specialty: Some("Orthopaedic Surgery".to_string()),
    registration_number: Some("GMC-7012345".to_string()),
    email: Some("e.sattler@example.com".to_string()),
    examination_date: Some(DateFixtures::examination_date()),
    examination_location: Some("Harley Street Clinic, London".to_string()),
    statement_of_truth: Some(true),
});

/// Section records with most fields populated
pub struct RealisticSections;

impl RealisticSections {
    pub fn claimant() -> ClaimantDetails {
        let street: String = StreetName().fake();
        let city: String = CityName().fake();
        let post_code: String = PostCode().fake();

        ClaimantDetails {
            full_name: Some(Name().fake()),
            date_of_birth: Some(DateFixtures::date_of_birth()),
            gender: Some(Gender::Female),
            address: Some(format!("12 {}, {} {}", street, city, post_code)),
            occupation: Some(Title().fake()),
            contact_number: Some("07700 900123".to_string()),
            email: Some(SafeEmail().fake()),
            identity_verified: Some(true),
            ..Default::default()
        }
    }

    pub fn accident() -> AccidentDetails {
        AccidentDetails {
            accident_date: Some(DateFixtures::accident_date()),
            accident_time: Some("08:45".to_string()),
            location: Some(format!("Junction of {}", StreetName().fake::<String>())),
            accident_type: Some(AccidentType::RearEndCollision),
            claimant_position: Some(ClaimantPosition::Driver),
            seatbelt_worn: Some(true),
            airbag_deployed: Some(false),
            vehicle_damage: Some("Rear bumper and boot crushed".to_string()),
            description: Some("Stationary at lights when struck from behind.".to_string()),
            ..Default::default()
        }
    }

    pub fn physical() -> PhysicalInjury {
        PhysicalInjury {
            injuries: vec![
                Injury {
                    body_region: Some(BodyRegion::Neck),
                    description: Some("Pain and stiffness on rotation".to_string()),
                    diagnosis: Some("Whiplash associated disorder grade II".to_string()),
                    pain_scale: Some(6),
                    onset: Some(DateFixtures::accident_date()),
                    current_status: Some("Improving".to_string()),
                    severity: Some(InjurySeverity::Moderate),
                    ..Default::default()
                },
                Injury {
                    body_region: Some(BodyRegion::LowerBack),
                    description: Some("Ache after prolonged sitting".to_string()),
                    diagnosis: Some("Soft tissue strain".to_string()),
                    pain_scale: Some(3),
                    onset: Some(DateFixtures::accident_date()),
                    severity: Some(InjurySeverity::Minor),
                    ..Default::default()
                },
            ],
            additional_notes: None,
        }
    }

    pub fn treatments() -> Treatments {
        Treatments {
            treatments: vec![
                Treatment {
                    treatment_type: Some(TreatmentType::Physiotherapy),
                    provider: Some(format!("{} Physio", CompanyName().fake::<String>())),
                    start_date: Some(DateFixtures::treatment_start()),
                    sessions: Some(6),
                    ongoing: Some(true),
                    ..Default::default()
                },
                Treatment {
                    treatment_type: Some(TreatmentType::Counselling),
                    provider: Some("NHS Talking Therapies".to_string()),
                    start_date: Some(DateFixtures::treatment_start()),
                    ..Default::default()
                },
            ],
        }
    }

    pub fn lifestyle() -> LifestyleImpact {
        LifestyleImpact {
            affected_activities: vec![AffectedActivity {
                activity: Some(Activity::Sport),
                impact_level: Some(ImpactLevel::Unable),
                description: Some("Stopped weekly five-a-side football".to_string()),
                ..Default::default()
            }],
            sleep_disturbance: Some(true),
            ..Default::default()
        }
    }

    pub fn work() -> WorkHistory {
        WorkHistory {
            employment_status: Some(EmploymentStatus::Employed),
            employer: Some(CompanyName().fake()),
            job_title: Some(Title().fake()),
            time_off_work_days: Some(14),
            returned_to_work: Some(true),
            ..Default::default()
        }
    }

    pub fn prognosis() -> Prognosis {
        Prognosis {
            outlook: Some(Outlook::FullRecovery),
            recovery_period_months: Some(9),
            permanent_impairment: Some(false),
            opinion: Some("Symptoms should resolve within nine months of the accident.".to_string()),
            ..Default::default()
        }
    }

    pub fn expert() -> ExpertDetails {
        EXPERT.clone()
    }
}
