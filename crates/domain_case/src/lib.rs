//! Case Domain
//!
//! A case is one claimant's medical-legal report record. Its data is split
//! into ten independently saved sections (claimant, accident, physical and
//! psychological injuries, treatments, lifestyle, family, work, prognosis,
//! expert). This crate owns:
//!
//! - the section records and their validation rules
//! - the section registry with per-section completeness predicates
//! - the completion calculator
//! - the documentation suggestion engine (a static rule table)
//! - the `CasePort` storage abstraction
//!
//! # Examples
//!
//! ```rust
//! use domain_case::{Case, SectionPayload, completion};
//! use domain_case::sections::ClaimantDetails;
//! use core_kernel::UserId;
//! use chrono::NaiveDate;
//!
//! let mut case = Case::new(UserId::new_v7(), None).unwrap();
//! assert_eq!(case.completion_percentage(), 0);
//!
//! case.apply_section(SectionPayload::ClaimantDetails(ClaimantDetails {
//!     full_name: Some("Jane Doe".to_string()),
//!     date_of_birth: NaiveDate::from_ymd_opt(1985, 6, 15),
//!     ..Default::default()
//! }))
//! .unwrap();
//!
//! assert_eq!(case.completion_percentage(), 10);
//! assert_eq!(completion::progress(&case).completed_sections, 1);
//! ```

pub mod case;
pub mod error;
pub mod sections;
pub mod registry;
pub mod completion;
pub mod suggestions;
pub mod ports;

pub use case::{
    generate_case_number, Case, CaseNumberGenerator, CaseSections, CaseStatus, RandomCaseNumbers,
    CASE_NUMBER_ATTEMPTS,
};
pub use error::CaseError;
pub use sections::{FieldError, SectionId, SectionPayload, SectionRecord, ValidationReport};
pub use registry::{SectionDefinition, SECTIONS};
pub use completion::{CompletionReport, SectionProgress};
pub use suggestions::{Severity, Suggestion, SuggestionSummary};
pub use ports::{CasePort, CasePortExt, CaseQuery, CreateCaseRequest};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryCasePort;
