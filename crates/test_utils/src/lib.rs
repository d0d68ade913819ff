//! Test Utilities Crate
//!
//! Shared test infrastructure for the medical-legal report workspace.
//!
//! # Modules
//!
//! - `fixtures`: Minimal and realistic section records, identifiers, dates
//! - `builders`: Builder for cases with chosen sections and status
//! - `database`: PostgreSQL testcontainer helpers
//! - `assertions`: Assertion helpers for cases, errors and suggestions
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
