//! Repository implementations
//!
//! Repositories encapsulate SQL and map between database rows and plain
//! values. They never interpret section documents; that is the adapter's job.

pub mod case;

pub use case::CaseRepository;
