//! Domain Adapters
//!
//! Implementations of domain ports on top of the repository layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCaseAdapter;
//! use domain_case::CasePort;
//!
//! let adapter = PostgresCaseAdapter::new(pool);
//! let case = adapter.get_case(case_id).await?;
//! ```

pub mod case;

pub use case::PostgresCaseAdapter;
