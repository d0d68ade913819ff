//! Infrastructure Database Layer
//!
//! PostgreSQL storage for medical-legal cases using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. `CaseRepository` owns the SQL
//! and works with raw rows; `PostgresCaseAdapter` implements the domain's
//! `CasePort` on top of it and converts rows into `Case` aggregates.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresCaseAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/medlegal")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresCaseAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::CaseRepository;
pub use adapters::PostgresCaseAdapter;
