//! Core Kernel - Foundational types for the medical-legal report system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed identifiers for cases and users
//! - Port infrastructure (errors, health checks) for swappable storage adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{CaseId, UserId};
pub use ports::{
    PortError, DomainPort, AdapterType, AdapterHealth,
    HealthCheckResult, HealthCheckable,
};
