//! Case Domain Ports
//!
//! The `CasePort` trait is everything the application needs from case
//! storage. Two adapters implement it:
//!
//! - **PostgreSQL adapter** (`infra_db::PostgresCaseAdapter`)
//! - **In-memory adapter** ([`mock::InMemoryCasePort`], behind the `mock` feature)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_case::ports::CasePort;
//! use std::sync::Arc;
//!
//! pub struct AppState {
//!     cases: Arc<dyn CasePort>,
//! }
//!
//! let case = state.cases.get_case(case_id).await?;
//! ```
//!
//! Concurrent writers are last-write-wins: `save_section` replaces one
//! section and its completion percentage in a single write, without
//! version checks.

use async_trait::async_trait;

use core_kernel::{CaseId, DomainPort, HealthCheckable, PortError, UserId};

use crate::case::{Case, CaseStatus};
use crate::sections::SectionPayload;

/// Default page size when a query has no limit
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 200;

/// Query parameters for listing cases
#[derive(Debug, Clone)]
pub struct CaseQuery {
    /// Only cases owned by this user
    pub owner_id: UserId,
    /// Filter by status
    pub status: Option<CaseStatus>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl CaseQuery {
    /// All cases of one owner
    pub fn for_owner(owner_id: UserId) -> Self {
        Self {
            owner_id,
            status: None,
            limit: None,
            offset: None,
        }
    }

    /// Restricts the query to one status
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// The effective page size, clamped to [`MAX_PAGE_SIZE`]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn effective_offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

/// Request for creating a new case
#[derive(Debug, Clone)]
pub struct CreateCaseRequest {
    /// The authoring user
    pub owner_id: UserId,
    /// Case number; generated when absent
    pub case_number: Option<String>,
}

/// The port trait for case storage
///
/// All methods are async and return `Result<T, PortError>` so handlers
/// treat every adapter the same way.
#[async_trait]
pub trait CasePort: DomainPort + HealthCheckable {
    /// Lists cases matching the query, most recently updated first
    async fn list_cases(&self, query: CaseQuery) -> Result<Vec<Case>, PortError>;

    /// Retrieves a case by ID
    ///
    /// # Returns
    ///
    /// The case if found, or `PortError::NotFound`
    async fn get_case(&self, id: CaseId) -> Result<Case, PortError>;

    /// Creates an empty in-progress case
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` when the case number is already taken
    async fn create_case(&self, request: CreateCaseRequest) -> Result<Case, PortError>;

    /// Replaces one section's sub-object and recomputes completion
    ///
    /// Nothing is written when validation fails or the case is archived.
    async fn save_section(&self, id: CaseId, payload: SectionPayload) -> Result<Case, PortError>;

    /// Moves the case through its lifecycle
    async fn update_status(&self, id: CaseId, status: CaseStatus) -> Result<Case, PortError>;

    /// Recomputes and stores the completion percentage
    async fn recompute_completion(&self, id: CaseId) -> Result<Case, PortError>;

    /// Permanently deletes a case
    async fn delete_case(&self, id: CaseId) -> Result<(), PortError>;
}

/// Convenience methods available on every `CasePort`
#[async_trait]
pub trait CasePortExt: CasePort {
    /// Fetches a case only if it belongs to `owner_id`
    ///
    /// A case owned by someone else is reported as not found.
    async fn get_owned_case(&self, id: CaseId, owner_id: UserId) -> Result<Case, PortError> {
        let case = self.get_case(id).await?;
        if case.owner_id != owner_id {
            return Err(PortError::not_found("Case", id));
        }
        Ok(case)
    }
}

impl<T: CasePort + ?Sized> CasePortExt for T {}

/// In-memory implementation of CasePort
///
/// Holds cases in a map and is used by unit and API tests that run
/// without a database.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tracing::debug;

    use core_kernel::{AdapterHealth, AdapterType, HealthCheckResult};

    use crate::case::{CaseNumberGenerator, RandomCaseNumbers, CASE_NUMBER_ATTEMPTS};

    /// In-memory case store
    #[derive(Debug, Clone)]
    pub struct InMemoryCasePort {
        cases: Arc<RwLock<HashMap<CaseId, Case>>>,
        numbers: Arc<dyn CaseNumberGenerator>,
    }

    impl Default for InMemoryCasePort {
        fn default() -> Self {
            Self {
                cases: Arc::default(),
                numbers: Arc::new(RandomCaseNumbers),
            }
        }
    }

    impl InMemoryCasePort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Replaces the source of generated case numbers
        pub fn with_number_generator(mut self, numbers: Arc<dyn CaseNumberGenerator>) -> Self {
            self.numbers = numbers;
            self
        }

        /// Pre-populates the store
        pub async fn with_cases(cases: Vec<Case>) -> Self {
            let port = Self::new();
            {
                let mut store = port.cases.write().await;
                for case in cases {
                    store.insert(case.id, case);
                }
            }
            port
        }

        /// Number of stored cases
        pub async fn len(&self) -> usize {
            self.cases.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.cases.read().await.is_empty()
        }

        async fn modify<F>(&self, id: CaseId, change: F) -> Result<Case, PortError>
        where
            F: FnOnce(&mut Case) -> Result<(), PortError> + Send,
        {
            let mut cases = self.cases.write().await;
            let stored = cases
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Case", id))?;

            // Work on a copy so a failed change leaves the stored case untouched
            let mut updated = stored.clone();
            change(&mut updated)?;
            *stored = updated.clone();
            Ok(updated)
        }
    }

    impl DomainPort for InMemoryCasePort {}

    #[async_trait]
    impl HealthCheckable for InMemoryCasePort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-case-port".to_string(),
                adapter_type: AdapterType::Mock,
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("In-memory adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl CasePort for InMemoryCasePort {
        async fn list_cases(&self, query: CaseQuery) -> Result<Vec<Case>, PortError> {
            let cases = self.cases.read().await;
            let mut results: Vec<Case> = cases
                .values()
                .filter(|c| c.owner_id == query.owner_id)
                .filter(|c| query.status.map_or(true, |status| c.status == status))
                .cloned()
                .collect();

            results.sort_by(|a, b| {
                b.updated_at
                    .cmp(&a.updated_at)
                    .then_with(|| b.id.cmp(&a.id))
            });

            Ok(results
                .into_iter()
                .skip(query.effective_offset() as usize)
                .take(query.effective_limit() as usize)
                .collect())
        }

        async fn get_case(&self, id: CaseId) -> Result<Case, PortError> {
            self.cases
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Case", id))
        }

        async fn create_case(&self, request: CreateCaseRequest) -> Result<Case, PortError> {
            let generated = request.case_number.is_none();
            let number = request
                .case_number
                .unwrap_or_else(|| self.numbers.next_number(Utc::now()));
            let mut case = Case::new(request.owner_id, Some(number))?;

            let mut cases = self.cases.write().await;
            let mut attempt = 1;
            while cases.values().any(|c| c.case_number == case.case_number) {
                if !generated || attempt == CASE_NUMBER_ATTEMPTS {
                    return Err(PortError::conflict(format!(
                        "Case number {} already exists",
                        case.case_number
                    )));
                }
                debug!(case_number = %case.case_number, attempt, "Generated case number taken");
                case.case_number = self.numbers.next_number(case.created_at);
                attempt += 1;
            }
            debug!(case_id = %case.id, case_number = %case.case_number, "Created case");
            cases.insert(case.id, case.clone());
            Ok(case)
        }

        async fn save_section(&self, id: CaseId, payload: SectionPayload) -> Result<Case, PortError> {
            self.modify(id, |case| case.apply_section(payload).map_err(PortError::from))
                .await
        }

        async fn update_status(&self, id: CaseId, status: CaseStatus) -> Result<Case, PortError> {
            self.modify(id, |case| case.transition_to(status).map_err(PortError::from))
                .await
        }

        async fn recompute_completion(&self, id: CaseId) -> Result<Case, PortError> {
            self.modify(id, |case| {
                case.recompute_completion();
                Ok(())
            })
            .await
        }

        async fn delete_case(&self, id: CaseId) -> Result<(), PortError> {
            self.cases
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Case", id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::InMemoryCasePort;
    use super::*;
    use crate::sections::{ClaimantDetails, InjurySeverity, PhysicalInjury};
    use chrono::NaiveDate;

    fn claimant() -> SectionPayload {
        SectionPayload::ClaimantDetails(ClaimantDetails {
            full_name: Some("Jane Doe".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 6, 15),
            ..Default::default()
        })
    }

    fn create_request(owner_id: UserId) -> CreateCaseRequest {
        CreateCaseRequest {
            owner_id,
            case_number: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let port = InMemoryCasePort::new();
        let owner = UserId::new_v7();

        let case = port.create_case(create_request(owner)).await.unwrap();
        assert_eq!(case.status, CaseStatus::InProgress);
        assert_eq!(case.completion_percentage(), 0);

        let retrieved = port.get_case(case.id).await.unwrap();
        assert_eq!(retrieved, case);
    }

    #[tokio::test]
    async fn test_duplicate_case_number_conflicts() {
        let port = InMemoryCasePort::new();
        let owner = UserId::new_v7();
        let request = CreateCaseRequest {
            owner_id: owner,
            case_number: Some("MLR-2024-000001".to_string()),
        };

        port.create_case(request.clone()).await.unwrap();
        let err = port.create_case(request).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_save_section_recomputes_completion() {
        let port = InMemoryCasePort::new();
        let case = port.create_case(create_request(UserId::new_v7())).await.unwrap();

        let saved = port.save_section(case.id, claimant()).await.unwrap();
        assert_eq!(saved.completion_percentage(), 10);
        assert!(saved.sections.claimant_details.is_some());
    }

    #[tokio::test]
    async fn test_invalid_section_leaves_case_unchanged() {
        let port = InMemoryCasePort::new();
        let case = port.create_case(create_request(UserId::new_v7())).await.unwrap();

        let invalid = SectionPayload::PhysicalInjury(PhysicalInjury {
            injuries: vec![crate::sections::Injury {
                pain_scale: Some(11),
                severity: Some(InjurySeverity::Minor),
                ..Default::default()
            }],
            ..Default::default()
        });
        let err = port.save_section(case.id, invalid).await.unwrap_err();
        assert!(matches!(err, PortError::Validation { .. }));

        let stored = port.get_case(case.id).await.unwrap();
        assert!(stored.sections.physical_injury.is_none());
        assert_eq!(stored.updated_at, case.updated_at);
    }

    #[tokio::test]
    async fn test_archived_case_rejects_saves() {
        let port = InMemoryCasePort::new();
        let case = port.create_case(create_request(UserId::new_v7())).await.unwrap();
        port.update_status(case.id, CaseStatus::Archived).await.unwrap();

        let err = port.save_section(case.id, claimant()).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_list_filters_by_owner_and_status() {
        let port = InMemoryCasePort::new();
        let owner = UserId::new_v7();
        let other = UserId::new_v7();

        let first = port.create_case(create_request(owner)).await.unwrap();
        port.create_case(create_request(owner)).await.unwrap();
        port.create_case(create_request(other)).await.unwrap();
        port.update_status(first.id, CaseStatus::Completed).await.unwrap();

        let all = port.list_cases(CaseQuery::for_owner(owner)).await.unwrap();
        assert_eq!(all.len(), 2);
        // Most recently updated first
        assert_eq!(all[0].id, first.id);

        let completed = port
            .list_cases(CaseQuery::for_owner(owner).with_status(CaseStatus::Completed))
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);

        let page = port
            .list_cases(CaseQuery::for_owner(owner).paginate(1, 1))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_ne!(page[0].id, first.id);
    }

    #[tokio::test]
    async fn test_get_owned_case_hides_foreign_cases() {
        let port = InMemoryCasePort::new();
        let owner = UserId::new_v7();
        let case = port.create_case(create_request(owner)).await.unwrap();

        assert!(port.get_owned_case(case.id, owner).await.is_ok());
        let err = port.get_owned_case(case.id, UserId::new_v7()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_case() {
        let port = InMemoryCasePort::new();
        let case = port.create_case(create_request(UserId::new_v7())).await.unwrap();

        port.delete_case(case.id).await.unwrap();
        assert!(port.get_case(case.id).await.unwrap_err().is_not_found());
        assert!(port.delete_case(case.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_health_check() {
        let port = InMemoryCasePort::new();
        let health = port.health_check().await;
        assert!(health.status.is_operational());
    }
}
