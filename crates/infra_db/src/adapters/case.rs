//! PostgreSQL Case Adapter
//!
//! Implements `CasePort` on top of `CaseRepository`.
//!
//! Every write that depends on the current case (section saves, status
//! changes, recomputation) runs in one transaction: the row is locked with
//! `SELECT ... FOR UPDATE`, the domain aggregate applies the change, and the
//! new values are written back before commit. A failed validation or a
//! rejected transition rolls the transaction back, so nothing is partially
//! stored.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCaseAdapter;
//! use domain_case::CasePort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn CasePort> = Arc::new(PostgresCaseAdapter::new(pool));
//! let case = port.get_case(case_id).await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, AdapterType, CaseId, DomainPort, HealthCheckResult, HealthCheckable,
    PortError, UserId,
};
use domain_case::{
    Case, CaseNumberGenerator, CasePort, CaseQuery, CaseSections, CaseStatus, CreateCaseRequest,
    RandomCaseNumbers, SectionId, SectionPayload, CASE_NUMBER_ATTEMPTS,
};

use crate::error::DatabaseError;
use crate::repositories::case::{CaseRepository, CaseRow, CaseStatus as DbCaseStatus, NewCase};

const ADAPTER_ID: &str = "postgres-case-adapter";

/// PostgreSQL-backed implementation of the CasePort trait
///
/// # Error Handling
///
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - domain validation failures -> `PortError::Validation`
/// - other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresCaseAdapter {
    repository: CaseRepository,
    pool: PgPool,
    numbers: Arc<dyn CaseNumberGenerator>,
}

impl PostgresCaseAdapter {
    /// Creates a new PostgreSQL case adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CaseRepository::new(pool.clone()),
            pool,
            numbers: Arc::new(RandomCaseNumbers),
        }
    }

    /// Replaces the source of generated case numbers
    pub fn with_number_generator(mut self, numbers: Arc<dyn CaseNumberGenerator>) -> Self {
        self.numbers = numbers;
        self
    }

    /// Locks a case, applies `change` to the aggregate and stores what it reports
    async fn modify_locked<C>(&self, id: CaseId, change: C) -> Result<Case, PortError>
    where
        C: FnOnce(&mut Case) -> Result<Write, PortError> + Send,
    {
        let case_id: Uuid = id.into();
        let mut tx = self.repository.begin().await?;

        let row = CaseRepository::get_for_update(&mut *tx, case_id)
            .await
            .map_err(|e| not_found_as_case(e, id))?;
        let mut case = row_to_case(row)?;

        match change(&mut case)? {
            Write::Section { column, document } => {
                CaseRepository::update_section(
                    &mut *tx,
                    case_id,
                    column,
                    &document,
                    i16::from(case.completion_percentage()),
                    case.updated_at,
                )
                .await?;
            }
            Write::Status => {
                CaseRepository::update_status(
                    &mut *tx,
                    case_id,
                    status_to_db(case.status),
                    case.updated_at,
                )
                .await?;
            }
            Write::Completion => {
                CaseRepository::update_completion(
                    &mut *tx,
                    case_id,
                    i16::from(case.completion_percentage()),
                )
                .await?;
            }
        }

        tx.commit().await.map_err(DatabaseError::from)?;
        Ok(case)
    }
}

/// What a locked modification writes back
enum Write {
    Section {
        column: &'static str,
        document: serde_json::Value,
    },
    Status,
    Completion,
}

impl DomainPort for PostgresCaseAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCaseAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => {
                warn!(error = %e, "Case storage health check failed");
                (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e)))
            }
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            adapter_type: AdapterType::Internal,
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CasePort for PostgresCaseAdapter {
    #[instrument(skip(self), fields(owner_id = %query.owner_id))]
    async fn list_cases(&self, query: CaseQuery) -> Result<Vec<Case>, PortError> {
        debug!("Listing cases");

        let rows = self
            .repository
            .list_by_owner(
                query.owner_id.into(),
                query.status.map(status_to_db),
                i64::from(query.effective_limit()),
                i64::from(query.effective_offset()),
            )
            .await?;

        rows.into_iter().map(row_to_case).collect()
    }

    #[instrument(skip(self), fields(case_id = %id))]
    async fn get_case(&self, id: CaseId) -> Result<Case, PortError> {
        debug!("Fetching case");

        let row = self
            .repository
            .get_by_id(id.into())
            .await
            .map_err(|e| not_found_as_case(e, id))?;
        row_to_case(row)
    }

    #[instrument(skip(self, request), fields(owner_id = %request.owner_id))]
    async fn create_case(&self, request: CreateCaseRequest) -> Result<Case, PortError> {
        let generated = request.case_number.is_none();
        let number = request
            .case_number
            .unwrap_or_else(|| self.numbers.next_number(Utc::now()));
        let mut case = Case::new(request.owner_id, Some(number))?;

        // A generated number that hits the unique index is redrawn
        let mut attempt = 1;
        let row = loop {
            match self.repository.insert(&new_case(&case)).await {
                Ok(row) => break row,
                Err(DatabaseError::DuplicateEntry(message))
                    if generated && attempt < CASE_NUMBER_ATTEMPTS =>
                {
                    warn!(
                        case_number = %case.case_number,
                        attempt,
                        error = %message,
                        "Generated case number taken"
                    );
                    case.case_number = self.numbers.next_number(case.created_at);
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        debug!(case_id = %case.id, case_number = %case.case_number, "Created case");
        row_to_case(row)
    }

    #[instrument(skip(self, payload), fields(case_id = %id, section = %payload.section_id()))]
    async fn save_section(&self, id: CaseId, payload: SectionPayload) -> Result<Case, PortError> {
        let column = payload.section_id().column_name();
        let document = payload.to_json().map_err(DatabaseError::from)?;

        self.modify_locked(id, move |case| {
            case.apply_section(payload)?;
            Ok(Write::Section { column, document })
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %id, status = %status))]
    async fn update_status(&self, id: CaseId, status: CaseStatus) -> Result<Case, PortError> {
        self.modify_locked(id, move |case| {
            case.transition_to(status)?;
            Ok(Write::Status)
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %id))]
    async fn recompute_completion(&self, id: CaseId) -> Result<Case, PortError> {
        self.modify_locked(id, |case| {
            case.recompute_completion();
            Ok(Write::Completion)
        })
        .await
    }

    #[instrument(skip(self), fields(case_id = %id))]
    async fn delete_case(&self, id: CaseId) -> Result<(), PortError> {
        self.repository
            .delete(id.into())
            .await
            .map_err(|e| not_found_as_case(e, id))
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn not_found_as_case(error: DatabaseError, id: CaseId) -> PortError {
    if error.is_not_found() {
        PortError::not_found("Case", id)
    } else {
        error.into()
    }
}

fn new_case(case: &Case) -> NewCase {
    NewCase {
        case_id: case.id.into(),
        case_number: case.case_number.clone(),
        status: status_to_db(case.status),
        owner_id: case.owner_id.into(),
        completion_percentage: i16::from(case.completion_percentage()),
        created_at: case.created_at,
        updated_at: case.updated_at,
    }
}

fn status_to_db(status: CaseStatus) -> DbCaseStatus {
    match status {
        CaseStatus::InProgress => DbCaseStatus::InProgress,
        CaseStatus::Completed => DbCaseStatus::Completed,
        CaseStatus::Archived => DbCaseStatus::Archived,
    }
}

fn status_from_db(status: DbCaseStatus) -> CaseStatus {
    match status {
        DbCaseStatus::InProgress => CaseStatus::InProgress,
        DbCaseStatus::Completed => CaseStatus::Completed,
        DbCaseStatus::Archived => CaseStatus::Archived,
    }
}

fn row_to_case(row: CaseRow) -> Result<Case, PortError> {
    let mut sections = CaseSections::default();

    for (section, (column, document)) in SectionId::ALL.iter().zip(row.section_documents()) {
        debug_assert_eq!(section.column_name(), column);
        if let Some(document) = document {
            let payload = SectionPayload::from_json(*section, document.clone()).map_err(|e| {
                PortError::Transformation {
                    message: format!("Stored {} for case {} is unreadable: {}", column, row.case_id, e),
                }
            })?;
            sections.set(payload);
        }
    }

    Ok(Case::restore(
        CaseId::from_uuid(row.case_id),
        row.case_number,
        status_from_db(row.status),
        UserId::from_uuid(row.owner_id),
        sections,
        row.created_at,
        row.updated_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_row() -> CaseRow {
        CaseRow {
            case_id: Uuid::new_v4(),
            case_number: "MLR-2024-000001".to_string(),
            status: DbCaseStatus::InProgress,
            owner_id: Uuid::new_v4(),
            claimant_details: None,
            accident_details: None,
            physical_injury: None,
            psychological_injuries: None,
            treatments: None,
            lifestyle_impact: None,
            family_history: None,
            work_history: None,
            prognosis: None,
            expert_details: None,
            completion_percentage: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_conversion_roundtrip() {
        for status in [CaseStatus::InProgress, CaseStatus::Completed, CaseStatus::Archived] {
            assert_eq!(status_from_db(status_to_db(status)), status);
        }
    }

    #[test]
    fn test_row_to_case_reads_section_documents() {
        let mut row = empty_row();
        row.prognosis = Some(json!({ "outlook": "full_recovery" }));
        row.claimant_details = Some(json!({ "fullName": "Jane Doe", "dateOfBirth": "1985-06-15" }));

        let case = row_to_case(row).unwrap();
        assert!(case.sections.prognosis.is_some());
        assert!(case.sections.claimant_details.is_some());
        assert_eq!(case.completion_percentage(), 20);
    }

    #[test]
    fn test_row_to_case_recomputes_stale_percentage() {
        let mut row = empty_row();
        row.completion_percentage = 90;

        let case = row_to_case(row).unwrap();
        assert_eq!(case.completion_percentage(), 0);
    }

    #[test]
    fn test_unreadable_document_is_transformation_error() {
        let mut row = empty_row();
        row.work_history = Some(json!({ "employmentStatus": 42 }));

        let err = row_to_case(row).unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }

    #[test]
    fn test_not_found_reports_case_id() {
        let id = CaseId::new_v7();
        let err = not_found_as_case(DatabaseError::not_found("Case", id), id);
        assert!(err.is_not_found());
        assert!(err.to_string().contains(&id.to_string()));
    }
}
