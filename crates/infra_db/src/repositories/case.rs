//! Case repository implementation
//!
//! Database access for the `cases` table. Each report section lives in its
//! own nullable JSONB column; the repository reads and writes those
//! documents as raw JSON and leaves their interpretation to the adapter.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate compiles
//! without a live database or an offline query cache.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Every section column, in registry order
pub const SECTION_COLUMNS: [&str; 10] = [
    "claimant_details",
    "accident_details",
    "physical_injury",
    "psychological_injuries",
    "treatments",
    "lifestyle_impact",
    "family_history",
    "work_history",
    "prognosis",
    "expert_details",
];

const SELECT_CASE: &str = r#"
    SELECT
        case_id,
        case_number,
        status,
        owner_id,
        claimant_details,
        accident_details,
        physical_injury,
        psychological_injuries,
        treatments,
        lifestyle_impact,
        family_history,
        work_history,
        prognosis,
        expert_details,
        completion_percentage,
        created_at,
        updated_at
    FROM cases
"#;

/// Repository for the `cases` table
#[derive(Debug, Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    /// Creates a new CaseRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Starts a transaction for a read-modify-write sequence
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, DatabaseError> {
        Ok(self.pool.begin().await?)
    }

    /// Retrieves a case by its identifier
    pub async fn get_by_id(&self, case_id: Uuid) -> Result<CaseRow, DatabaseError> {
        sqlx::query_as::<_, CaseRow>(&format!("{} WHERE case_id = $1", SELECT_CASE))
            .bind(case_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Case", case_id))
    }

    /// Retrieves a case and locks its row until the transaction ends
    pub async fn get_for_update(
        conn: &mut PgConnection,
        case_id: Uuid,
    ) -> Result<CaseRow, DatabaseError> {
        sqlx::query_as::<_, CaseRow>(&format!(
            "{} WHERE case_id = $1 FOR UPDATE",
            SELECT_CASE
        ))
        .bind(case_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Case", case_id))
    }

    /// Lists an owner's cases, most recently updated first
    pub async fn list_by_owner(
        &self,
        owner_id: Uuid,
        status: Option<CaseStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CaseRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CaseRow>(&format!(
            r#"{}
            WHERE owner_id = $1
              AND ($2::case_status IS NULL OR status = $2)
            ORDER BY updated_at DESC, case_id DESC
            LIMIT $3 OFFSET $4"#,
            SELECT_CASE
        ))
        .bind(owner_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a new, empty case
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` when the case number is taken
    pub async fn insert(&self, case: &NewCase) -> Result<CaseRow, DatabaseError> {
        let result = sqlx::query_as::<_, CaseRow>(
            r#"
            INSERT INTO cases (
                case_id, case_number, status, owner_id,
                completion_percentage, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                case_id, case_number, status, owner_id,
                claimant_details, accident_details, physical_injury,
                psychological_injuries, treatments, lifestyle_impact,
                family_history, work_history, prognosis, expert_details,
                completion_percentage, created_at, updated_at
            "#,
        )
        .bind(case.case_id)
        .bind(&case.case_number)
        .bind(case.status)
        .bind(case.owner_id)
        .bind(case.completion_percentage)
        .bind(case.created_at)
        .bind(case.updated_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(e) => match DatabaseError::from(e) {
                DatabaseError::DuplicateEntry(_) => {
                    Err(DatabaseError::duplicate("Case", "case_number", &case.case_number))
                }
                other => Err(other),
            },
        }
    }

    /// Writes one section document and the recomputed percentage
    pub async fn update_section(
        conn: &mut PgConnection,
        case_id: Uuid,
        column: &str,
        document: &Value,
        completion_percentage: i16,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        if !SECTION_COLUMNS.contains(&column) {
            return Err(DatabaseError::QueryFailed(format!(
                "unknown section column '{}'",
                column
            )));
        }

        let sql = format!(
            "UPDATE cases SET {} = $2, completion_percentage = $3, updated_at = $4 WHERE case_id = $1",
            column
        );
        let result = sqlx::query(&sql)
            .bind(case_id)
            .bind(document)
            .bind(completion_percentage)
            .bind(updated_at)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Case", case_id));
        }
        Ok(())
    }

    /// Writes the status
    pub async fn update_status(
        conn: &mut PgConnection,
        case_id: Uuid,
        status: CaseStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE cases SET status = $2, updated_at = $3 WHERE case_id = $1",
        )
        .bind(case_id)
        .bind(status)
        .bind(updated_at)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Case", case_id));
        }
        Ok(())
    }

    /// Writes the completion percentage
    pub async fn update_completion(
        conn: &mut PgConnection,
        case_id: Uuid,
        completion_percentage: i16,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE cases SET completion_percentage = $2 WHERE case_id = $1")
            .bind(case_id)
            .bind(completion_percentage)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Case", case_id));
        }
        Ok(())
    }

    /// Deletes a case
    pub async fn delete(&self, case_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM cases WHERE case_id = $1")
            .bind(case_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Case", case_id));
        }
        Ok(())
    }
}

// ============================================================================
// Database Types
// ============================================================================

/// Case status as stored in the `case_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "case_status", rename_all = "snake_case")]
pub enum CaseStatus {
    InProgress,
    Completed,
    Archived,
}

/// One row of the `cases` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CaseRow {
    pub case_id: Uuid,
    pub case_number: String,
    pub status: CaseStatus,
    pub owner_id: Uuid,
    pub claimant_details: Option<Value>,
    pub accident_details: Option<Value>,
    pub physical_injury: Option<Value>,
    pub psychological_injuries: Option<Value>,
    pub treatments: Option<Value>,
    pub lifestyle_impact: Option<Value>,
    pub family_history: Option<Value>,
    pub work_history: Option<Value>,
    pub prognosis: Option<Value>,
    pub expert_details: Option<Value>,
    pub completion_percentage: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseRow {
    /// Section documents paired with their column names, in registry order
    pub fn section_documents(&self) -> [(&'static str, Option<&Value>); 10] {
        [
            (SECTION_COLUMNS[0], self.claimant_details.as_ref()),
            (SECTION_COLUMNS[1], self.accident_details.as_ref()),
            (SECTION_COLUMNS[2], self.physical_injury.as_ref()),
            (SECTION_COLUMNS[3], self.psychological_injuries.as_ref()),
            (SECTION_COLUMNS[4], self.treatments.as_ref()),
            (SECTION_COLUMNS[5], self.lifestyle_impact.as_ref()),
            (SECTION_COLUMNS[6], self.family_history.as_ref()),
            (SECTION_COLUMNS[7], self.work_history.as_ref()),
            (SECTION_COLUMNS[8], self.prognosis.as_ref()),
            (SECTION_COLUMNS[9], self.expert_details.as_ref()),
        ]
    }
}

/// Values for inserting a new case
#[derive(Debug, Clone)]
pub struct NewCase {
    pub case_id: Uuid,
    pub case_number: String,
    pub status: CaseStatus,
    pub owner_id: Uuid,
    pub completion_percentage: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
