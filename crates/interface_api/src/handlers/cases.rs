//! Case handlers
//!
//! Every handler resolves the case through `get_owned_case`, so another
//! user's case is indistinguishable from a missing one.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use core_kernel::CaseId;
use domain_case::{
    completion, suggestions, CasePort, CasePortExt, CaseQuery, CaseStatus, CompletionReport,
    SectionId,
};

use crate::auth::CurrentUser;
use crate::dto::cases::*;
use crate::{error::ApiError, AppState};

/// Lists the caller's cases, most recently updated first
pub async fn list_cases(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ListCasesParams>,
) -> Result<Json<Vec<CaseSummaryResponse>>, ApiError> {
    params.validate().map_err(ApiError::from_validation)?;

    let mut query = CaseQuery::for_owner(user);
    if let Some(status) = params.status.as_deref() {
        let status: CaseStatus = status.parse().map_err(ApiError::BadRequest)?;
        query = query.with_status(status);
    }
    query.limit = params.limit;
    query.offset = params.offset;

    let cases = state.cases.list_cases(query).await?;
    Ok(Json(cases.iter().map(CaseSummaryResponse::from).collect()))
}

/// Creates an empty case for the caller
pub async fn create_case(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<CreateCaseBody>,
) -> Result<(StatusCode, Json<CaseResponse>), ApiError> {
    body.validate().map_err(ApiError::from_validation)?;

    let case = state
        .cases
        .create_case(domain_case::CreateCaseRequest {
            owner_id: user,
            case_number: body.case_number,
        })
        .await?;

    info!(case_id = %case.id, case_number = %case.case_number, "Case created");
    Ok((StatusCode::CREATED, Json(case.into())))
}

/// Gets a case by ID
pub async fn get_case(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;
    Ok(Json(case.into()))
}

/// Permanently deletes a case
pub async fn delete_case(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;
    state.cases.delete_case(case.id).await?;

    info!(case_id = %case.id, "Case deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Moves a case through its lifecycle
pub async fn update_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;
    let updated = state.cases.update_status(case.id, body.status).await?;

    info!(case_id = %updated.id, from = %case.status, to = %updated.status, "Case status changed");
    Ok(Json(updated.into()))
}

/// Recomputes and stores the completion percentage
pub async fn recompute_completion(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CompletionReport>, ApiError> {
    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;
    let updated = state.cases.recompute_completion(case.id).await?;
    Ok(Json(completion::progress(&updated)))
}

/// Per-section progress plus the overall percentage
pub async fn get_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CompletionReport>, ApiError> {
    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;
    Ok(Json(completion::progress(&case)))
}

/// Documentation suggestions, optionally for one section
pub async fn get_suggestions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Query(params): Query<SuggestionsParams>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;

    let found = match params.section.as_deref() {
        Some(section) => {
            let section: SectionId = section.parse()?;
            suggestions::analyze_section(&case, section)
        }
        None => suggestions::analyze(&case),
    };

    Ok(Json(SuggestionsResponse::new(found)))
}

/// HTML report preview
pub async fn get_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;
    let html = state.renderer.render(&case)?;
    Ok(Html(html))
}
