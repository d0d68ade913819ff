//! Section handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use core_kernel::CaseId;
use domain_case::{registry, CasePort, CasePortExt, SectionId, SectionPayload};

use crate::auth::CurrentUser;
use crate::dto::cases::CaseResponse;
use crate::dto::sections::*;
use crate::{error::ApiError, AppState};

/// The section registry, in display order
pub async fn list_sections() -> Json<Vec<SectionDefinitionResponse>> {
    Json(
        registry::sections()
            .iter()
            .enumerate()
            .map(|(position, definition)| SectionDefinitionResponse::new(position, definition))
            .collect(),
    )
}

/// One section's stored sub-object and completeness
pub async fn get_section(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, section)): Path<(Uuid, String)>,
) -> Result<Json<SectionResponse>, ApiError> {
    let section: SectionId = section.parse()?;
    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;
    let definition = registry::definition(section);

    let data = case
        .sections
        .get(section)
        .map(|payload| payload.to_json())
        .transpose()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(SectionResponse {
        id: section,
        name: definition.name,
        complete: (definition.is_complete)(&case),
        data,
    }))
}

/// Replaces one section's sub-object
///
/// The payload is decoded and validated before anything is stored, so a
/// rejected save reports every offending field and leaves the case as it was.
pub async fn save_section(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, section)): Path<(Uuid, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CaseResponse>, ApiError> {
    let section: SectionId = section.parse()?;
    let Json(body) = body?;

    let case = state.cases.get_owned_case(CaseId::from_uuid(id), user).await?;

    let payload = SectionPayload::from_json(section, body)?;
    payload.validate()?;

    let updated = state.cases.save_section(case.id, payload).await?;

    info!(
        case_id = %updated.id,
        section = %section,
        completion = updated.completion_percentage(),
        "Section saved"
    );
    Ok(Json(updated.into()))
}
