//! Case DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_case::{Case, CaseSections, CaseStatus, Suggestion, SuggestionSummary};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListCasesParams {
    pub status: Option<String>,
    #[validate(range(min = 1, max = 200, message = "must be between 1 and 200"))]
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCaseBody {
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub case_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: CaseStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionsParams {
    /// Restricts the analysis to one section
    pub section: Option<String>,
}

/// A full case, every section included
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResponse {
    pub id: Uuid,
    pub case_number: String,
    pub status: CaseStatus,
    pub owner_id: Uuid,
    pub completion_percentage: u8,
    pub sections: CaseSections,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Case> for CaseResponse {
    fn from(case: Case) -> Self {
        Self {
            id: case.id.into(),
            completion_percentage: case.completion_percentage(),
            case_number: case.case_number,
            status: case.status,
            owner_id: case.owner_id.into(),
            sections: case.sections,
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

/// One row of the case list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummaryResponse {
    pub id: Uuid,
    pub case_number: String,
    pub status: CaseStatus,
    pub claimant_name: Option<String>,
    pub completion_percentage: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Case> for CaseSummaryResponse {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id.into(),
            case_number: case.case_number.clone(),
            status: case.status,
            claimant_name: case
                .sections
                .claimant_details
                .as_ref()
                .and_then(|claimant| claimant.full_name.clone()),
            completion_percentage: case.completion_percentage(),
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
    pub summary: SuggestionSummary,
}

impl SuggestionsResponse {
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        let summary = SuggestionSummary::from_suggestions(&suggestions);
        Self {
            suggestions,
            summary,
        }
    }
}
