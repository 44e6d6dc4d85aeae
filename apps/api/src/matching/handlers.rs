//! Axum route handlers for the Suggestions API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::project::ProjectSuggestion;
use crate::models::resume::ResumeProfile;
use crate::models::scholar::ScholarProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub resume_data: Option<ResumeProfile>,
    #[serde(default)]
    pub scholar_data: Option<ScholarProfile>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<ProjectSuggestion>,
}

/// POST /api/generate-project-suggestions
///
/// Either profile may be omitted or null, but not both.
pub async fn handle_generate_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let suggestions = state
        .matcher
        .suggest(request.resume_data.as_ref(), request.scholar_data.as_ref())?;

    info!(count = suggestions.len(), "generated project suggestions");
    Ok(Json(SuggestionsResponse { suggestions }))
}
