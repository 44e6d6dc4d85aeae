//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::ResumeProfile;
use crate::resume::extraction::{extract_text, DocumentKind};
use crate::resume::parser::parse_resume_text;
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

/// POST /api/parse-resume
///
/// Accepts a PDF or DOCX upload in the `resume` field and returns the
/// structured profile.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeProfile>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
        upload = Some((content_type, data));
        break;
    }

    let (content_type, data) =
        upload.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let kind = DocumentKind::from_mime(&content_type).ok_or_else(|| {
        warn!(%content_type, "rejected resume upload type");
        AppError::Validation(
            "Invalid file type. Only PDF and DOCX files are allowed.".to_string(),
        )
    })?;

    let max_bytes = state.config.max_upload_bytes;
    if data.len() > max_bytes {
        warn!(size = data.len(), max_bytes, "rejected oversized resume upload");
        return Err(AppError::Validation(format!(
            "File size too large. Maximum size is {}MB.",
            max_bytes / (1024 * 1024)
        )));
    }

    info!(?kind, size = data.len(), "accepted resume upload");
    let text = extract_text(kind, data).await?;
    Ok(Json(parse_resume_text(&text)))
}

/// POST /api/parse-resume/text
///
/// Parses already-extracted plain text.
pub async fn handle_parse_resume_text(
    Json(request): Json<ParseTextRequest>,
) -> Json<ResumeProfile> {
    Json(parse_resume_text(&request.text))
}
