use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::scholar::ScholarProfile;
use crate::scholar::validate_profile_url;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchProfileRequest {
    #[serde(default)]
    pub profile_url: String,
}

/// First `x-forwarded-for` hop, or "unknown".
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// POST /api/fetch-scholar-profile
pub async fn handle_fetch_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<FetchProfileRequest>,
) -> Result<Json<ScholarProfile>, AppError> {
    if !state.rate_limiter.check(&client_key(&headers)) {
        return Err(AppError::RateLimited);
    }

    validate_profile_url(&request.profile_url)?;

    let profile = state.scholar_source.fetch(request.profile_url.trim()).await?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_key_uses_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_key_defaults_to_unknown() {
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
