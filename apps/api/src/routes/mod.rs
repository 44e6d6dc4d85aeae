pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::resume::handlers as resume;
use crate::scholar::handlers as scholar;
use crate::state::AppState;

/// Headroom above the upload limit for multipart framing, so oversized files
/// reach the size check instead of being cut off by the body limit.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/parse-resume", post(resume::handle_parse_resume))
        .route(
            "/api/parse-resume/text",
            post(resume::handle_parse_resume_text),
        )
        // Scholar API
        .route(
            "/api/fetch-scholar-profile",
            post(scholar::handle_fetch_profile),
        )
        // Suggestions API
        .route(
            "/api/generate-project-suggestions",
            post(matching::handle_generate_suggestions),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::matching::catalogue::Catalogue;
    use crate::matching::scoring::SkillOverlapMatcher;
    use crate::models::scholar::ScholarProfile;
    use crate::resume::extraction::{DOCX_MIME, PDF_MIME};
    use crate::scholar::rate_limit::RateLimiter;
    use crate::scholar::{ScholarError, ScholarSource};

    const BOUNDARY: &str = "compass-test-boundary";

    /// Serves a canned profile, or a 404 for URLs mentioning "missing".
    struct FakeScholarSource;

    #[async_trait]
    impl ScholarSource for FakeScholarSource {
        async fn fetch(&self, url: &str) -> Result<ScholarProfile, ScholarError> {
            if url.contains("missing") {
                return Err(ScholarError::Status(404));
            }
            Ok(ScholarProfile {
                name: "Ada Lovelace".to_string(),
                research_interests: vec!["Robotics".to_string()],
                total_citations: 1523,
                h_index: 17,
                ..Default::default()
            })
        }
    }

    fn app_with(config: Config) -> Router {
        let rate_limiter = Arc::new(RateLimiter::new(
            config.scholar_rate_limit,
            Duration::from_secs(config.scholar_rate_window_secs),
        ));
        build_router(AppState {
            config,
            matcher: Arc::new(SkillOverlapMatcher::new(Arc::new(Catalogue::builtin()))),
            scholar_source: Arc::new(FakeScholarSource),
            rate_limiter,
        })
    }

    fn app() -> Router {
        app_with(Config::default())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn post_upload(app: Router, field: &str, mime: &str, data: &[u8]) -> Response {
        let mut body = Vec::new();
        write!(
            body,
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"resume\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .unwrap();
        body.extend_from_slice(data);
        write!(body, "\r\n--{BOUNDARY}--\r\n").unwrap();

        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/parse-resume")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!("<w:document><w:body>{body}</w:body></w:document>");

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_parse_text_endpoint() {
        let text = "Jane Doe\njane@x.com\n555-123-4567\nEXPERIENCE\nSoftware Engineer\nAcme Corp\n2019-2022 built APIs\nEDUCATION\nBS Computer Science\nMIT 2015";
        let response = post_json(app(), "/api/parse-resume/text", json!({ "text": text })).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "Jane Doe");
        assert_eq!(body["email"], "jane@x.com");
        assert_eq!(body["experience"][0]["duration"], "2019-2022");
        assert_eq!(body["education"][0]["year"], "2015");
    }

    #[tokio::test]
    async fn test_docx_upload_is_parsed() {
        let data = docx(&[
            "John Doe",
            "john.doe@email.com",
            "+1234567890",
            "Skills: JavaScript, React, Python",
        ]);
        let response = post_upload(app(), "resume", DOCX_MIME, &data).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "John Doe");
        assert_eq!(body["email"], "john.doe@email.com");
        assert_eq!(body["phone"], "+1234567890");
        let skills: Vec<&str> = body["skills"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s.as_str().unwrap())
            .collect();
        assert!(skills.contains(&"JavaScript"));
        assert!(skills.contains(&"React"));
    }

    #[tokio::test]
    async fn test_rejects_invalid_file_type() {
        let response = post_upload(app(), "resume", "text/plain", b"hello").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("file type"));
    }

    #[tokio::test]
    async fn test_rejects_oversized_file() {
        let config = Config {
            max_upload_bytes: 1024 * 1024,
            ..Config::default()
        };
        let data = vec![b'x'; 1024 * 1024 + 1];
        let response = post_upload(app_with(config), "resume", PDF_MIME, &data).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "File size too large. Maximum size is 1MB."
        );
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let response = post_upload(app(), "attachment", PDF_MIME, b"%PDF").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["message"], "No file provided");
    }

    #[tokio::test]
    async fn test_corrupt_document_is_unprocessable() {
        let response = post_upload(app(), "resume", DOCX_MIME, b"definitely not a zip").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_get_on_upload_route_is_405() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/parse-resume")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_suggestions_require_some_profile() {
        let response = post_json(
            app(),
            "/api/generate-project-suggestions",
            json!({ "resumeData": null, "scholarData": null }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INPUT_ERROR");
        assert_eq!(body["error"]["message"], "No data provided for suggestions");
    }

    #[tokio::test]
    async fn test_suggestions_from_resume() {
        let response = post_json(
            app(),
            "/api/generate-project-suggestions",
            json!({ "resumeData": { "name": "Jane", "skills": ["React", "Node.js"] } }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let suggestions = body["suggestions"].as_array().unwrap();
        assert!(!suggestions.is_empty() && suggestions.len() <= 8);
        assert_eq!(suggestions[0]["title"], "E-Learning Platform");
        assert_eq!(suggestions[0]["matchScore"], 50);
        let scores: Vec<u64> = suggestions
            .iter()
            .map(|s| s["matchScore"].as_u64().unwrap())
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_suggestions_from_scholar() {
        let response = post_json(
            app(),
            "/api/generate-project-suggestions",
            json!({ "scholarData": { "researchInterests": ["Robotics"] } }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let first = &body["suggestions"][0];
        assert_eq!(first["title"], "Robotics Research Project");
        assert_eq!(first["matchScore"], 90);
        assert_eq!(first["id"], "research-robotics-0");
    }

    #[tokio::test]
    async fn test_fetch_profile_requires_url() {
        let response = post_json(app(), "/api/fetch-scholar-profile", json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "Profile URL is required"
        );
    }

    #[tokio::test]
    async fn test_fetch_profile_rejects_foreign_url() {
        let response = post_json(
            app(),
            "/api/fetch-scholar-profile",
            json!({ "profileUrl": "https://example.com/profile" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "Invalid Google Scholar URL"
        );
    }

    #[tokio::test]
    async fn test_fetch_profile_returns_camel_case_profile() {
        let response = post_json(
            app(),
            "/api/fetch-scholar-profile",
            json!({ "profileUrl": "https://scholar.google.com/citations?user=ada" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "Ada Lovelace");
        assert_eq!(body["affiliation"], "Unknown");
        assert_eq!(body["researchInterests"][0], "Robotics");
        assert_eq!(body["totalCitations"], 1523);
        assert_eq!(body["hIndex"], 17);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_404() {
        let response = post_json(
            app(),
            "/api/fetch-scholar-profile",
            json!({ "profileUrl": "https://scholar.google.com/citations?user=missing" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "FETCH_ERROR");
    }

    #[tokio::test]
    async fn test_fetch_is_rate_limited_per_client() {
        let app = app_with(Config {
            scholar_rate_limit: 1,
            ..Config::default()
        });
        let request = |client: &str| {
            Request::builder()
                .method("POST")
                .uri("/api/fetch-scholar-profile")
                .header("content-type", "application/json")
                .header("x-forwarded-for", client)
                .body(Body::from(
                    json!({ "profileUrl": "https://scholar.google.com/citations?user=ada" })
                        .to_string(),
                ))
                .unwrap()
        };

        let first = app.clone().oneshot(request("198.51.100.1")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let second = app.clone().oneshot(request("198.51.100.1")).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        let other = app.oneshot(request("198.51.100.2")).await.unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }
}
