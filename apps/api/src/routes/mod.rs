pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/profiles", get(health::profiles_handler))
        .route("/analyze-resume", post(handlers::handle_analyze_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extract::{ExtractError, ExtractedText, ExtractionMethod, TextExtractor};

    const BOUNDARY: &str = "resume-analyzer-test-boundary";

    const RESUME_TEXT: &str = "Jane Doe\n\
        jane.doe@example.com\n\
        Work Experience\n\
        Staff Engineer at Globex (2018 - 2024)\n\
        • Designed the ledger reconciliation pipeline in Python\n";

    /// Returns canned text regardless of the uploaded bytes.
    struct StubExtractor(&'static str);

    #[async_trait]
    impl TextExtractor for StubExtractor {
        async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
            assert!(path.exists(), "upload should be spooled before extraction");
            Ok(ExtractedText {
                text: self.0.to_string(),
                method: ExtractionMethod::TextLayer,
                ocr_pages: 0,
            })
        }
    }

    fn app_with(text: &'static str, max_upload_bytes: usize) -> Router {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.max_upload_bytes = max_upload_bytes;
        build_router(AppState {
            config,
            extractor: Arc::new(StubExtractor(text)),
        })
    }

    fn app(text: &'static str) -> Router {
        app_with(text, 1024 * 1024)
    }

    fn multipart_request(field: &str, file_name: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze-resume")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let response = app(RESUME_TEXT)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let response = app(RESUME_TEXT)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["endpoints"]["analyze_resume"], "POST /analyze-resume");
    }

    #[tokio::test]
    async fn test_profiles_is_empty() {
        let response = app(RESUME_TEXT)
            .oneshot(Request::get("/profiles?limit=5").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total"], 0);
        assert_eq!(body["limit"], 5);
        assert_eq!(body["profiles"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_analyze_resume_success() {
        let response = app(RESUME_TEXT)
            .oneshot(multipart_request("file", "jane.pdf", b"%PDF-1.4 stub"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert!(body["error"].is_null());
        assert!(body["analysis_id"].is_string());

        let data = &body["data"];
        assert_eq!(data["personal_info"]["full_name"], "Jane Doe");
        assert_eq!(data["personal_info"]["email"], "jane.doe@example.com");
        assert_eq!(data["work_experience"][0]["company_name"], "Globex");
        assert_eq!(data["work_experience"][0]["job_title"], "Staff Engineer");
        assert_eq!(data["total_experience"], "6 years");
        assert_eq!(data["experience_level"], "Experienced");
        assert_eq!(data["skills"]["programming"][0], "Python");
        assert_eq!(data["extraction"]["method"], "text_layer");
        assert_eq!(data["extraction"]["ocr_pages"], 0);
    }

    #[tokio::test]
    async fn test_non_pdf_is_rejected() {
        let response = app(RESUME_TEXT)
            .oneshot(multipart_request("file", "resume.docx", b"PK"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FILE");
        assert_eq!(body["error"]["message"], "Only PDF files are allowed");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_rejected() {
        let response = app(RESUME_TEXT)
            .oneshot(multipart_request("attachment", "resume.pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let response = app(RESUME_TEXT)
            .oneshot(multipart_request("file", "resume.pdf", b""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_short_text_is_no_text_error() {
        let response = app("Jane Doe")
            .oneshot(multipart_request("file", "scan.pdf", b"%PDF-1.4 stub"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "NO_TEXT_EXTRACTED");
        assert_eq!(
            body["message"],
            "Could not extract meaningful text from PDF"
        );
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let response = app_with(RESUME_TEXT, 256)
            .oneshot(multipart_request("file", "big.pdf", &[b'x'; 4096]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
