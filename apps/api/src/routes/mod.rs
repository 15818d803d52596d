pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::coach::handlers as coach;
use crate::consensus::handlers as consensus;
use crate::errors::AppError;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route("/api/v1/jobs/search", post(jobs::handle_search))
        .route("/api/v1/jobs/rank", post(jobs::handle_rank))
        // Consensus API
        .route("/api/v1/consensus", post(consensus::handle_consensus))
        .route(
            "/api/v1/consensus/batch",
            post(consensus::handle_consensus_batch),
        )
        // Coach API
        .route("/api/v1/coach/chat", post(coach::handle_chat))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::consensus::schema::SECTION_HEADINGS;
    use crate::consensus::synthesizer::ConsensusSynthesizer;
    use crate::jobs::pipeline::AcquisitionPipeline;
    use crate::jobs::ranking::KeywordRelevanceScorer;
    use crate::jobs::source::{JobSource, SourceError};
    use crate::llm_client::{LlmError, TextGenerator};

    struct UnreachableSource;

    #[async_trait]
    impl JobSource for UnreachableSource {
        async fn fetch(&self, _role: &str, _location: &str) -> Result<String, SourceError> {
            Err(SourceError::Status(403))
        }
    }

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn test_app() -> Router {
        let llm: Arc<dyn TextGenerator> = Arc::new(FixedGenerator("Happy to help!"));
        let state = AppState {
            config: Config {
                groq_api_key: "test".to_string(),
                llm_endpoint: "http://localhost".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                job_source_url: "http://localhost".to_string(),
                job_source_timeout: Duration::from_secs(1),
                llm_timeout: Duration::from_secs(1),
                consensus_concurrency: 2,
            },
            llm: llm.clone(),
            pipeline: AcquisitionPipeline::new(Arc::new(UnreachableSource)),
            scorer: Arc::new(KeywordRelevanceScorer),
            synthesizer: ConsensusSynthesizer::new(llm),
        };
        build_router(state)
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_falls_back_when_source_is_down() {
        let (status, body) = post_json(
            "/api/v1/jobs/search",
            json!({"role": "data engineer", "location": "Remote", "skills": "python"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"].as_array().unwrap().len(), 3);
        assert_eq!(body["jobs"][0]["title"], "Data Engineer (Remote)");
        assert_eq!(body["user_skills"], "python");
    }

    #[tokio::test]
    async fn test_rank_accepts_partial_job_records() {
        let (status, body) = post_json(
            "/api/v1/jobs/rank",
            json!({
                "jobs": [
                    {"title": "Barista", "company": "Cafe", "location": "Paris"},
                    {"title": "Python SQL Data Engineer", "company": "Acme", "location": "Remote"}
                ],
                "skills": "python, sql"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rankings"][0]["company"], "Acme");
        assert_eq!(body["rankings"][0]["score"], 90);
        assert_eq!(body["rankings"][1]["score"], 0);
    }

    #[tokio::test]
    async fn test_consensus_with_no_reports_returns_full_schema() {
        let (status, body) = post_json("/api/v1/consensus", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        let report = body["report"].as_str().unwrap();
        for heading in SECTION_HEADINGS {
            assert!(report.contains(heading));
        }
    }

    #[tokio::test]
    async fn test_consensus_reports_malformed_generation_inline() {
        let (status, body) =
            post_json("/api/v1/consensus", json!({"reasoning": "Good fit."})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["report"]
            .as_str()
            .unwrap()
            .starts_with("[Consensus Error: "));
    }

    #[tokio::test]
    async fn test_consensus_batch_rejects_oversized_requests() {
        let bundles: Vec<Value> = (0..21).map(|_| json!({})).collect();
        let (status, body) =
            post_json("/api/v1/consensus/batch", json!({ "bundles": bundles })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_consensus_batch_returns_one_report_per_bundle() {
        let (status, body) = post_json(
            "/api/v1/consensus/batch",
            json!({"bundles": [{}, {}, {}]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reports"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_chat_reply_and_validation() {
        let (status, body) = post_json("/api/v1/coach/chat", json!({"message": "hi"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "Happy to help!");

        let (status, _) = post_json("/api/v1/coach/chat", json!({"message": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = post_json("/api/v1/nope", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
