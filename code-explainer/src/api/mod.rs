//! REST API for the code explainer

mod page;

use crate::explain::{ExplainError, Explainer};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Text served on `GET /` so a browser or probe can see the process is up
pub const LIVENESS_TEXT: &str = "Backend is running successfully 🚀";

/// Message returned to callers for every upstream failure
pub const GENERIC_FAILURE: &str = "Error generating explanation";

/// API state
pub struct ApiState {
    pub explainer: Explainer,
}

/// Request to explain a snippet
#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    /// Source code to explain
    #[serde(default)]
    pub code: Option<String>,
    /// Language tag picked in the UI; logged, never used in the prompt
    #[serde(default)]
    pub language: Option<String>,
}

/// Successful explanation
#[derive(Debug, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

/// Error body shared by 400 and 500 responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub model: String,
    pub provider_healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_error: Option<String>,
}

/// Gateway error: input problems become 400, upstream failures a generic 500
#[derive(Debug)]
pub enum ApiError {
    Explain(ExplainError),
    /// Body could not be read at all (e.g. over the size limit); keeps axum's status
    Body(JsonRejection),
}

impl From<ExplainError> for ApiError {
    fn from(err: ExplainError) -> Self {
        Self::Explain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Unusable shape or content type: treat as if no code was sent
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => {
                warn!(reason = %rejection.body_text(), "Unreadable explain request");
                Self::Explain(ExplainError::MissingCode)
            }
            other => {
                warn!(status = %other.status(), reason = %other.body_text(), "Rejected explain request body");
                Self::Body(other)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Explain(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Explain(err) => {
                error!(error = %err, "Failed to generate explanation");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Create the API router
pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .route("/api/explain", post(explain_code))
        .route("/ui", get(explainer_page))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// Health check endpoint; probes the model service
async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    let provider = state.explainer.provider();
    let status = provider.health_check().await;

    Json(HealthResponse {
        status: if status.healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: provider.name().to_string(),
        model: provider.model().to_string(),
        provider_healthy: status.healthy,
        provider_error: status.error,
    })
}

/// Explain a code snippet
async fn explain_code(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(request) = payload?;

    // Raw user code lands in the log
    info!(code = ?request.code, language = ?request.language, "Received code");

    let code = request.code.unwrap_or_default();
    let response = state.explainer.explain(&code).await?;

    info!(chars = response.content.len(), "Sending explanation");
    Ok(Json(ExplainResponse {
        explanation: response.content,
    }))
}

/// Browser UI
async fn explainer_page() -> Html<&'static str> {
    Html(page::EXPLAINER_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::stub::{PendingProvider, StubProvider};
    use crate::provider::LlmProvider;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(provider: Arc<dyn LlmProvider>) -> Router {
        let explainer = Explainer::new(provider, Duration::from_secs(30));
        create_router(Arc::new(ApiState { explainer }))
    }

    fn post_explain(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/explain")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_explain_success() {
        let stub = Arc::new(StubProvider::replying("Prints 1."));
        let response = app(stub.clone())
            .oneshot(post_explain(r#"{"code":"print(1)"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ExplainResponse = body_json(response).await;
        assert_eq!(body.explanation, "Prints 1.");
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_language_is_accepted_and_ignored() {
        let stub = Arc::new(StubProvider::replying("Adds two numbers."));
        let response = app(stub.clone())
            .oneshot(post_explain(r#"{"code":"a + b","language":"cobol"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let sent = stub.last_request.lock().unwrap().clone().unwrap();
        assert!(!sent.prompt.contains("cobol"));
        assert!(!sent.system.contains("cobol"));
    }

    #[tokio::test]
    async fn test_missing_code_is_bad_request() {
        for body in [r#"{}"#, r#"{"code":""}"#, r#"{"code":null}"#, r#"{"language":"python"}"#] {
            let stub = Arc::new(StubProvider::replying("unused"));
            let response = app(stub.clone()).oneshot(post_explain(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let err: ErrorResponse = body_json(response).await;
            assert_eq!(err.error, "Code input is required!");
            assert_eq!(stub.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_unreadable_body_is_bad_request() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/explain")
            .body(Body::from("print(1)"))
            .unwrap();
        let response = app(stub.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ErrorResponse = body_json(response).await;
        assert_eq!(err.error, "Code input is required!");
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_body_is_not_reported_as_missing_code() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let body = serde_json::json!({ "code": "x = 1\n".repeat(400_000) }).to_string();
        let response = app(stub.clone()).oneshot(post_explain(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let err: ErrorResponse = body_json(response).await;
        assert_ne!(err.error, "Code input is required!");
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let response = app(stub.clone())
            .oneshot(post_explain(r#"{"code": "print(1)""#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ErrorResponse = body_json(response).await;
        assert_eq!(err.error, "Code input is required!");
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_generic_500() {
        let stub = Arc::new(StubProvider::failing("connection refused at 127.0.0.1:11434"));
        let response = app(stub)
            .oneshot(post_explain(r#"{"code":"x = 1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err: ErrorResponse = body_json(response).await;
        assert_eq!(err.error, GENERIC_FAILURE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_resolving_model_is_500() {
        let response = app(Arc::new(PendingProvider))
            .oneshot(post_explain(r#"{"code":"loop {}"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err: ErrorResponse = body_json(response).await;
        assert_eq!(err.error, "Error generating explanation");
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = app(Arc::new(StubProvider::replying("")))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], LIVENESS_TEXT.as_bytes());
    }

    #[tokio::test]
    async fn test_health_reports_provider() {
        let response = app(Arc::new(StubProvider::failing("down")))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let health: HealthResponse = body_json(response).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.provider, "stub");
        assert_eq!(health.model, "stub-model");
        assert_eq!(health.provider_error.as_deref(), Some("down"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/explain")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app(Arc::new(StubProvider::replying("")))
            .oneshot(request)
            .await
            .unwrap();

        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_ui_page_served() {
        let response = app(Arc::new(StubProvider::replying("")))
            .oneshot(Request::get("/ui").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Code Explainer"));
        assert!(html.contains("/api/explain"));
    }
}
