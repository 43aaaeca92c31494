use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use digest_app::{router, AppState};
use digest_engine::{ModelClient, ModelError, Pipeline, PipelineSettings};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, ModelError>>>,
    configured: bool,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<String, ModelError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            configured: true,
        }
    }
}

#[async_trait::async_trait]
impl ModelClient for ScriptedClient {
    fn ensure_configured(&self) -> Result<(), ModelError> {
        if self.configured {
            Ok(())
        } else {
            Err(ModelError::Config("CLAUDE_API_KEY secret is not set.".to_string()))
        }
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("unscripted reply".to_string()))
    }
}

fn app(client: ScriptedClient) -> Router {
    let settings = PipelineSettings {
        inter_call_delay: Duration::ZERO,
        ..PipelineSettings::default()
    };
    let pipeline = Pipeline::new(Arc::new(client), settings);
    router(Arc::new(AppState { pipeline }))
}

async fn post(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn summarize_text_returns_summary() {
    let app = app(ScriptedClient::new(vec![Ok("the gist".to_string())]));
    let (status, body) = post(
        app,
        json!({ "mode": "summarize_text", "content": "long abstract", "tone": "academic" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "summary": "the gist" }));
}

#[tokio::test]
async fn extract_and_synthesize_returns_extractions_and_synthesis() {
    let app = app(ScriptedClient::new(vec![
        Err(ModelError::Upstream {
            status: 500,
            body: "oops".to_string(),
        }),
        Ok("beta notes".to_string()),
        Ok("combined".to_string()),
    ]));
    let (status, body) = post(
        app,
        json!({
            "mode": "extract_and_synthesize",
            "pdfs": [
                { "name": "a.pdf", "pages": [{ "page": 1, "content": "alpha" }] },
                { "name": "b.pdf", "pages": [{ "page": 1, "content": "beta" }] }
            ],
            "tone": "personalized",
            "writingSample": "Terse."
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["synthesisResult"], json!("combined"));
    assert_eq!(body["extractions"][0]["name"], json!("a.pdf"));
    assert_eq!(body["extractions"][0]["failed"], json!(true));
    assert_eq!(
        body["extractions"][1],
        json!({ "name": "b.pdf", "summary": "beta notes", "failed": false })
    );
}

#[tokio::test]
async fn all_failed_extractions_return_server_error() {
    let failure = || -> Result<String, ModelError> {
        Err(ModelError::Upstream {
            status: 500,
            body: String::new(),
        })
    };
    let app = app(ScriptedClient::new(vec![failure(), failure()]));
    let (status, body) = post(
        app,
        json!({
            "mode": "extract_and_synthesize",
            "pdfs": [
                { "name": "a.pdf", "pages": [] },
                { "name": "b.pdf", "pages": [] }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "All document extractions failed." }));
}

#[tokio::test]
async fn missing_parameters_are_a_bad_request() {
    let app = app(ScriptedClient::new(Vec::new()));
    let (status, body) = post(app, json!({ "mode": "extract_and_synthesize" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Invalid request mode or missing parameters." })
    );
}

#[tokio::test]
async fn lone_pasted_content_cannot_be_extracted() {
    let app = app(ScriptedClient::new(Vec::new()));
    let (status, body) = post(
        app,
        json!({ "mode": "extract_and_synthesize", "content": "notes only" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Invalid request mode or missing parameters." })
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(ScriptedClient::new(Vec::new()))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn missing_api_key_is_a_server_error() {
    let client = ScriptedClient {
        configured: false,
        ..ScriptedClient::new(Vec::new())
    };
    let (status, body) = post(
        app(client),
        json!({ "mode": "summarize_text", "content": "text" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Server configuration error: CLAUDE_API_KEY secret is not set." })
    );
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,apikey")
        .body(Body::empty())
        .unwrap();
    let response = app(ScriptedClient::new(Vec::new()))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(ScriptedClient::new(Vec::new()))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
