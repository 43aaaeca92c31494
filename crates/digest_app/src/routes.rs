use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use digest_engine::{LogProgressSink, Pipeline, PipelineError};
use digest_logging::{digest_error, digest_info, digest_warn};
use tower_http::cors::{Any, CorsLayer};

use crate::{DigestRequest, DigestResponse, ErrorResponse};

/// Parsed PDFs arrive inline, so the body limit is generous.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Shared state for every handler.
pub struct AppState {
    pub pipeline: Pipeline,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    Router::new()
        .route("/", post(digest))
        .route("/digest", post(digest))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn digest(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: DigestRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            digest_warn!("Rejected malformed request body: {}", err);
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {err}"));
        }
    };

    let (documents, config) = match request.into_run() {
        Ok(run) => run,
        Err(err) => return pipeline_error_response(err),
    };

    match state
        .pipeline
        .run(&documents, &config, &LogProgressSink)
        .await
    {
        Ok(output) => {
            digest_info!("Run complete mode={}", config.mode.as_str());
            (StatusCode::OK, Json(DigestResponse::from(output))).into_response()
        }
        Err(err) => pipeline_error_response(err),
    }
}

fn pipeline_error_response(err: PipelineError) -> Response {
    let status = match err {
        PipelineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        digest_error!("Run failed: {}", err);
    }
    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}
