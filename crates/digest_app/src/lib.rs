//! HTTP surface for the digest pipeline.
mod api;
mod config;
mod routes;

pub use api::{DigestRequest, DigestResponse, ErrorResponse, ExtractionJson, PagePayload, PdfPayload};
pub use config::{AppConfig, AppConfigError};
pub use routes::{router, AppState};
