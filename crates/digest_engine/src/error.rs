use thiserror::Error;

/// Failure of a single model call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("model API request failed with status {status}")]
    Upstream { status: u16, body: String },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Failure of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Server configuration error: {0}")]
    Config(String),
    #[error("External API Error: model API request failed with status {status}.")]
    Upstream { status: u16, body: String },
    #[error("External API Error: {0}")]
    Transport(String),
    #[error("All document extractions failed.")]
    NoSuccessfulExtractions,
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<ModelError> for PipelineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Config(message) => PipelineError::Config(message),
            ModelError::Upstream { status, body } => PipelineError::Upstream { status, body },
            other => PipelineError::Transport(other.to_string()),
        }
    }
}
