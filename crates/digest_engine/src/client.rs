use std::fmt;
use std::time::Duration;

use digest_logging::{digest_debug, digest_error};
use serde::{Deserialize, Serialize};

use crate::ModelError;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct ModelSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub api_version: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.0,
            api_version: DEFAULT_API_VERSION.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("api_version", &self.api_version)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// One outbound text-completion call. Implementations never retry.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Checks that a call could be attempted at all, without making one.
    fn ensure_configured(&self) -> Result<(), ModelError> {
        Ok(())
    }

    /// Sends `prompt` as a single user message and returns the generated text verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    settings: ModelSettings,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(settings: ModelSettings) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ModelError::Network(err.to_string()))?;
        Ok(Self { settings, http })
    }

    fn api_key(&self) -> Result<&str, ModelError> {
        self.settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelError::Config("CLAUDE_API_KEY secret is not set.".to_string()))
    }
}

#[async_trait::async_trait]
impl ModelClient for AnthropicClient {
    fn ensure_configured(&self) -> Result<(), ModelError> {
        self.api_key().map(|_| ())
    }

    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let api_key = self.api_key()?;
        let body = serde_json::to_vec(&MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        })
        .map_err(|err| ModelError::Config(format!("could not encode request: {err}")))?;

        digest_debug!(
            "Model call model={} prompt_chars={}",
            self.settings.model,
            prompt.chars().count()
        );

        let response = self
            .http
            .post(&self.settings.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", self.settings.api_version.as_str())
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            digest_error!("Model API error status={} body={}", status.as_u16(), text);
            return Err(ModelError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        extract_text(&text)
    }
}

/// Pulls the first text block out of a Messages API response body.
fn extract_text(raw: &str) -> Result<String, ModelError> {
    let parsed: MessagesResponse = serde_json::from_str(raw)
        .map_err(|err| ModelError::MalformedResponse(err.to_string()))?;
    parsed
        .content
        .into_iter()
        .find_map(|block| block.text)
        .ok_or_else(|| ModelError::MalformedResponse("response has no text content".to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ModelError {
    if err.is_timeout() {
        return ModelError::Timeout(err.to_string());
    }
    ModelError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_text_block() {
        let raw = r#"{"content":[{"type":"tool_use"},{"type":"text","text":"hello"},{"type":"text","text":"later"}]}"#;
        assert_eq!(extract_text(raw).unwrap(), "hello");
    }

    #[test]
    fn empty_content_is_malformed() {
        let err = extract_text(r#"{"content":[]}"#).unwrap_err();
        assert!(matches!(err, ModelError::MalformedResponse(_)));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let client = AnthropicClient::new(ModelSettings {
            api_key: Some("  ".to_string()),
            ..ModelSettings::default()
        })
        .unwrap();
        assert!(matches!(client.ensure_configured(), Err(ModelError::Config(_))));
    }
}
