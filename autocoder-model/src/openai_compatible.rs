//! OpenAI-compatible chat-completion client.

use autocoder_core::{AutocoderError, ChatModel, ChatRequest, ChatResponse, ModelError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAICompatibleConfig {
    /// Provider display name used in logs and error messages.
    pub provider_name: String,
    /// API base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Per-request timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Default for OpenAICompatibleConfig {
    fn default() -> Self {
        Self {
            provider_name: "openai".to_string(),
            base_url: OPENAI_API_BASE.to_string(),
            timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl OpenAICompatibleConfig {
    pub fn new(provider_name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set a custom API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Chat-completion client speaking the OpenAI wire format.
///
/// Holds no credential: every call supplies its own bearer token.
pub struct OpenAICompatible {
    client: Client,
    config: OpenAICompatibleConfig,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAICompatible {
    /// Create a new client.
    pub fn new(config: OpenAICompatibleConfig) -> Result<Self, AutocoderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AutocoderError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAICompatibleConfig {
        &self.config
    }

    /// Build the API URL for chat completions.
    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

fn classify_transport_error(error: reqwest::Error) -> ModelError {
    if error.is_timeout() {
        ModelError::Timeout(error.to_string())
    } else if error.is_decode() {
        ModelError::Decode(error.to_string())
    } else {
        ModelError::Network(error.to_string())
    }
}

/// Prefer the provider's `{"error": {"message": ...}}` text over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl ChatModel for OpenAICompatible {
    fn name(&self) -> &str {
        &self.config.provider_name
    }

    async fn complete(
        &self,
        credential: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, ModelError> {
        tracing::debug!(
            provider = %self.config.provider_name,
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            return Err(ModelError::from_status(
                status.as_u16(),
                format!("{} API error: {}", self.config.provider_name, error_message(&body)),
            ));
        }

        serde_json::from_str::<ChatResponse>(&body)
            .map_err(|e| ModelError::Decode(format!("{e} - {body}")))
    }
}
