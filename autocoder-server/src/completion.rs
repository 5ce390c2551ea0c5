use crate::config::CompletionSettings;
use autocoder_core::{ChatMessage, ChatModel, ChatRequest, ModelError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

const MIN_PREFIX_CHARS: usize = 3;

fn default_language() -> String {
    "python".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prefix: String,
    pub language: String,
    pub api_key: Option<String>,
}

impl Default for CompletionRequest {
    fn default() -> Self {
        Self { prefix: String::new(), language: default_language(), api_key: None }
    }
}

impl CompletionRequest {
    /// Reads a request body without trusting its shape.
    ///
    /// The content type is ignored. Scalars are taken as their text form, `null` or a
    /// missing field falls back to the default, and a body that is not a JSON object
    /// yields the default request (which completes to nothing).
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };
        Self {
            prefix: text_field(&fields, "prefix").unwrap_or_default(),
            language: text_field(&fields, "language").unwrap_or_else(default_language),
            api_key: text_field(&fields, "api_key"),
        }
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub completion: String,
}

impl CompletionResponse {
    pub fn empty() -> Self {
        Self { completion: String::new() }
    }
}

/// Forwards a code prefix to a chat model and returns the continuation.
///
/// Never fails: anything that prevents a completion yields an empty one.
pub struct CompletionRelay {
    model: Option<Arc<dyn ChatModel>>,
    settings: CompletionSettings,
}

impl CompletionRelay {
    pub fn new(model: Option<Arc<dyn ChatModel>>, settings: CompletionSettings) -> Self {
        Self { model, settings }
    }

    fn system_prompt(language: &str) -> String {
        format!(
            "You are an expert {language} coding assistant. Continue the user's code snippet only \
             with the next logical tokens. Do NOT add any commentary or markdown formatting."
        )
    }

    /// Server key first, then the client's; empty strings count as absent.
    fn resolve_key<'a>(&'a self, request: &'a CompletionRequest) -> Option<&'a str> {
        self.settings
            .server_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .or_else(|| request.api_key.as_deref().filter(|k| !k.is_empty()))
    }

    pub async fn complete(&self, request: CompletionRequest) -> CompletionResponse {
        if request.prefix.trim().chars().count() < MIN_PREFIX_CHARS {
            return CompletionResponse::empty();
        }
        let Some(model) = self.model.as_ref() else {
            return CompletionResponse::empty();
        };
        let Some(api_key) = self.resolve_key(&request) else {
            tracing::debug!("No completion API key available");
            return CompletionResponse::empty();
        };

        let chat_request = ChatRequest::new(
            self.settings.model.clone(),
            vec![
                ChatMessage::system(Self::system_prompt(&request.language)),
                ChatMessage::user(request.prefix.clone()),
            ],
        )
        .with_max_tokens(self.settings.max_tokens)
        .with_temperature(self.settings.temperature);

        let call = model.complete(api_key, chat_request);
        let Ok(result) = tokio::time::timeout(self.settings.timeout, call).await else {
            tracing::warn!(
                timeout_ms = self.settings.timeout.as_millis(),
                "Completion provider did not answer in time"
            );
            return CompletionResponse::empty();
        };

        match result {
            Ok(response) => {
                let content = response
                    .first_message()
                    .and_then(|message| message.content.as_deref())
                    .unwrap_or_default();
                CompletionResponse { completion: content.trim_start_matches('\n').to_string() }
            }
            Err(e) => {
                log_provider_error(&e);
                CompletionResponse::empty()
            }
        }
    }
}

fn log_provider_error(error: &ModelError) {
    if error.is_transient() {
        tracing::warn!(error = %error, "Completion provider temporarily unavailable");
    } else {
        tracing::error!(error = %error, "Completion provider error");
    }
}
