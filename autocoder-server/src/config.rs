use autocoder_agent::CrewSettings;
use autocoder_core::{ChatModel, CrewExecutor};
use std::{sync::Arc, time::Duration};

/// Model used for inline completions unless overridden.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-1106";

/// Security configuration for the server.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Allowed origins for CORS (empty = allow all)
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes (default: 1MB)
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_body_size: 1024 * 1024,
        }
    }
}

impl SecurityConfig {
    /// Restrict CORS to the given origins.
    pub fn production(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins, ..Self::default() }
    }
}

/// Parameters of the inline completion call.
#[derive(Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Server-side key (`OPENAI_API_KEY`). Takes precedence over a key sent by the client.
    pub server_api_key: Option<String>,
    /// Deadline for one provider call; a late answer becomes an empty completion.
    pub timeout: Duration,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            max_tokens: 64,
            temperature: 0.1,
            server_api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("server_api_key", &self.server_api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CompletionSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_server_api_key(mut self, key: Option<String>) -> Self {
        self.server_api_key = key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Configuration for the autocoder server.
#[derive(Clone)]
pub struct ServerConfig {
    /// Client for inline completions. `None` disables the relay (it answers empty).
    pub completion_model: Option<Arc<dyn ChatModel>>,
    pub crew_executor: Arc<dyn CrewExecutor>,
    pub completion: CompletionSettings,
    pub crew: CrewSettings,
    pub security: SecurityConfig,
    /// Cancel a connection's in-flight runs when it disconnects.
    pub cancel_on_disconnect: bool,
    /// Pause after each workflow log line.
    pub log_pause: Duration,
}

impl ServerConfig {
    pub fn new(
        completion_model: Option<Arc<dyn ChatModel>>,
        crew_executor: Arc<dyn CrewExecutor>,
    ) -> Self {
        Self {
            completion_model,
            crew_executor,
            completion: CompletionSettings::default(),
            crew: CrewSettings::default(),
            security: SecurityConfig::default(),
            cancel_on_disconnect: false,
            log_pause: Duration::from_millis(100),
        }
    }

    pub fn with_completion(mut self, completion: CompletionSettings) -> Self {
        self.completion = completion;
        self
    }

    pub fn with_crew(mut self, crew: CrewSettings) -> Self {
        self.crew = crew;
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    /// Configure allowed CORS origins
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.security.allowed_origins = origins;
        self
    }

    /// Configure how long an inline completion may wait on the provider
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.completion.timeout = timeout;
        self
    }

    pub fn with_cancel_on_disconnect(mut self, cancel: bool) -> Self {
        self.cancel_on_disconnect = cancel;
        self
    }

    pub fn with_log_pause(mut self, log_pause: Duration) -> Self {
        self.log_pause = log_pause;
        self
    }
}
