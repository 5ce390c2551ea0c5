use autocoder_core::{
    AgentDescriptor, AutocoderError, ChatMessage, ChatModel, ChatRequest, CrewExecutor,
    LlmConfig, LlmProvider, Result, Task, ToolCall,
};
use autocoder_model::{RetryConfig, execute_with_retry, provider};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_MAX_ITERATIONS: usize = 15;

struct RegisteredModel {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

/// Runs one agent on one task with a function-calling loop.
///
/// The model is chosen by the provider of the agent's [`LlmConfig`], falling
/// back to the executor's default config when the agent has none.
pub struct LlmCrewExecutor {
    models: HashMap<LlmProvider, RegisteredModel>,
    default_llm: Option<LlmConfig>,
    max_iterations: usize,
    retry_config: RetryConfig,
}

impl Default for LlmCrewExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmCrewExecutor {
    /// Executor with no models registered.
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            default_llm: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            retry_config: RetryConfig::default(),
        }
    }

    /// Executor wired to the public OpenAI and Gemini endpoints with their default models.
    pub fn with_default_providers() -> Result<Self> {
        let mut executor = Self::new();
        for provider in [LlmProvider::OpenAi, LlmProvider::Gemini] {
            executor = executor.with_model(
                provider,
                Arc::new(provider::for_provider(provider)?),
                provider::default_model(provider),
            );
        }
        Ok(executor)
    }

    pub fn with_model(
        mut self,
        provider: LlmProvider,
        model: Arc<dyn ChatModel>,
        model_name: impl Into<String>,
    ) -> Self {
        self.models.insert(provider, RegisteredModel { model, model_name: model_name.into() });
        self
    }

    pub fn with_default_llm(mut self, llm: Option<LlmConfig>) -> Self {
        self.default_llm = llm;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    fn system_prompt(agent: &AgentDescriptor) -> String {
        let mut prompt = format!(
            "You are {}. {}\n\nYour personal goal is: {}",
            agent.role(),
            agent.backstory(),
            agent.goal()
        );
        if !agent.tools().is_empty() {
            prompt.push_str(
                "\n\nUse the tools available to you when they help. When you are done, reply with \
                 your final answer as plain text without calling any tool.",
            );
        }
        prompt
    }

    fn task_prompt(task: &Task) -> String {
        format!(
            "Current task: {}\n\nThis is the expected criteria for your final answer: {}\nYou MUST \
             return the actual complete content as the final answer, not a summary.",
            task.description, task.expected_output
        )
    }

    async fn run_tool(agent: &AgentDescriptor, call: &ToolCall) -> Value {
        let name = &call.function.name;
        let Some(tool) = agent.tools().iter().find(|t| t.name() == name) else {
            return serde_json::json!({ "error": format!("Tool {} not found", name) });
        };

        let args = if call.function.arguments.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str::<Value>(&call.function.arguments) {
                Ok(args) => args,
                Err(e) => {
                    return serde_json::json!({ "error": format!("Invalid JSON arguments: {e}") });
                }
            }
        };

        tracing::debug!(role = agent.role(), tool = %name, "Executing tool");
        match tool.execute(args).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(role = agent.role(), tool = %name, error = %e, "Tool call failed");
                serde_json::json!({ "error": e.to_string() })
            }
        }
    }
}

#[async_trait]
impl CrewExecutor for LlmCrewExecutor {
    async fn kickoff(&self, agent: &AgentDescriptor, task: &Task) -> Result<String> {
        let llm = agent.llm().or(self.default_llm.as_ref()).ok_or_else(|| {
            AutocoderError::Config(format!("No LLM configured for agent '{}'", agent.role()))
        })?;
        let registered = self.models.get(&llm.provider).ok_or_else(|| {
            AutocoderError::Config(format!(
                "No chat model registered for provider '{}' (agent '{}')",
                llm.provider,
                agent.role()
            ))
        })?;

        let declarations: Vec<_> = agent.tools().iter().map(|tool| tool.declaration()).collect();
        let mut messages = vec![
            ChatMessage::system(Self::system_prompt(agent)),
            ChatMessage::user(Self::task_prompt(task)),
        ];

        tracing::info!(
            role = agent.role(),
            provider = %llm.provider,
            model = %registered.model_name,
            "Agent started task"
        );

        for iteration in 1..=self.max_iterations {
            let request = ChatRequest::new(registered.model_name.clone(), messages.clone())
                .with_tools(declarations.clone());

            let response = execute_with_retry(&self.retry_config, || {
                let model = Arc::clone(&registered.model);
                let api_key = llm.api_key.clone();
                let request = request.clone();
                async move { model.complete(&api_key, request).await }
            })
            .await?;

            let message = response
                .first_message()
                .cloned()
                .ok_or_else(|| AutocoderError::Agent("Model returned no choices".to_string()))?;

            if message.tool_calls.is_empty() {
                tracing::info!(role = agent.role(), iterations = iteration, "Agent finished task");
                return Ok(message.content.unwrap_or_default());
            }

            let calls = message.tool_calls.clone();
            messages.push(message);
            for call in &calls {
                let result = Self::run_tool(agent, call).await;
                messages.push(ChatMessage::tool_result(call.id.clone(), result.to_string()));
            }
        }

        Err(AutocoderError::Agent(format!(
            "Max iterations ({}) exceeded for '{}'",
            self.max_iterations,
            agent.role()
        )))
    }
}
