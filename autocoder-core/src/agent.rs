use crate::{AutocoderError, Result, Tool};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Provider family an agent's credential belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    OpenAi,
    Gemini,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAi => f.write_str("openai"),
            LlmProvider::Gemini => f.write_str("gemini"),
        }
    }
}

/// Credential plus provider used when an agent calls its model.
#[derive(Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: String,
}

impl LlmConfig {
    pub fn new(provider: LlmProvider, api_key: impl Into<String>) -> Self {
        Self { provider, api_key: api_key.into() }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// One role-specialized worker in the crew. Immutable once built.
pub struct AgentDescriptor {
    role: String,
    goal: String,
    backstory: String,
    tools: Vec<Arc<dyn Tool>>,
    allow_delegation: bool,
    llm: Option<LlmConfig>,
}

impl fmt::Debug for AgentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentDescriptor")
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("tools", &self.tool_names())
            .field("allow_delegation", &self.allow_delegation)
            .field("llm", &self.llm)
            .finish()
    }
}

impl AgentDescriptor {
    pub fn builder(role: impl Into<String>) -> AgentDescriptorBuilder {
        AgentDescriptorBuilder::new(role)
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn allow_delegation(&self) -> bool {
        self.allow_delegation
    }

    pub fn llm(&self) -> Option<&LlmConfig> {
        self.llm.as_ref()
    }
}

pub struct AgentDescriptorBuilder {
    role: String,
    goal: Option<String>,
    backstory: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
    allow_delegation: bool,
    llm: Option<LlmConfig>,
}

impl AgentDescriptorBuilder {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: None,
            backstory: None,
            tools: Vec::new(),
            allow_delegation: false,
            llm: None,
        }
    }

    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub fn backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = Some(backstory.into());
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn allow_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    pub fn llm(mut self, llm: Option<LlmConfig>) -> Self {
        self.llm = llm;
        self
    }

    pub fn build(self) -> Result<AgentDescriptor> {
        if self.role.trim().is_empty() {
            return Err(AutocoderError::Agent("Agent role is required".to_string()));
        }
        let Some(goal) = self.goal else {
            return Err(AutocoderError::Agent(format!("Goal is required for '{}'", self.role)));
        };

        Ok(AgentDescriptor {
            role: self.role,
            goal,
            backstory: self.backstory.unwrap_or_default(),
            tools: self.tools,
            allow_delegation: self.allow_delegation,
            llm: self.llm,
        })
    }
}

/// A unit of work handed to one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub expected_output: String,
}

impl Task {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self { description: description.into(), expected_output: expected_output.into() }
    }
}

/// Runs one agent on one task until it produces its final answer.
#[async_trait]
pub trait CrewExecutor: Send + Sync {
    async fn kickoff(&self, agent: &AgentDescriptor, task: &Task) -> Result<String>;
}
