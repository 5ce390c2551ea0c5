//! # autocoder-core
//!
//! Core traits and types shared by the autocoder crates.
//!
//! ## Overview
//!
//! - [`ChatModel`] - A chat-completion provider, called with an explicit credential
//! - [`Tool`] - A capability an agent can invoke
//! - [`AgentDescriptor`] / [`Task`] - What to run and who runs it
//! - [`CrewExecutor`] - Runs one agent on one task to completion
//! - [`AutocoderError`] / [`ModelError`] / [`Result`] - Unified error handling
//!
//! ## Core Traits
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait ChatModel: Send + Sync {
//!     fn name(&self) -> &str;
//!     async fn complete(&self, credential: &str, request: ChatRequest)
//!         -> Result<ChatResponse, ModelError>;
//! }
//!
//! #[async_trait]
//! pub trait CrewExecutor: Send + Sync {
//!     async fn kickoff(&self, agent: &AgentDescriptor, task: &Task) -> Result<String>;
//! }
//! ```

pub mod agent;
pub mod error;
pub mod model;
pub mod tool;

pub use agent::{
    AgentDescriptor, AgentDescriptorBuilder, CrewExecutor, LlmConfig, LlmProvider, Task,
};
pub use error::{AutocoderError, ModelError, Result};
pub use model::{
    ChatMessage, ChatModel, ChatRequest, ChatResponse, ChatRole, Choice, FunctionCall,
    FunctionDeclaration, ToolCall, ToolDeclaration, Usage,
};
pub use tool::Tool;
