//! # autocoder-model
//!
//! Chat-completion clients for autocoder.
//!
//! ## Overview
//!
//! - [`OpenAICompatible`] - Client for any endpoint speaking the OpenAI chat-completions format
//! - [`provider`] - Presets for OpenAI and Gemini's OpenAI-compatible endpoint
//! - [`RetryConfig`] / [`execute_with_retry`] - Backoff for transient provider failures
//! - [`MockChatModel`] - Scripted model for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autocoder_core::{ChatMessage, ChatModel, ChatRequest, LlmProvider};
//! use autocoder_model::provider;
//!
//! # async fn example() -> autocoder_core::Result<()> {
//! let client = provider::for_provider(LlmProvider::OpenAi)?;
//! let request = ChatRequest::new("gpt-4o-mini", vec![ChatMessage::user("Hello")]);
//! let key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
//! let response = client.complete(&key, request).await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```
//!
//! The credential is passed on every call; clients never store it.

pub mod mock;
pub mod openai_compatible;
pub mod provider;
pub mod retry;

pub use mock::MockChatModel;
pub use openai_compatible::{OPENAI_API_BASE, OpenAICompatible, OpenAICompatibleConfig};
pub use provider::GEMINI_OPENAI_API_BASE;
pub use retry::{RetryConfig, execute_with_retry};
