//! # autocoder-server
//!
//! HTTP and Socket.IO front end for autocoder.
//!
//! ## Routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /inline_completion` | Code continuation for an editor prefix, always `200` |
//! | `/socket.io/` | Event channel: `start_crew` in, `log_message` / `crew_finished` out |
//! | `GET /health` | Liveness probe |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autocoder_agent::LlmCrewExecutor;
//! use autocoder_core::LlmProvider;
//! use autocoder_server::{ServerConfig, create_app};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let completion = autocoder_model::provider::for_provider(LlmProvider::OpenAi)?;
//! let config = ServerConfig::new(
//!     Some(Arc::new(completion)),
//!     Arc::new(LlmCrewExecutor::with_default_providers()?),
//! );
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5001").await?;
//! axum::serve(listener, create_app(config)).await?;
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod completion;
pub mod config;
pub mod events;
pub mod rest;

pub use completion::{CompletionRelay, CompletionRequest, CompletionResponse};
pub use config::{CompletionSettings, DEFAULT_COMPLETION_MODEL, SecurityConfig, ServerConfig};
pub use channel::EventChannel;
pub use events::{LogMessage, StartCrew};
pub use rest::{CompletionController, create_app};
