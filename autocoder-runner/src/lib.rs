//! # autocoder-runner
//!
//! Runs the coding crew through its four phases and reports progress.
//!
//! ## Overview
//!
//! - [`WorkflowRunner`] - Plan, implement, test and refactor for one request
//! - [`WorkflowState`] - The phase state machine and each phase's task
//! - [`EventSink`] - Where log lines and the final [`CrewOutcome`] go
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autocoder_agent::{CrewFactory, CrewSettings, LlmCrewExecutor};
//! use autocoder_runner::{RunEvent, WorkflowRequest, WorkflowRunner, WorkflowRunnerConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> autocoder_core::Result<()> {
//! let settings = CrewSettings::from_env();
//! let executor =
//!     LlmCrewExecutor::with_default_providers()?.with_default_llm(settings.llm.resolve());
//! let runner = WorkflowRunner::new(WorkflowRunnerConfig::new(
//!     CrewFactory::new(settings),
//!     Arc::new(executor),
//! ));
//!
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel::<RunEvent>();
//! let request = WorkflowRequest::new("Add a divide function", ".");
//! let outcome = runner.run("session-1", &request, &tx).await;
//! println!("{:?}", outcome.status);
//! # Ok(())
//! # }
//! ```

mod phase;
mod runner;
mod sink;

pub use phase::{PhaseInput, WorkflowState};
pub use runner::{
    REPORT_SEPARATOR, WorkflowRequest, WorkflowRunner, WorkflowRunnerConfig,
};
pub use sink::{CrewOutcome, CrewStatus, EventSink, RunEvent};
