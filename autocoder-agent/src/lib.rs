//! # autocoder-agent
//!
//! The coding crew and the executor that runs it.
//!
//! ## Overview
//!
//! - [`CrewFactory`] - Builds the manager, developer, QA and refactorer agents for a project
//! - [`LlmCrewExecutor`] - [`CrewExecutor`](autocoder_core::CrewExecutor) over a tool-calling model
//! - [`resolve_llm_config`] - Chooses between OpenAI and Gemini credentials
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autocoder_agent::{CrewFactory, CrewSettings, LlmCrewExecutor};
//! use autocoder_core::{CrewExecutor, Task};
//!
//! # async fn example() -> autocoder_core::Result<()> {
//! let settings = CrewSettings::from_env();
//! let crew = CrewFactory::new(settings.clone()).build("./my-project")?;
//! let executor =
//!     LlmCrewExecutor::with_default_providers()?.with_default_llm(settings.llm.resolve());
//!
//! let plan = executor
//!     .kickoff(&crew.manager, &Task::new("Plan a CLI calculator", "A detailed plan"))
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

mod crew;
mod executor;
mod llm_config;

pub use crew::{Crew, CrewFactory, CrewRole, CrewSettings, LlmSource};
pub use executor::LlmCrewExecutor;
pub use llm_config::{llm_config_from_env, resolve_llm_config};
