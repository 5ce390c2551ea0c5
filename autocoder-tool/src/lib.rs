//! # autocoder-tool
//!
//! Capability tools available to autocoder agents.
//!
//! ## Overview
//!
//! - [`DirectoryReadTool`] - Recursive project listing (`read_directory`)
//! - [`FileReadTool`] / [`FileWriteTool`] - Text file IO (`read_file`, `write_file`)
//! - [`CodeExecutionTool`] - Run Python or shell snippets (`execute_code`)
//! - [`WebSearchTool`] - Serper-backed web search (`web_search`)
//! - [`ProjectToolset`] - All of the above bound to one project directory
//!
//! File-system tools resolve paths through [`ProjectRoot`] and refuse anything
//! outside it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autocoder_core::Tool;
//! use autocoder_tool::ProjectToolset;
//! use serde_json::json;
//!
//! # async fn example() -> autocoder_core::Result<()> {
//! let tools = ProjectToolset::new("./my-project")?;
//! let listing = tools.read_directory.execute(json!({})).await?;
//! println!("{listing}");
//! # Ok(())
//! # }
//! ```

pub mod builtin;
mod scope;
mod toolset;

pub use builtin::{
    CodeExecutionTool, DirectoryReadTool, FileReadTool, FileWriteTool, SERPER_API_URL,
    WebSearchTool,
};
pub use scope::ProjectRoot;
pub use toolset::ProjectToolset;
