mod code_execution;
mod directory_read;
mod file_read;
mod file_write;
mod web_search;

pub use code_execution::CodeExecutionTool;
pub use directory_read::DirectoryReadTool;
pub use file_read::FileReadTool;
pub use file_write::FileWriteTool;
pub use web_search::{SERPER_API_URL, WebSearchTool};

use autocoder_core::{AutocoderError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| AutocoderError::Tool(format!("Invalid arguments for {tool}: {e}")))
}
