use super::parse_args;
use crate::ProjectRoot;
use autocoder_core::{AutocoderError, Result, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

/// Writes a text file under the project root, creating parent directories.
pub struct FileWriteTool {
    root: ProjectRoot,
}

impl FileWriteTool {
    pub fn new(root: ProjectRoot) -> Self {
        Self { root }
    }
}

fn default_overwrite() -> bool {
    true
}

#[derive(Deserialize)]
struct Args {
    path: String,
    content: String,
    #[serde(default = "default_overwrite")]
    overwrite: bool,
}

#[async_trait]
impl Tool for FileWriteTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write text content to a file in the project, creating directories as needed."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "File path relative to the project root"},
                "content": {"type": "string", "description": "Full file content to write"},
                "overwrite": {
                    "type": "boolean",
                    "description": "Replace an existing file (default: true)"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: Args = parse_args(self.name(), args)?;
        let path = self.root.resolve(&args.path)?;

        if path == self.root.path() || path.is_dir() {
            return Err(AutocoderError::Tool(format!("Not a file path: {}", args.path)));
        }
        if !args.overwrite && path.exists() {
            return Err(AutocoderError::Tool(format!(
                "File already exists: {} (set overwrite to true to replace it)",
                args.path
            )));
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, args.content.as_bytes())
            .await
            .map_err(|e| AutocoderError::Tool(format!("Failed to write {}: {e}", args.path)))?;

        tracing::info!(path = %args.path, bytes = args.content.len(), "Wrote file");
        Ok(json!({ "path": args.path, "bytes_written": args.content.len() }))
    }
}
