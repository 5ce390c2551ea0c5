use super::parse_args;
use crate::ProjectRoot;
use autocoder_core::{AutocoderError, Result, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

/// Reads a UTF-8 file under the project root.
pub struct FileReadTool {
    root: ProjectRoot,
}

impl FileReadTool {
    pub fn new(root: ProjectRoot) -> Self {
        Self { root }
    }
}

#[derive(Deserialize)]
struct Args {
    path: String,
}

#[async_trait]
impl Tool for FileReadTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the full contents of a text file in the project."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "File path relative to the project root"}
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: Args = parse_args(self.name(), args)?;
        let path = self.root.resolve(&args.path)?;

        if !path.is_file() {
            return Err(AutocoderError::Tool(format!("File not found: {}", args.path)));
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| AutocoderError::Tool(format!("Failed to read {}: {e}", args.path)))?;

        tracing::debug!(path = %args.path, bytes = content.len(), "Read file");
        Ok(json!({ "path": args.path, "content": content }))
    }
}
