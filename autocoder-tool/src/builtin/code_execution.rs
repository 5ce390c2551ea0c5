use super::parse_args;
use crate::ProjectRoot;
use autocoder_core::{AutocoderError, Result, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_OUTPUT_BYTES: usize = 16 * 1024;

/// Runs a Python or shell snippet inside the project directory.
pub struct CodeExecutionTool {
    root: ProjectRoot,
    timeout: Duration,
    python: String,
}

impl CodeExecutionTool {
    pub fn new(root: ProjectRoot) -> Self {
        Self { root, timeout: DEFAULT_TIMEOUT, python: "python3".to_string() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Interpreter used for `language = "python"`.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    fn command_for(&self, language: &str, code: &str) -> Result<Command> {
        let mut command = match language {
            "python" | "python3" | "py" => Command::new(&self.python),
            "sh" | "shell" | "bash" => Command::new("sh"),
            other => {
                return Err(AutocoderError::Tool(format!(
                    "Unsupported language '{other}' (expected python or shell)"
                )));
            }
        };
        command
            .arg("-c")
            .arg(code)
            .current_dir(self.root.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(command)
    }
}

fn default_language() -> String {
    "python".to_string()
}

#[derive(Deserialize)]
struct Args {
    code: String,
    #[serde(default = "default_language")]
    language: String,
}

fn truncate_output(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= MAX_OUTPUT_BYTES {
        return text.into_owned();
    }
    let mut cut = MAX_OUTPUT_BYTES;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}\n... (output truncated)", &text[..cut])
}

#[async_trait]
impl Tool for CodeExecutionTool {
    fn name(&self) -> &str {
        "execute_code"
    }

    fn description(&self) -> &str {
        "Execute Python code or a shell command in the project directory and return its exit \
         code and output. Use it to run tests, e.g. `python3 -m pytest`."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {"type": "string", "description": "Source code or shell command to run"},
                "language": {
                    "type": "string",
                    "enum": ["python", "shell"],
                    "description": "Interpreter to use (default: python)"
                }
            },
            "required": ["code"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: Args = parse_args(self.name(), args)?;
        let child = self
            .command_for(&args.language, &args.code)?
            .spawn()
            .map_err(|e| AutocoderError::Tool(format!("Failed to spawn {}: {e}", args.language)))?;

        tracing::debug!(language = %args.language, "Executing code");

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(json!({
                "exit_code": output.status.code().unwrap_or(-1),
                "stdout": truncate_output(&output.stdout),
                "stderr": truncate_output(&output.stderr),
                "timed_out": false,
            })),
            Ok(Err(e)) => Err(AutocoderError::Tool(format!("Failed to execute code: {e}"))),
            Err(_) => {
                let secs = self.timeout.as_secs();
                tracing::warn!(timeout_secs = secs, "Code execution timed out");
                let message = format!("Execution timed out after {secs} seconds");
                Ok(json!({
                    "exit_code": -1,
                    "stdout": "",
                    "stderr": message,
                    "timed_out": true,
                }))
            }
        }
    }
}
