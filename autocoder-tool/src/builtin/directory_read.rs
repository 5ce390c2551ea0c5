use super::parse_args;
use crate::ProjectRoot;
use autocoder_core::{AutocoderError, Result, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use walkdir::{DirEntry, WalkDir};

const SKIPPED_DIRS: &[&str] = &[".git", "target", "node_modules", "__pycache__", ".venv"];
const MAX_ENTRIES: usize = 1000;

/// Recursive listing of the project directory.
pub struct DirectoryReadTool {
    root: ProjectRoot,
}

impl DirectoryReadTool {
    pub fn new(root: ProjectRoot) -> Self {
        Self { root }
    }
}

#[derive(Deserialize)]
struct Args {
    #[serde(default)]
    directory: Option<String>,
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

#[async_trait]
impl Tool for DirectoryReadTool {
    fn name(&self) -> &str {
        "read_directory"
    }

    fn description(&self) -> &str {
        "List the files and subdirectories of the project recursively. Directories end with '/'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "Directory relative to the project root (default: the root)"
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: Args = parse_args(self.name(), args)?;
        let dir = self.root.resolve(args.directory.as_deref().unwrap_or("."))?;
        if !dir.is_dir() {
            return Err(AutocoderError::Tool(format!(
                "Not a directory: {}",
                self.root.relative(&dir)
            )));
        }

        let root = self.root.clone();
        let (entries, truncated) = tokio::task::spawn_blocking(move || {
            let mut entries = Vec::new();
            let mut truncated = false;
            let walker = WalkDir::new(&dir)
                .min_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !is_skipped(entry));
            for entry in walker.filter_map(|entry| entry.ok()) {
                if entries.len() >= MAX_ENTRIES {
                    truncated = true;
                    break;
                }
                let mut display = root.relative(entry.path());
                if entry.file_type().is_dir() {
                    display.push('/');
                }
                entries.push(display);
            }
            (entries, truncated)
        })
        .await
        .map_err(|e| AutocoderError::Tool(format!("Directory listing failed: {e}")))?;

        tracing::debug!(count = entries.len(), truncated, "Listed project directory");
        Ok(json!({ "entries": entries, "truncated": truncated }))
    }
}
