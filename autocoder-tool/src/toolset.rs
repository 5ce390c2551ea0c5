use crate::ProjectRoot;
use crate::builtin::{
    CodeExecutionTool, DirectoryReadTool, FileReadTool, FileWriteTool, WebSearchTool,
};
use autocoder_core::{Result, Tool};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// One instance of every capability tool, bound to a single project directory.
#[derive(Clone)]
pub struct ProjectToolset {
    root: ProjectRoot,
    pub read_directory: Arc<dyn Tool>,
    pub read_file: Arc<dyn Tool>,
    pub write_file: Arc<dyn Tool>,
    pub execute_code: Arc<dyn Tool>,
    pub web_search: Arc<dyn Tool>,
}

impl ProjectToolset {
    pub fn new(project_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_web_search(project_dir, WebSearchTool::from_env())
    }

    pub fn with_web_search(
        project_dir: impl AsRef<Path>,
        web_search: WebSearchTool,
    ) -> Result<Self> {
        let root = ProjectRoot::new(project_dir)?;
        Ok(Self {
            read_directory: Arc::new(DirectoryReadTool::new(root.clone())),
            read_file: Arc::new(FileReadTool::new(root.clone())),
            write_file: Arc::new(FileWriteTool::new(root.clone())),
            execute_code: Arc::new(CodeExecutionTool::new(root.clone())),
            web_search: Arc::new(web_search),
            root,
        })
    }

    /// Replace the code-execution tool with one using `timeout`.
    pub fn with_code_timeout(mut self, timeout: Duration) -> Self {
        let tool = CodeExecutionTool::new(self.root.clone()).with_timeout(timeout);
        self.execute_code = Arc::new(tool);
        self
    }

    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }
}
