use crate::llm_config::llm_config_from_env;
use autocoder_core::{AgentDescriptor, LlmConfig, Result};
use autocoder_tool::{ProjectToolset, WebSearchTool};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Positions in the coding crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrewRole {
    Manager,
    Developer,
    Qa,
    Refactorer,
}

impl CrewRole {
    pub const ALL: [CrewRole; 4] =
        [CrewRole::Manager, CrewRole::Developer, CrewRole::Qa, CrewRole::Refactorer];

    pub fn key(&self) -> &'static str {
        match self {
            CrewRole::Manager => "manager",
            CrewRole::Developer => "developer",
            CrewRole::Qa => "qa",
            CrewRole::Refactorer => "refactorer",
        }
    }
}

impl fmt::Display for CrewRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Where a crew's model credential comes from.
#[derive(Clone)]
pub enum LlmSource {
    /// The same credential for every run.
    Fixed(Option<LlmConfig>),
    /// Looked up again each time a crew is built.
    Resolver(Arc<dyn Fn() -> Option<LlmConfig> + Send + Sync>),
}

impl LlmSource {
    /// Reads `OPENAI_API_KEY` / `GEMINI_API_KEY` on every run.
    pub fn environment() -> Self {
        Self::Resolver(Arc::new(llm_config_from_env))
    }

    pub fn resolve(&self) -> Option<LlmConfig> {
        match self {
            Self::Fixed(llm) => llm.clone(),
            Self::Resolver(resolve) => resolve(),
        }
    }
}

impl fmt::Debug for LlmSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(llm) => f.debug_tuple("Fixed").field(llm).finish(),
            Self::Resolver(_) => f.write_str("Resolver"),
        }
    }
}

/// Inputs the crew factory needs besides the project directory.
#[derive(Debug, Clone)]
pub struct CrewSettings {
    pub llm: LlmSource,
    pub serper_api_key: Option<String>,
    pub code_timeout: Duration,
}

impl Default for CrewSettings {
    fn default() -> Self {
        Self {
            llm: LlmSource::Fixed(None),
            serper_api_key: None,
            code_timeout: Duration::from_secs(60),
        }
    }
}

impl CrewSettings {
    /// Model credential resolved from the environment per run; `SERPER_API_KEY` read now.
    pub fn from_env() -> Self {
        Self {
            llm: LlmSource::environment(),
            serper_api_key: std::env::var("SERPER_API_KEY").ok(),
            ..Default::default()
        }
    }

    pub fn with_llm(mut self, llm: Option<LlmConfig>) -> Self {
        self.llm = LlmSource::Fixed(llm);
        self
    }

    pub fn with_llm_resolver(
        mut self,
        resolve: impl Fn() -> Option<LlmConfig> + Send + Sync + 'static,
    ) -> Self {
        self.llm = LlmSource::Resolver(Arc::new(resolve));
        self
    }

    pub fn with_serper_api_key(mut self, key: impl Into<String>) -> Self {
        self.serper_api_key = Some(key.into());
        self
    }

    pub fn with_code_timeout(mut self, timeout: Duration) -> Self {
        self.code_timeout = timeout;
        self
    }
}

/// The four agents of one workflow run.
#[derive(Debug)]
pub struct Crew {
    pub manager: AgentDescriptor,
    pub developer: AgentDescriptor,
    pub qa: AgentDescriptor,
    pub refactorer: AgentDescriptor,
}

impl Crew {
    pub fn agent(&self, role: CrewRole) -> &AgentDescriptor {
        match role {
            CrewRole::Manager => &self.manager,
            CrewRole::Developer => &self.developer,
            CrewRole::Qa => &self.qa,
            CrewRole::Refactorer => &self.refactorer,
        }
    }
}

/// Builds crews whose tools are scoped to a project directory.
#[derive(Debug, Clone, Default)]
pub struct CrewFactory {
    settings: CrewSettings,
}

impl CrewFactory {
    pub fn new(settings: CrewSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CrewSettings {
        &self.settings
    }

    /// Fresh agents for one run. The credential is resolved here, not at startup.
    pub fn build(&self, project_dir: impl AsRef<Path>) -> Result<Crew> {
        let tools = ProjectToolset::with_web_search(
            project_dir,
            WebSearchTool::new(self.settings.serper_api_key.clone()),
        )?
        .with_code_timeout(self.settings.code_timeout);
        let llm = self.settings.llm.resolve();

        let manager = AgentDescriptor::builder("Context-Aware Software Project Manager")
            .goal(
                "Analyze a software request in the context of an existing codebase. Identify the \
                 relevant files and create a detailed development plan for modifying existing \
                 files or creating new ones.",
            )
            .backstory(
                "You are an experienced project manager who excels at understanding existing \
                 codebases. You turn high-level requirements into actionable tasks, specifying \
                 exactly which files must be touched.",
            )
            .tool(tools.read_directory.clone())
            .tool(tools.read_file.clone())
            .tool(tools.web_search.clone())
            .allow_delegation(false)
            .llm(llm.clone())
            .build()?;

        let developer = AgentDescriptor::builder("Senior Python Software Developer")
            .goal("Write, modify or fix clean and efficient Python code based on a detailed plan.")
            .backstory(
                "You are an experienced Python programmer who follows plans meticulously. You are \
                 an expert at reading, understanding and modifying existing code as well as \
                 building new features.",
            )
            .tool(tools.read_file.clone())
            .tool(tools.write_file.clone())
            .tool(tools.web_search.clone())
            .allow_delegation(false)
            .llm(llm.clone())
            .build()?;

        let qa = AgentDescriptor::builder("Software Quality Assurance Engineer")
            .goal(
                "Ensure code quality by writing and running rigorous tests, for new features as \
                 well as for changes to existing code.",
            )
            .backstory(
                "You are a meticulous QA engineer. You write and run unit tests with pytest to \
                 validate the code, making sure new changes do not break existing behaviour.",
            )
            .tool(tools.execute_code.clone())
            .tool(tools.read_file.clone())
            .tool(tools.write_file.clone())
            .allow_delegation(false)
            .llm(llm.clone())
            .build()?;

        let refactorer = AgentDescriptor::builder("Code Refactoring Specialist")
            .goal(
                "Improve the quality of already working code, focusing on clarity, efficiency and \
                 adherence to best practices.",
            )
            .backstory(
                "You are a software architect who turns good code into exceptional code. You \
                 analyze code that already passes its tests and refine it.",
            )
            .tool(tools.read_file.clone())
            .tool(tools.write_file.clone())
            .allow_delegation(false)
            .llm(llm)
            .build()?;

        Ok(Crew { manager, developer, qa, refactorer })
    }
}
