use autocoder_agent::CrewRole;
use autocoder_core::Task;

/// Position of a workflow run. Phases advance strictly in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Plan,
    Implement,
    Test,
    Refactor,
    Done,
    Failed,
}

/// Values a phase task is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct PhaseInput<'a> {
    pub user_prompt: &'a str,
    pub project_dir: &'a str,
    pub plan: &'a str,
}

impl WorkflowState {
    /// State after the current phase succeeds. Terminal states stay put.
    pub fn next(self) -> Self {
        match self {
            WorkflowState::Plan => WorkflowState::Implement,
            WorkflowState::Implement => WorkflowState::Test,
            WorkflowState::Test => WorkflowState::Refactor,
            WorkflowState::Refactor => WorkflowState::Done,
            terminal => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Done | WorkflowState::Failed)
    }

    pub fn role(self) -> Option<CrewRole> {
        match self {
            WorkflowState::Plan => Some(CrewRole::Manager),
            WorkflowState::Implement => Some(CrewRole::Developer),
            WorkflowState::Test => Some(CrewRole::Qa),
            WorkflowState::Refactor => Some(CrewRole::Refactorer),
            WorkflowState::Done | WorkflowState::Failed => None,
        }
    }

    /// Log line emitted before the phase starts.
    pub fn announcement(self) -> Option<&'static str> {
        match self {
            WorkflowState::Plan => Some(
                "Phase 1: The Project Manager is analyzing the project and planning the tasks...",
            ),
            WorkflowState::Implement => {
                Some("Phase 2: The Developer is implementing the code according to the plan...")
            }
            WorkflowState::Test => Some("Phase 3: The QA Engineer is writing and running tests..."),
            WorkflowState::Refactor => {
                Some("Phase 4: The Refactoring Specialist is improving the code...")
            }
            WorkflowState::Done | WorkflowState::Failed => None,
        }
    }

    /// Prefix of the log line carrying the phase result.
    pub fn result_label(self) -> &'static str {
        match self {
            WorkflowState::Plan => "Plan received: ",
            WorkflowState::Implement => "Development result: ",
            WorkflowState::Test => "QA result: ",
            WorkflowState::Refactor => "Refactoring result: ",
            WorkflowState::Done | WorkflowState::Failed => "",
        }
    }

    pub fn task(self, input: PhaseInput<'_>) -> Option<Task> {
        let task = match self {
            WorkflowState::Plan => Task::new(
                format!(
                    "Analyze the user's request: '{}' in the context of the directory '{}'.\n\
                     Use the `read_directory` tool to understand the file structure.\n\
                     Create a detailed plan, specifying the files to be created or modified.",
                    input.user_prompt, input.project_dir
                ),
                "A clear and detailed plan.",
            ),
            WorkflowState::Implement => Task::new(
                format!(
                    "Implement the changes and/or new files described in the following \
                     plan:\n\n{}\n\nMake sure the code is organized, well documented and follows \
                     Python best practices.",
                    input.plan
                ),
                "Code implemented or modified according to the plan.",
            ),
            WorkflowState::Test => Task::new(
                format!(
                    "Based on the following plan and the current code of the project, write unit \
                     tests with pytest that validate the new functionality and run them.\n\n\
                     Plan:\n{}\n\nIf the tests fail, describe the failures.",
                    input.plan
                ),
                "All tests passed, or a list of the failures found.",
            ),
            WorkflowState::Refactor => Task::new(
                "Analyze the updated code in the project and refactor it to improve clarity, \
                 efficiency and adherence to Python best practices. Do not change the business \
                 logic.",
                "Refactored and optimized code.",
            ),
            WorkflowState::Done | WorkflowState::Failed => return None,
        };
        Some(task)
    }
}
