use crate::phase::{PhaseInput, WorkflowState};
use crate::sink::{CrewOutcome, EventSink};
use autocoder_agent::CrewFactory;
use autocoder_core::{CrewExecutor, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Separator between phase results in the final report.
pub const REPORT_SEPARATOR: &str = "\n\n----\n";

const DEFAULT_LOG_PAUSE: Duration = Duration::from_millis(100);

pub struct WorkflowRunnerConfig {
    pub crew_factory: CrewFactory,
    pub executor: Arc<dyn CrewExecutor>,
    /// Pause after every log line so the transport can flush it.
    pub log_pause: Duration,
}

impl WorkflowRunnerConfig {
    pub fn new(crew_factory: CrewFactory, executor: Arc<dyn CrewExecutor>) -> Self {
        Self { crew_factory, executor, log_pause: DEFAULT_LOG_PAUSE }
    }

    pub fn with_log_pause(mut self, log_pause: Duration) -> Self {
        self.log_pause = log_pause;
        self
    }
}

/// One workflow request from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRequest {
    pub prompt: String,
    pub project_dir: PathBuf,
}

impl WorkflowRequest {
    pub fn new(prompt: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self { prompt: prompt.into(), project_dir: project_dir.into() }
    }
}

/// Drives the plan, implement, test and refactor phases for one request.
pub struct WorkflowRunner {
    crew_factory: CrewFactory,
    executor: Arc<dyn CrewExecutor>,
    log_pause: Duration,
}

impl WorkflowRunner {
    pub fn new(config: WorkflowRunnerConfig) -> Self {
        Self {
            crew_factory: config.crew_factory,
            executor: config.executor,
            log_pause: config.log_pause,
        }
    }

    /// Run all phases, then emit exactly one finish event to `sink`.
    pub async fn run(
        &self,
        session_id: &str,
        request: &WorkflowRequest,
        sink: &dyn EventSink,
    ) -> CrewOutcome {
        let span = tracing::info_span!("workflow", session_id = %session_id);
        async {
            let outcome = match self.run_phases(request, sink).await {
                Ok(report) => {
                    self.log(sink, "PROJECT COMPLETED SUCCESSFULLY!").await;
                    CrewOutcome::success(report)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Workflow failed");
                    self.log(sink, &format!("ERROR: {e}")).await;
                    CrewOutcome::error(e.to_string())
                }
            };
            sink.finish(outcome.clone()).await;
            outcome
        }
        .instrument(span)
        .await
    }

    /// Like [`run`](Self::run), but stops emitting as soon as `cancel` fires.
    ///
    /// Returns `None` when the run was cancelled; no finish event is sent then.
    pub async fn run_until_cancelled(
        &self,
        session_id: &str,
        request: &WorkflowRequest,
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Option<CrewOutcome> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(session_id = %session_id, "Workflow cancelled");
                None
            }
            outcome = self.run(session_id, request, sink) => Some(outcome),
        }
    }

    async fn run_phases(&self, request: &WorkflowRequest, sink: &dyn EventSink) -> Result<String> {
        let project_dir = absolute_display(&request.project_dir);
        self.log(sink, &format!("Starting crew in directory: {project_dir}")).await;

        let crew = self.crew_factory.build(&request.project_dir)?;

        let mut state = WorkflowState::Plan;
        let mut plan = String::new();
        let mut results: Vec<String> = Vec::with_capacity(4);

        while let Some(role) = state.role() {
            if let Some(announcement) = state.announcement() {
                self.log(sink, announcement).await;
            }

            let input =
                PhaseInput { user_prompt: &request.prompt, project_dir: &project_dir, plan: &plan };
            let Some(task) = state.task(input) else { break };

            let result = match self.executor.kickoff(crew.agent(role), &task).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::debug!(from = ?state, to = ?WorkflowState::Failed, "Phase failed");
                    return Err(e);
                }
            };
            self.log(sink, &format!("{}{}", state.result_label(), result)).await;

            if state == WorkflowState::Plan {
                plan = result.clone();
            }
            results.push(result);

            let next = state.next();
            tracing::debug!(from = ?state, to = ?next, "Phase complete");
            state = next;
        }

        Ok(results.join(REPORT_SEPARATOR))
    }

    async fn log(&self, sink: &dyn EventSink, message: &str) {
        tracing::info!("{message}");
        sink.log(message).await;
        if !self.log_pause.is_zero() {
            tokio::time::sleep(self.log_pause).await;
        }
    }
}

fn absolute_display(path: &Path) -> String {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_display_keeps_absolute_paths() {
        assert_eq!(absolute_display(Path::new("/work/calc")), "/work/calc");
        assert!(Path::new(&absolute_display(Path::new("relative/dir"))).is_absolute());
    }
}
