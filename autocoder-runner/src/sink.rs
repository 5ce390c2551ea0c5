use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrewStatus {
    Success,
    Error,
}

/// Final status of one workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewOutcome {
    pub status: CrewStatus,
    pub result: String,
}

impl CrewOutcome {
    pub fn success(result: impl Into<String>) -> Self {
        Self { status: CrewStatus::Success, result: result.into() }
    }

    pub fn error(result: impl Into<String>) -> Self {
        Self { status: CrewStatus::Error, result: result.into() }
    }

    pub fn is_success(&self) -> bool {
        self.status == CrewStatus::Success
    }
}

/// Event produced by a workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Log(String),
    Finished(CrewOutcome),
}

/// Destination for a run's progress lines and its final outcome.
///
/// Delivery is best effort: a sink whose client has gone away drops events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn log(&self, message: &str);
    async fn finish(&self, outcome: CrewOutcome);
}

#[async_trait]
impl EventSink for mpsc::UnboundedSender<RunEvent> {
    async fn log(&self, message: &str) {
        if self.send(RunEvent::Log(message.to_string())).is_err() {
            tracing::debug!("Log line dropped; receiver is gone");
        }
    }

    async fn finish(&self, outcome: CrewOutcome) {
        if self.send(RunEvent::Finished(outcome)).is_err() {
            tracing::debug!("Finish event dropped; receiver is gone");
        }
    }
}
