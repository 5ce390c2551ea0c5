//! Socket.IO event channel on the default namespace.
//!
//! Each connected socket may start any number of workflow runs. A run emits
//! its progress to the socket that started it and keeps going after that
//! socket disconnects unless `cancel_on_disconnect` is set.

use crate::ServerConfig;
use crate::events::{CREW_FINISHED, LOG_MESSAGE, LogMessage, START_CREW, StartCrew};
use async_trait::async_trait;
use autocoder_agent::CrewFactory;
use autocoder_runner::{
    CrewOutcome, EventSink, WorkflowRequest, WorkflowRunner, WorkflowRunnerConfig,
};
use serde::Serialize;
use serde_json::Value;
use socketioxide::SocketIo;
use socketioxide::extract::{Data, SocketRef};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Clone)]
pub struct EventChannel {
    runner: Arc<WorkflowRunner>,
    cancel_on_disconnect: bool,
}

impl EventChannel {
    pub fn new(config: &ServerConfig) -> Self {
        let runner = WorkflowRunner::new(
            WorkflowRunnerConfig::new(
                CrewFactory::new(config.crew.clone()),
                config.crew_executor.clone(),
            )
            .with_log_pause(config.log_pause),
        );
        Self { runner: Arc::new(runner), cancel_on_disconnect: config.cancel_on_disconnect }
    }

    /// Register the connection handlers on `io`'s default namespace.
    pub fn attach(self, io: &SocketIo) {
        io.ns("/", move |socket: SocketRef| self.on_connect(socket));
    }

    fn on_connect(&self, socket: SocketRef) {
        info!(session_id = %socket.id, "Client connected");

        // Parent of every run started on this socket.
        let runs = CancellationToken::new();

        let channel = self.clone();
        let run_tokens = runs.clone();
        socket.on(START_CREW, move |socket: SocketRef, Data(payload): Data<Value>| {
            channel.start_crew(socket, payload, run_tokens.child_token());
        });

        let cancel_on_disconnect = self.cancel_on_disconnect;
        socket.on_disconnect(move |socket: SocketRef| {
            if cancel_on_disconnect {
                runs.cancel();
            }
            info!(session_id = %socket.id, "Client disconnected");
        });
    }

    fn start_crew(&self, socket: SocketRef, payload: Value, cancel: CancellationToken) {
        let start = match StartCrew::from_payload(payload) {
            Ok(start) => start,
            Err(e) => {
                warn!(session_id = %socket.id, "Ignoring start_crew: {}", e);
                return;
            }
        };

        let session_id = socket.id.to_string();
        let request = WorkflowRequest::new(start.prompt, start.project_dir);
        info!(
            session_id = %session_id,
            project_dir = %request.project_dir.display(),
            "Starting crew"
        );

        let runner = self.runner.clone();
        let sink = SocketSink { socket };
        tokio::spawn(async move {
            runner.run_until_cancelled(&session_id, &request, &sink, cancel).await;
        });
    }
}

/// Routes a run's events to the socket that started it.
struct SocketSink {
    socket: SocketRef,
}

impl SocketSink {
    fn emit<T: Serialize>(&self, event: &'static str, payload: &T) {
        if let Err(e) = self.socket.emit(event, payload) {
            tracing::debug!(name = event, error = %e, "Client gone; event dropped");
        }
    }
}

#[async_trait]
impl EventSink for SocketSink {
    async fn log(&self, message: &str) {
        self.emit(LOG_MESSAGE, &LogMessage { data: message.to_string() });
    }

    async fn finish(&self, outcome: CrewOutcome) {
        self.emit(CREW_FINISHED, &outcome);
    }
}
