use async_trait::async_trait;
use autocoder_core::{AgentDescriptor, AutocoderError, CrewExecutor, Result, Task};
use autocoder_runner::{CrewOutcome, CrewStatus};
use autocoder_server::{ServerConfig, create_app};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio::sync::{Notify, Semaphore};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

const MANAGER_ROLE: &str = "Context-Aware Software Project Manager";

/// Answers phase N with "PN", optionally failing one phase.
struct PhaseExecutor {
    calls: AtomicUsize,
    fail_at: Option<usize>,
}

#[async_trait]
impl CrewExecutor for PhaseExecutor {
    async fn kickoff(&self, _agent: &AgentDescriptor, _task: &Task) -> Result<String> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(index) {
            return Err(AutocoderError::Agent("model unavailable".to_string()));
        }
        Ok(format!("P{}", index + 1))
    }
}

/// Holds every phase until the gate opens and records phases that were dropped mid-flight.
struct GatedExecutor {
    gate: Semaphore,
    roles: Mutex<Vec<String>>,
    entered: Notify,
    abandoned: Notify,
}

impl GatedExecutor {
    fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            roles: Mutex::new(Vec::new()),
            entered: Notify::new(),
            abandoned: Notify::new(),
        }
    }

    fn open(&self) {
        self.gate.add_permits(16);
    }

    fn roles(&self) -> Vec<String> {
        self.roles.lock().unwrap().clone()
    }
}

struct AbandonGuard<'a> {
    abandoned: &'a Notify,
    armed: bool,
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.abandoned.notify_one();
        }
    }
}

#[async_trait]
impl CrewExecutor for GatedExecutor {
    async fn kickoff(&self, agent: &AgentDescriptor, _task: &Task) -> Result<String> {
        self.roles.lock().unwrap().push(agent.role().to_string());
        self.entered.notify_one();

        let mut guard = AbandonGuard { abandoned: &self.abandoned, armed: true };
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| AutocoderError::Agent("gate closed".to_string()))?;
        guard.armed = false;
        Ok(format!("done by {}", agent.role()))
    }
}

async fn start_server(config: ServerConfig) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_app(config)).await.unwrap();
    });
    addr
}

fn phase_config(fail_at: Option<usize>) -> ServerConfig {
    let executor = Arc::new(PhaseExecutor { calls: AtomicUsize::new(0), fail_at });
    ServerConfig::new(None, executor).with_log_pause(Duration::ZERO)
}

/// Minimal Socket.IO v5 client over the Engine.IO websocket transport.
struct SocketIoClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl SocketIoClient {
    async fn connect(addr: SocketAddr) -> Self {
        let url = format!("ws://{addr}/socket.io/?EIO=4&transport=websocket");
        let (ws, _) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();
        let mut client = Self { ws };

        let open = client.next_packet().await;
        assert!(open.starts_with('0'), "expected engine open packet, got {open}");
        client.send_packet("40").await;
        let connected = client.next_packet().await;
        assert!(connected.starts_with("40"), "expected namespace connect, got {connected}");
        client
    }

    async fn send_packet(&mut self, packet: &str) {
        self.ws.send(Message::Text(packet.into())).await.unwrap();
    }

    /// Next engine packet, answering heartbeats on the way.
    async fn next_packet(&mut self) -> String {
        loop {
            let message = tokio::time::timeout(Duration::from_secs(10), self.ws.next())
                .await
                .expect("timed out waiting for packet")
                .expect("socket closed")
                .unwrap();
            match message {
                Message::Text(text) if text.as_str() == "2" => self.send_packet("3").await,
                Message::Text(text) => return text.as_str().to_string(),
                _ => {}
            }
        }
    }

    async fn emit(&mut self, event: &str, payload: Value) {
        self.send_packet(&format!("42{}", json!([event, payload]))).await;
    }

    async fn next_event(&mut self) -> (String, Value) {
        loop {
            let packet = self.next_packet().await;
            if let Some(body) = packet.strip_prefix("42") {
                let mut frame: Vec<Value> = serde_json::from_str(body).unwrap();
                let payload = if frame.len() > 1 { frame.remove(1) } else { Value::Null };
                let name = frame[0].as_str().unwrap().to_string();
                return (name, payload);
            }
        }
    }

    async fn collect_run(&mut self) -> (Vec<String>, CrewOutcome) {
        let mut logs = Vec::new();
        loop {
            match self.next_event().await {
                (name, payload) if name == "log_message" => {
                    logs.push(payload["data"].as_str().unwrap().to_string());
                }
                (name, payload) if name == "crew_finished" => {
                    return (logs, serde_json::from_value(payload).unwrap());
                }
                (name, _) => panic!("unexpected event {name}"),
            }
        }
    }

    async fn close(mut self) {
        self.ws.close(None).await.unwrap();
    }
}

async fn wait_for_phases(executor: &GatedExecutor, count: usize) -> bool {
    let wait = async {
        while executor.roles().len() < count {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(10), wait).await.is_ok()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_full_run_over_socket_io() {
    let addr = start_server(phase_config(None)).await;
    let project = TempDir::new().unwrap();
    let mut client = SocketIoClient::connect(addr).await;

    client.emit("start_crew", json!("not an object")).await;
    client
        .emit("start_crew", json!({"prompt": "build a calculator", "project_dir": project.path()}))
        .await;

    let (logs, outcome) = client.collect_run().await;

    assert_eq!(logs[0], format!("Starting crew in directory: {}", project.path().display()));
    assert!(logs.contains(&"Plan received: P1".to_string()));
    assert_eq!(logs.last().unwrap(), "PROJECT COMPLETED SUCCESSFULLY!");
    assert_eq!(outcome.status, CrewStatus::Success);
    assert_eq!(outcome.result, "P1\n\n----\nP2\n\n----\nP3\n\n----\nP4");

    client.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failed_phase_reports_error_once() {
    let addr = start_server(phase_config(Some(1))).await;
    let project = TempDir::new().unwrap();
    let mut client = SocketIoClient::connect(addr).await;

    client.emit("start_crew", json!({"prompt": "x", "project_dir": project.path()})).await;

    let (logs, outcome) = client.collect_run().await;

    assert!(!logs.iter().any(|l| l.starts_with("Phase 3:")));
    assert_eq!(logs.last().unwrap(), "ERROR: Agent error: model unavailable");
    assert_eq!(outcome.status, CrewStatus::Error);
    assert_eq!(outcome.result, "Agent error: model unavailable");

    let extra = tokio::time::timeout(Duration::from_millis(200), client.next_event()).await;
    assert!(extra.is_err(), "unexpected event after finish: {extra:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_outlives_disconnect_by_default() {
    let executor = Arc::new(GatedExecutor::new());
    let config = ServerConfig::new(None, executor.clone()).with_log_pause(Duration::ZERO);
    let addr = start_server(config).await;
    let project = TempDir::new().unwrap();
    let mut client = SocketIoClient::connect(addr).await;

    client.emit("start_crew", json!({"prompt": "x", "project_dir": project.path()})).await;
    tokio::time::timeout(Duration::from_secs(10), executor.entered.notified())
        .await
        .expect("first phase should start");
    client.close().await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    executor.open();

    assert!(wait_for_phases(&executor, 4).await, "phases so far: {:?}", executor.roles());
    let dropped = tokio::time::timeout(Duration::from_millis(100), executor.abandoned.notified());
    assert!(dropped.await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_disconnect_cancels_run_when_configured() {
    let executor = Arc::new(GatedExecutor::new());
    let config = ServerConfig::new(None, executor.clone())
        .with_log_pause(Duration::ZERO)
        .with_cancel_on_disconnect(true);
    let addr = start_server(config).await;
    let project = TempDir::new().unwrap();
    let mut client = SocketIoClient::connect(addr).await;

    client.emit("start_crew", json!({"prompt": "x", "project_dir": project.path()})).await;
    tokio::time::timeout(Duration::from_secs(10), executor.entered.notified())
        .await
        .expect("first phase should start");
    client.close().await;

    tokio::time::timeout(Duration::from_secs(10), executor.abandoned.notified())
        .await
        .expect("in-flight phase should be dropped on disconnect");

    executor.open();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(executor.roles(), vec![MANAGER_ROLE.to_string()]);
}
