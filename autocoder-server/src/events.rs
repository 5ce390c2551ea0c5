//! Payloads of the Socket.IO event channel.
//!
//! | Event | Direction | Payload |
//! |-------|-----------|---------|
//! | `start_crew` | client to server | `{"prompt", "project_dir"}` |
//! | `log_message` | server to client | `{"data"}` |
//! | `crew_finished` | server to client | `{"status", "result"}` |

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const START_CREW: &str = "start_crew";
pub const LOG_MESSAGE: &str = "log_message";
pub const CREW_FINISHED: &str = "crew_finished";

fn default_project_dir() -> String {
    ".".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCrew {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_project_dir")]
    pub project_dir: String,
}

impl Default for StartCrew {
    fn default() -> Self {
        Self { prompt: String::new(), project_dir: default_project_dir() }
    }
}

impl StartCrew {
    /// `null` stands for an empty payload.
    pub fn from_payload(payload: Value) -> Result<Self, serde_json::Error> {
        match payload {
            Value::Null => Ok(Self::default()),
            payload => serde_json::from_value(payload),
        }
    }
}

/// One progress line of a workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocoder_runner::CrewOutcome;
    use serde_json::json;

    #[test]
    fn test_start_crew_defaults() {
        assert_eq!(StartCrew::from_payload(json!({})).unwrap(), StartCrew::default());
        assert_eq!(StartCrew::from_payload(Value::Null).unwrap().project_dir, ".");
    }

    #[test]
    fn test_start_crew_fields() {
        let payload = json!({"prompt": "add tests", "project_dir": "/srv/app"});
        let start = StartCrew::from_payload(payload).unwrap();
        assert_eq!(start.prompt, "add tests");
        assert_eq!(start.project_dir, "/srv/app");
    }

    #[test]
    fn test_start_crew_rejects_non_objects() {
        assert!(StartCrew::from_payload(json!("just a prompt")).is_err());
        assert!(StartCrew::from_payload(json!({"prompt": 7})).is_err());
    }

    #[test]
    fn test_outbound_payload_shapes() {
        assert_eq!(
            serde_json::to_value(LogMessage { data: "hello".to_string() }).unwrap(),
            json!({"data": "hello"})
        );
        assert_eq!(
            serde_json::to_value(CrewOutcome::error("boom")).unwrap(),
            json!({"status": "error", "result": "boom"})
        );
    }
}
