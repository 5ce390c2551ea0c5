//! Telemetry initialization and configuration

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Output format of the console log layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize console logging, filtered by `RUST_LOG` (default `info`).
///
/// Only the first call installs a subscriber; later calls are no-ops.
///
/// # Example
/// ```
/// use autocoder_telemetry::{LogFormat, init_telemetry};
/// init_telemetry("autocoder", LogFormat::Pretty).expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(
    service_name: &str,
    format: LogFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut result = Ok(());

    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(env_filter());
        let installed = match format {
            LogFormat::Pretty => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_line_number(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_line_number(true),
                )
                .try_init(),
        };

        match installed {
            Ok(()) => tracing::info!(service.name = service_name, "Telemetry initialized"),
            Err(e) => result = Err(e.into()),
        }
    });

    result
}
