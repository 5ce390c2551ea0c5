//! # autocoder-telemetry
//!
//! Logging setup shared by the autocoder binaries.
//!
//! ```rust
//! use autocoder_telemetry::{LogFormat, init_telemetry};
//!
//! init_telemetry("autocoder", LogFormat::Pretty).ok();
//! tracing::info!("ready");
//! ```

pub mod init;

pub use init::{LogFormat, init_telemetry};
pub use tracing::{Level, debug, error, info, instrument, trace, warn};
