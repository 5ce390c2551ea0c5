use autocoder_telemetry::LogFormat;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "autocoder")]
#[command(about = "Inline code completion and coding-crew backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP and Socket.IO server
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "AUTOCODER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "AUTOCODER_PORT", default_value = "5001")]
    pub port: u16,

    /// Model used for inline completions
    #[arg(
        long,
        env = "AUTOCODER_COMPLETION_MODEL",
        default_value = autocoder_server::DEFAULT_COMPLETION_MODEL
    )]
    pub completion_model: String,

    /// Comma-separated CORS origins (empty allows any origin)
    #[arg(long, env = "AUTOCODER_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Cancel a client's running workflows when it disconnects
    #[arg(long, env = "AUTOCODER_CANCEL_ON_DISCONNECT")]
    pub cancel_on_disconnect: bool,

    /// Seconds an inline completion may wait on the provider
    #[arg(long, env = "AUTOCODER_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout_secs: u64,

    /// Log output format (pretty or json)
    #[arg(long, env = "AUTOCODER_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}
