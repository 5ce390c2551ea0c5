use crate::cli::ServeArgs;
use anyhow::{Context, Result};
use autocoder_agent::{CrewSettings, LlmCrewExecutor};
use autocoder_core::{ChatModel, LlmProvider};
use autocoder_model::provider;
use autocoder_server::{CompletionSettings, ServerConfig, create_app};
use std::sync::Arc;
use std::time::Duration;

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    if let Err(e) = autocoder_telemetry::init_telemetry("autocoder", args.log_format) {
        eprintln!("Failed to initialize telemetry: {}", e);
    }

    let crew = CrewSettings::from_env();
    let completion_model: Arc<dyn ChatModel> =
        Arc::new(provider::for_provider(LlmProvider::OpenAi)?);
    let executor = LlmCrewExecutor::with_default_providers()?;

    let completion = CompletionSettings::default()
        .with_model(args.completion_model)
        .with_server_api_key(std::env::var("OPENAI_API_KEY").ok());

    if args.allowed_origins.is_empty() {
        tracing::warn!("No allowed origins configured; CORS accepts any origin");
    }

    let config = ServerConfig::new(Some(completion_model), Arc::new(executor))
        .with_completion(completion)
        .with_crew(crew)
        .with_allowed_origins(args.allowed_origins)
        .with_request_timeout(Duration::from_secs(args.request_timeout_secs))
        .with_cancel_on_disconnect(args.cancel_on_disconnect);

    let app = create_app(config);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("autocoder server listening on http://{}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
