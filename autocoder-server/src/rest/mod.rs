pub mod controllers;

pub use controllers::CompletionController;

use crate::ServerConfig;
use crate::channel::EventChannel;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use socketioxide::SocketIo;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Build CORS layer based on security configuration
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.security.allowed_origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> =
            config.security.allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

/// Create the server application
pub fn create_app(config: ServerConfig) -> Router {
    let completion_controller = CompletionController::new(&config);
    let (socket_layer, io) = SocketIo::new_layer();
    EventChannel::new(&config).attach(&io);

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/inline_completion", post(controllers::completion::inline_completion))
        .with_state(completion_controller)
        .layer(socket_layer);

    let cors_layer = build_cors_layer(&config);

    app.layer(
        ServiceBuilder::new()
            // Tracing for observability
            .layer(TraceLayer::new_for_http())
            // Request body size limit
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(cors_layer)
            // Security headers
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            )),
    )
}

async fn health_check() -> &'static str {
    "OK"
}
