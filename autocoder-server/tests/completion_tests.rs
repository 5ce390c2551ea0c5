use async_trait::async_trait;
use autocoder_agent::LlmCrewExecutor;
use autocoder_core::{ChatModel, ChatRequest, ChatResponse, ChatRole, ModelError};
use autocoder_model::MockChatModel;
use autocoder_server::{
    CompletionResponse, CompletionSettings, SecurityConfig, ServerConfig, create_app,
};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;

/// Answers only after `delay`.
struct SlowModel {
    delay: Duration,
}

#[async_trait]
impl ChatModel for SlowModel {
    fn name(&self) -> &str {
        "slow"
    }

    async fn complete(
        &self,
        _credential: &str,
        _request: ChatRequest,
    ) -> Result<ChatResponse, ModelError> {
        tokio::time::sleep(self.delay).await;
        Ok(ChatResponse::from_text("too late"))
    }
}

fn config_with(model: Option<Arc<MockChatModel>>, server_key: Option<&str>) -> ServerConfig {
    let model = model.map(|m| m as Arc<dyn ChatModel>);
    ServerConfig::new(model, Arc::new(LlmCrewExecutor::new())).with_completion(
        CompletionSettings::default().with_server_api_key(server_key.map(str::to_string)),
    )
}

async fn post_raw(
    config: ServerConfig,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, CompletionResponse) {
    let mut request = Request::builder().method("POST").uri("/inline_completion");
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let response = create_app(config)
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_completion(config: ServerConfig, body: &str) -> (StatusCode, CompletionResponse) {
    post_raw(config, Some("application/json"), body).await
}

#[tokio::test]
async fn test_short_prefix_makes_no_call() {
    let model = Arc::new(MockChatModel::new("openai").with_text("never"));
    let config = config_with(Some(model.clone()), Some("sk-server"));

    let (status, body) =
        post_completion(config, r#"{"prefix": "  ab  ", "language": "python"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.completion, "");
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_missing_key_makes_no_call() {
    let model = Arc::new(MockChatModel::new("openai").with_text("never"));
    let config = config_with(Some(model.clone()), None);

    let (status, body) =
        post_completion(config, r#"{"prefix": "def add(a, b):", "api_key": ""}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.completion, "");
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_no_model_returns_empty() {
    let config = config_with(None, Some("sk-server"));
    let (status, body) = post_completion(config, r#"{"prefix": "def add(a, b):"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.completion, "");
}

#[tokio::test]
async fn test_leading_newlines_stripped_only() {
    let model = Arc::new(MockChatModel::new("openai").with_text("\n\nX\n\nY"));
    let config = config_with(Some(model.clone()), None);

    let (_, body) = post_completion(
        config,
        r#"{"prefix": "def add(a, b):", "language": "python", "api_key": "sk-client"}"#,
    )
    .await;

    assert_eq!(body.completion, "X\n\nY");
    assert_eq!(model.credentials(), vec!["sk-client"]);
}

#[tokio::test]
async fn test_request_shape() {
    let model = Arc::new(MockChatModel::new("openai").with_text("return a + b"));
    let config = config_with(Some(model.clone()), Some("sk-server"));

    let body = serde_json::json!({
        "prefix": "fn add(a: i32, b: i32) -> i32 {",
        "language": "rust",
        "api_key": "sk-client",
    });
    post_completion(config, &body.to_string()).await;

    assert_eq!(model.credentials(), vec!["sk-server"]);
    let request = &model.requests()[0];
    assert_eq!(request.model, "gpt-3.5-turbo-1106");
    assert_eq!(request.max_tokens, Some(64));
    assert_eq!(request.temperature, Some(0.1));
    assert!(request.tools.is_empty());
    assert_eq!(request.messages[0].role, ChatRole::System);
    let system = request.messages[0].content.as_deref().unwrap();
    assert!(system.contains("expert rust coding assistant"));
    assert_eq!(request.messages[1].content.as_deref(), Some("fn add(a: i32, b: i32) -> i32 {"));
}

#[tokio::test]
async fn test_every_provider_error_degrades_to_empty() {
    let errors = vec![
        ModelError::Network("connection refused".to_string()),
        ModelError::Timeout("deadline".to_string()),
        ModelError::RateLimited("429".to_string()),
        ModelError::Authentication("bad key".to_string()),
        ModelError::PermissionDenied("403".to_string()),
        ModelError::InvalidRequest("400".to_string()),
        ModelError::Api { status: 500, message: "boom".to_string() },
        ModelError::Decode("garbage".to_string()),
    ];

    for error in errors {
        let model = Arc::new(MockChatModel::new("openai").with_error(error.clone()));
        let config = config_with(Some(model.clone()), Some("sk-server"));

        let (status, body) = post_completion(config, r#"{"prefix": "import os"}"#).await;

        assert_eq!(status, StatusCode::OK, "{error:?}");
        assert_eq!(body.completion, "", "{error:?}");
        assert_eq!(model.call_count(), 1, "relay must not retry {error:?}");
    }
}

#[tokio::test]
async fn test_empty_choices_yield_empty_completion() {
    let model = Arc::new(MockChatModel::new("openai").with_response(Default::default()));
    let config = config_with(Some(model), Some("sk-server"));

    let (_, body) = post_completion(config, r#"{"prefix": "import os"}"#).await;

    assert_eq!(body.completion, "");
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let model = Arc::new(MockChatModel::new("openai").with_text("    return a + b"));
    let config = config_with(Some(model.clone()), Some("sk-server"));

    let (status, body) = post_raw(config, None, r#"{"prefix": "def add(a, b):"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.completion, "    return a + b");
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_non_string_prefix_is_used_as_text() {
    let model = Arc::new(MockChatModel::new("openai").with_text("89"));
    let config = config_with(Some(model.clone()), Some("sk-server"));

    let (status, body) = post_completion(config, r#"{"prefix": 1234567}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.completion, "89");
    assert_eq!(model.requests()[0].messages[1].content.as_deref(), Some("1234567"));
}

#[tokio::test]
async fn test_null_language_falls_back_to_python() {
    let model = Arc::new(MockChatModel::new("openai").with_text("pass"));
    let config = config_with(Some(model.clone()), Some("sk-server"));

    let (status, _) =
        post_completion(config, r#"{"prefix": "def f():", "language": null}"#).await;

    assert_eq!(status, StatusCode::OK);
    let request = &model.requests()[0];
    let system = request.messages[0].content.as_deref().unwrap();
    assert!(system.contains("expert python coding assistant"));
}

#[tokio::test]
async fn test_unreadable_bodies_yield_empty_completion() {
    let model = Arc::new(MockChatModel::new("openai").with_text("never"));
    let config = config_with(Some(model.clone()), Some("sk-server"));
    let (status, body) = post_completion(config, "prefix=def+f").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.completion, "");

    let config = config_with(Some(model.clone()), Some("sk-server"))
        .with_security(SecurityConfig { max_body_size: 16, ..SecurityConfig::default() });
    let oversized = format!(r#"{{"prefix": "{}"}}"#, "x".repeat(64));
    let (status, body) = post_completion(config, &oversized).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.completion, "");

    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_slow_provider_yields_empty_completion() {
    let model: Arc<dyn ChatModel> = Arc::new(SlowModel { delay: Duration::from_secs(5) });
    let config = ServerConfig::new(Some(model), Arc::new(LlmCrewExecutor::new()))
        .with_completion(
            CompletionSettings::default()
                .with_server_api_key(Some("sk-server".to_string()))
                .with_timeout(Duration::from_millis(100)),
        );

    let started = Instant::now();
    let (status, body) = post_completion(config, r#"{"prefix": "import os"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.completion, "");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_health_and_security_headers() {
    let response = create_app(config_with(None, None))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}
