use crate::ServerConfig;
use crate::completion::{CompletionRelay, CompletionRequest, CompletionResponse};
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct CompletionController {
    relay: Arc<CompletionRelay>,
}

impl CompletionController {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            relay: Arc::new(CompletionRelay::new(
                config.completion_model.clone(),
                config.completion.clone(),
            )),
        }
    }
}

/// `POST /inline_completion`. Always answers 200.
///
/// The body is read as raw bytes so a missing content type, an oversized body or
/// ill-typed fields still get an (empty) completion instead of a rejection.
pub async fn inline_completion(
    State(controller): State<CompletionController>,
    body: Result<Bytes, BytesRejection>,
) -> Json<CompletionResponse> {
    let request = match body {
        Ok(body) => CompletionRequest::from_body(&body),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable completion request body");
            return Json(CompletionResponse::empty());
        }
    };
    Json(controller.relay.complete(request).await)
}
