use autocoder_core::{ChatModel, ChatRequest, ChatResponse, ModelError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted [`ChatModel`] for tests. Replies are consumed in order.
pub struct MockChatModel {
    name: String,
    replies: Mutex<VecDeque<Result<ChatResponse, ModelError>>>,
    calls: Mutex<Vec<(String, ChatRequest)>>,
}

impl MockChatModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, response: ChatResponse) -> Self {
        self.push(Ok(response));
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_response(ChatResponse::from_text(text))
    }

    pub fn with_error(self, error: ModelError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, reply: Result<ChatResponse, ModelError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    /// Number of `complete` calls seen so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    /// Requests received, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, req)| req.clone()).collect())
            .unwrap_or_default()
    }

    /// Credentials received, in order.
    pub fn credentials(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(cred, _)| cred.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        credential: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, ModelError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((credential.to_string(), request));
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| {
                Err(ModelError::Api { status: 500, message: "mock script exhausted".to_string() })
            })
    }
}
