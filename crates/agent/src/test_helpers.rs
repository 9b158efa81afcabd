//! Shared test helpers: scripted and failing providers.

use std::sync::Mutex;
use tata_core::error::ProviderError;
use tata_core::message::TaskInvocation;
use tata_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};

/// A provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next response in the queue. Once the
/// script runs dry every call fails with a 503, like an endpoint going away.
pub struct ScriptedProvider {
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(mut responses: Vec<ProviderResponse>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 503,
                message: "script exhausted".into(),
            })
    }
}

/// A provider that fails every call.
pub struct FailingProvider {
    error: ProviderError,
}

impl FailingProvider {
    pub fn unavailable() -> Self {
        Self {
            error: ProviderError::ApiError {
                status_code: 503,
                message: "Service unavailable".into(),
            },
        }
    }
}

#[async_trait::async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(self.error.clone())
    }
}

/// A text response with token usage.
pub fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
        ..ProviderResponse::text(text)
    }
}

pub fn invocation(id: &str, name: &str, args: serde_json::Value) -> TaskInvocation {
    TaskInvocation::new(id, name, args.to_string())
}
