//! The orchestration loop implementation.

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tata_config::AppConfig;
use tata_core::error::ProviderError;
use tata_core::event::{DomainEvent, EventBus};
use tata_core::message::Turn;
use tata_core::provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition};
use tracing::{debug, error, info, warn};

use crate::context::ConversationHistory;
use crate::executor::TaskExecutor;
use crate::session::SessionContext;

/// Returned when the LLM endpoint fails. Never appended to the history.
pub const ENDPOINT_FAILURE_MESSAGE: &str =
    "I'm having trouble connecting to my language service right now. Please try again in a moment.";

/// Returned and appended when the endpoint answers with neither text nor tasks.
pub const FALLBACK_MESSAGE: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

/// Drives one user turn: call the model, run the tasks it asks for, repeat
/// until it answers in text.
pub struct AgentLoop {
    provider: Arc<dyn Provider>,

    model: String,

    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    executor: Arc<TaskExecutor>,

    event_bus: Arc<EventBus>,
}

impl AgentLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        executor: Arc<TaskExecutor>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            executor,
            event_bus,
        }
    }

    /// Build a loop using the model settings from `config`.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn Provider>,
        executor: Arc<TaskExecutor>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            max_tokens: config.max_tokens,
            ..Self::new(provider, &config.model, config.temperature, executor, event_bus)
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Process one user message and return the reply.
    ///
    /// Never fails: task errors are fed back to the model, and endpoint
    /// errors end the turn with [`ENDPOINT_FAILURE_MESSAGE`].
    ///
    /// The session's history lock is held for the whole turn, including the
    /// endpoint calls, so turns of one session run strictly one after
    /// another. A second message for a busy session waits for the first
    /// reply. Other sessions are not affected.
    pub async fn chat(&self, session: &SessionContext, text: &str) -> String {
        let mut history = session.history().lock().await;
        history.append(Turn::user(text));
        session.touch().await;

        self.event_bus.publish(DomainEvent::TurnStarted {
            session_id: session.id().to_string(),
            content_preview: text.chars().take(80).collect(),
            timestamp: Utc::now(),
        });
        info!(session = %session.id(), turns = history.message_count(), "Processing user turn");

        let tools = self.executor.registry().schema();
        let mut round: u32 = 0;

        loop {
            round += 1;
            debug!(session = %session.id(), round, "Calling model");

            let response = match self.call_model(session, &history, &tools).await {
                Ok(response) => response,
                Err(_) => return ENDPOINT_FAILURE_MESSAGE.to_string(),
            };

            if !response.invocations.is_empty() {
                self.run_round(session, &mut history, response).await;
                continue;
            }

            let reply = response
                .non_empty_content()
                .map(str::to_string)
                .unwrap_or_else(|| {
                    warn!(session = %session.id(), round, "Model returned neither text nor tasks");
                    FALLBACK_MESSAGE.to_string()
                });
            history.append(Turn::assistant(&reply));
            return reply;
        }
    }

    /// Clear the conversation back to the built-in system prompt. Artifacts
    /// are kept.
    pub async fn reset(&self, session: &SessionContext) {
        session.history().lock().await.clear();
        info!(session = %session.id(), "Conversation reset");
    }

    async fn call_model(
        &self,
        session: &SessionContext,
        history: &ConversationHistory,
        tools: &[ToolDefinition],
    ) -> Result<ProviderResponse, ProviderError> {
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: history.messages(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: tools.to_vec(),
        };

        match self.provider.complete(request).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    self.event_bus.publish(DomainEvent::ResponseGenerated {
                        session_id: session.id().to_string(),
                        model: response.model.clone(),
                        tokens_used: usage.total_tokens,
                        timestamp: Utc::now(),
                    });
                }
                Ok(response)
            }
            Err(e) => {
                error!(
                    session = %session.id(),
                    provider = self.provider.name(),
                    status = ?e.status_code(),
                    error = %e,
                    "LLM endpoint failed"
                );
                self.event_bus.publish(DomainEvent::EndpointFailed {
                    session_id: session.id().to_string(),
                    status_code: e.status_code(),
                    error_message: e.to_string(),
                    timestamp: Utc::now(),
                });
                Err(e)
            }
        }
    }

    /// Record the proposed invocations, then execute them in order.
    async fn run_round(
        &self,
        session: &SessionContext,
        history: &mut ConversationHistory,
        response: ProviderResponse,
    ) {
        let invocations = response.invocations;
        debug!(session = %session.id(), count = invocations.len(), "Executing task round");

        history.append(Turn {
            content: response.content.filter(|c| !c.trim().is_empty()),
            ..Turn::invocations(invocations.clone())
        });

        for invocation in &invocations {
            let start = Instant::now();
            let result = self.executor.execute(session, invocation).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            if let Some(err) = &result.error {
                warn!(
                    session = %session.id(),
                    task = %invocation.name,
                    error = %err,
                    "Task failed"
                );
            } else {
                debug!(
                    session = %session.id(),
                    task = %invocation.name,
                    duration_ms,
                    "Task completed"
                );
            }

            self.event_bus.publish(DomainEvent::TaskExecuted {
                session_id: session.id().to_string(),
                task_name: invocation.name.clone(),
                success: result.success,
                duration_ms,
                timestamp: Utc::now(),
            });

            history.append(Turn::task_result(
                &invocation.id,
                &invocation.name,
                result.turn_content(),
            ));
        }
    }
}
