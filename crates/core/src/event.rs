//! Domain events published by the orchestration loop.
//!
//! Subscribers (logging sinks, the CLI, tests) react to conversation activity
//! without the agent knowing who is listening.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// A user turn was accepted for a session
    TurnStarted {
        session_id: String,
        content_preview: String,
        timestamp: DateTime<Utc>,
    },

    /// A task invocation finished
    TaskExecuted {
        session_id: String,
        task_name: String,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// The assistant produced its final answer for a turn
    ResponseGenerated {
        session_id: String,
        model: String,
        tokens_used: u32,
        timestamp: DateTime<Utc>,
    },

    /// The LLM endpoint could not be reached or returned an error
    EndpointFailed {
        session_id: String,
        status_code: Option<u16>,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    pub fn session_id(&self) -> &str {
        match self {
            DomainEvent::TurnStarted { session_id, .. }
            | DomainEvent::TaskExecuted { session_id, .. }
            | DomainEvent::ResponseGenerated { session_id, .. }
            | DomainEvent::EndpointFailed { session_id, .. } => session_id,
        }
    }
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::TaskExecuted {
            session_id: "s1".into(),
            task_name: "create_job_ad".into(),
            success: true,
            duration_ms: 42,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(event.session_id(), "s1");
        match event.as_ref() {
            DomainEvent::TaskExecuted { task_name, success, .. } => {
                assert_eq!(task_name, "create_job_ad");
                assert!(success);
            }
            _ => panic!("Expected TaskExecuted event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        bus.publish(DomainEvent::EndpointFailed {
            session_id: "s1".into(),
            status_code: Some(503),
            error_message: "unavailable".into(),
            timestamp: Utc::now(),
        });
    }
}
