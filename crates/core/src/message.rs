//! Conversation turns and task invocations.
//!
//! These are the value objects that flow between the orchestration loop and
//! the LLM endpoint: the user speaks, the assistant answers or proposes task
//! invocations, and each invocation is answered by a task-result turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// The end user
    User,
    /// The model, either answering or proposing task invocations
    Assistant,
    /// The outcome of one task invocation
    #[serde(rename = "tool")]
    TaskResult,
}

/// A model-proposed request to run a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInvocation {
    /// Unique call ID (matches the LLM's tool_call.id)
    pub id: String,

    /// Name of the task to run
    pub name: String,

    /// Arguments as a JSON-encoded object
    pub arguments: String,
}

impl TaskInvocation {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Decode the argument payload. Blank payloads decode as an empty object.
    pub fn parse_arguments(&self) -> Result<serde_json::Value, ArgumentsError> {
        if self.arguments.trim().is_empty() {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        let value: serde_json::Value = serde_json::from_str(&self.arguments)
            .map_err(|e| ArgumentsError(format!("Invalid arguments JSON: {e}")))?;
        if !value.is_object() {
            return Err(ArgumentsError("Arguments must be a JSON object".into()));
        }
        Ok(value)
    }
}

/// Why an invocation's arguments could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ArgumentsError(pub String);

/// A single entry in a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique turn ID
    pub id: String,

    /// Who produced this turn
    pub role: Role,

    /// Free text; absent on assistant turns that only propose invocations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Invocations proposed by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invocations: Vec<TaskInvocation>,

    /// If this is a task result, which invocation it answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,

    /// If this is a task result, the task that ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl Turn {
    fn with_role(role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: None,
            invocations: Vec::new(),
            invocation_id: None,
            task_name: None,
            timestamp: Utc::now(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::with_role(Role::System)
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::with_role(Role::User)
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::with_role(Role::Assistant)
        }
    }

    /// An assistant turn recording every invocation of one round.
    pub fn invocations(invocations: Vec<TaskInvocation>) -> Self {
        Self {
            invocations,
            ..Self::with_role(Role::Assistant)
        }
    }

    pub fn task_result(
        invocation_id: impl Into<String>,
        task_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            content: Some(content.into()),
            invocation_id: Some(invocation_id.into()),
            task_name: Some(task_name.into()),
            ..Self::with_role(Role::TaskResult)
        }
    }

    /// The text of this turn, or `""` when it carries none.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}
