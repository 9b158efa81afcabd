//! Error types for the Tata domain.
//!
//! One `thiserror` enum per bounded context.

use thiserror::Error;

use crate::task::{ArtifactKind, TaskKind};

/// Failures reported by the LLM endpoint capability.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// The numeric HTTP status behind this failure, if the provider reported one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => Some(*status_code),
            Self::RateLimited { .. } => Some(429),
            Self::AuthenticationFailed(_) => Some(401),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Session ID cannot be empty")]
    InvalidSession,
}

/// Recoverable failures of a single task invocation.
///
/// Every variant ends up as a task-result turn the model can read; none of
/// them abort the orchestration loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Session ID cannot be empty")]
    InvalidSession,

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// Display is the dependency graph's message, verbatim.
    #[error("{0}")]
    UnsatisfiedDependency(String),

    #[error("Invalid arguments for {task}: {reason}")]
    InvalidArguments { task: String, reason: String },

    #[error("Task '{task}' execution failed: {reason}")]
    ProcessorFailed { task: String, reason: String },
}

impl From<StoreError> for TaskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidSession => TaskError::InvalidSession,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorError {
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    #[error("{} not found in session", .0.human_name())]
    MissingArtifact(ArtifactKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Dependency cycle detected: {}", format_cycle(.0))]
    Cycle(Vec<TaskKind>),

    #[error(
        "{task} consumes {} but does not require the task that produces it",
        .artifact.human_name()
    )]
    UndeclaredInput { task: TaskKind, artifact: ArtifactKind },
}

fn format_cycle(path: &[TaskKind]) -> String {
    path.iter()
        .map(|t| t.human_name())
        .collect::<Vec<_>>()
        .join(" -> ")
}
