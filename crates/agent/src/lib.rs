//! The orchestration layer of Tata.
//!
//! One user turn runs as a small state machine:
//!
//! 1. **Append** the user message to the session's history
//! 2. **Call the model** with the history and the tool catalog
//! 3. **If task invocations**: execute each in order, append the results, go to 2
//! 4. **If text**: append it and return it to the caller
//!
//! Task failures are fed back to the model as error results. Endpoint
//! failures end the turn with a fixed, user-safe message.

pub mod context;
pub mod executor;
pub mod loop_runner;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use context::{ConversationHistory, DEFAULT_MAX_TURNS, DEFAULT_SYSTEM_PROMPT};
pub use executor::{ERROR_PREFIX, ExecutionResult, TaskExecutor};
pub use loop_runner::{AgentLoop, ENDPOINT_FAILURE_MESSAGE, FALLBACK_MESSAGE};
pub use session::{SessionContext, SessionInfo, SessionManager};
