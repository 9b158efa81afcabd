//! # Tata Core
//!
//! Domain types, traits, and error definitions for the Tata recruitment
//! assistant. This crate has **no framework dependencies**; it defines the
//! domain model that all other crates implement against.
//!
//! ## Layout
//!
//! - [`task`]: the fixed catalog of task and artifact kinds
//! - [`input`] / [`document`]: typed arguments going in, typed documents coming out
//! - [`artifact`]: the per-session artifact store trait
//! - [`processor`]: the document processor trait
//! - [`message`] / [`provider`]: conversation turns and the LLM endpoint trait

pub mod artifact;
pub mod document;
pub mod error;
pub mod event;
pub mod input;
pub mod message;
pub mod processor;
pub mod provider;
pub mod session;
pub mod task;

// Re-export key types at crate root for ergonomics
pub use artifact::{Artifact, ArtifactStore};
pub use document::TaskOutput;
pub use error::{GraphError, ProcessorError, ProviderError, StoreError, TaskError};
pub use event::{DomainEvent, EventBus};
pub use input::{SupportedLanguage, TaskArgs, TaskInput};
pub use message::{Role, TaskInvocation, Turn};
pub use processor::Processor;
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use session::SessionId;
pub use task::{ArtifactKind, TaskKind};
