//! Artifacts and the store that remembers them.
//!
//! A session keeps at most one artifact per [`ArtifactKind`]; storing a
//! second artifact of the same kind replaces the first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::document::TaskOutput;
use crate::error::StoreError;
use crate::session::SessionId;
use crate::task::ArtifactKind;

/// The stored output of a completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub output: TaskOutput,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    pub fn new(output: TaskOutput) -> Self {
        Self {
            output,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.output.kind()
    }

    /// The JSON payload handed back to the model.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.output)
    }
}

/// Session-scoped key-value memory from artifact kind to the latest artifact.
///
/// Implementations must be safe to share between concurrently running
/// sessions. Absence is a normal state: `retrieve` and `all` never fail.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Insert or replace the artifact of this artifact's kind.
    async fn store(&self, session: &SessionId, artifact: Artifact) -> Result<(), StoreError>;

    /// Fetch the artifact of `kind`, if any.
    async fn retrieve(&self, session: &SessionId, kind: ArtifactKind) -> Option<Artifact>;

    async fn has(&self, session: &SessionId, kind: ArtifactKind) -> Result<bool, StoreError>;

    /// Snapshot of everything stored for the session.
    async fn all(&self, session: &SessionId) -> HashMap<ArtifactKind, Artifact>;

    /// Drop every artifact of one session; other sessions are untouched.
    async fn clear(&self, session: &SessionId) -> Result<(), StoreError>;
}
