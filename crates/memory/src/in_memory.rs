//! In-memory backend. Artifacts live as long as the process does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tata_core::artifact::{Artifact, ArtifactStore};
use tata_core::error::StoreError;
use tata_core::session::SessionId;
use tata_core::task::ArtifactKind;
use tokio::sync::RwLock;
use tracing::debug;

type Bucket = HashMap<ArtifactKind, Artifact>;

/// Stores one bucket per session, each holding the latest artifact per kind.
///
/// A single `RwLock` guards the whole map. Critical sections are short map
/// operations, so sessions running concurrently never wait on I/O here.
pub struct InMemoryArtifactStore {
    buckets: Arc<RwLock<HashMap<SessionId, Bucket>>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self {
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of sessions that currently hold at least one artifact.
    pub async fn session_count(&self) -> usize {
        self.buckets.read().await.values().filter(|b| !b.is_empty()).count()
    }
}

impl Default for InMemoryArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_session(session: &SessionId) -> Result<(), StoreError> {
    if session.is_empty() {
        return Err(StoreError::InvalidSession);
    }
    Ok(())
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn store(&self, session: &SessionId, artifact: Artifact) -> Result<(), StoreError> {
        ensure_session(session)?;
        let kind = artifact.kind();
        let replaced = self
            .buckets
            .write()
            .await
            .entry(session.clone())
            .or_default()
            .insert(kind, artifact)
            .is_some();
        debug!(session = %session, kind = %kind, replaced, "Stored artifact");
        Ok(())
    }

    async fn retrieve(&self, session: &SessionId, kind: ArtifactKind) -> Option<Artifact> {
        self.buckets
            .read()
            .await
            .get(session)
            .and_then(|bucket| bucket.get(&kind))
            .cloned()
    }

    async fn has(&self, session: &SessionId, kind: ArtifactKind) -> Result<bool, StoreError> {
        ensure_session(session)?;
        Ok(self
            .buckets
            .read()
            .await
            .get(session)
            .is_some_and(|bucket| bucket.contains_key(&kind)))
    }

    async fn all(&self, session: &SessionId) -> HashMap<ArtifactKind, Artifact> {
        self.buckets
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default()
    }

    async fn clear(&self, session: &SessionId) -> Result<(), StoreError> {
        ensure_session(session)?;
        if let Some(bucket) = self.buckets.write().await.remove(session) {
            debug!(session = %session, count = bucket.len(), "Cleared artifacts");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tata_core::document::{CalendarInvite, TaskOutput};

    fn invite(subject: &str) -> Artifact {
        Artifact::new(TaskOutput::CalendarInvite(CalendarInvite {
            subject: subject.into(),
            body: "See you there".into(),
        }))
    }

    #[tokio::test]
    async fn store_and_retrieve() {
        let store = InMemoryArtifactStore::new();
        let session = SessionId::from("s1");
        let artifact = invite("Interview");

        store.store(&session, artifact.clone()).await.unwrap();

        let fetched = store.retrieve(&session, ArtifactKind::CalendarInvite).await;
        assert_eq!(fetched, Some(artifact));
        assert!(store.has(&session, ArtifactKind::CalendarInvite).await.unwrap());
    }

    #[tokio::test]
    async fn second_store_overwrites_first() {
        let store = InMemoryArtifactStore::new();
        let session = SessionId::from("s1");

        store.store(&session, invite("First")).await.unwrap();
        store.store(&session, invite("Second")).await.unwrap();

        let fetched = store.retrieve(&session, ArtifactKind::CalendarInvite).await.unwrap();
        match fetched.output {
            TaskOutput::CalendarInvite(inv) => assert_eq!(inv.subject, "Second"),
            other => panic!("unexpected output: {other:?}"),
        }
        assert_eq!(store.all(&session).await.len(), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemoryArtifactStore::new();
        let a = SessionId::from("a");
        let b = SessionId::from("b");

        store.store(&a, invite("Only in A")).await.unwrap();

        assert!(!store.has(&b, ArtifactKind::CalendarInvite).await.unwrap());
        assert!(store.retrieve(&b, ArtifactKind::CalendarInvite).await.is_none());
        assert!(store.all(&b).await.is_empty());
    }

    #[tokio::test]
    async fn clear_only_affects_one_session() {
        let store = InMemoryArtifactStore::new();
        let a = SessionId::from("a");
        let b = SessionId::from("b");
        store.store(&a, invite("A")).await.unwrap();
        store.store(&b, invite("B")).await.unwrap();

        store.clear(&a).await.unwrap();

        assert!(store.all(&a).await.is_empty());
        assert!(store.has(&b, ArtifactKind::CalendarInvite).await.unwrap());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn empty_session_is_rejected_for_writes_and_predicates() {
        let store = InMemoryArtifactStore::new();
        let empty = SessionId::from("");

        assert_eq!(store.store(&empty, invite("x")).await, Err(StoreError::InvalidSession));
        assert_eq!(
            store.has(&empty, ArtifactKind::CalendarInvite).await,
            Err(StoreError::InvalidSession)
        );
        assert_eq!(store.clear(&empty).await, Err(StoreError::InvalidSession));
    }

    #[tokio::test]
    async fn unknown_session_reads_are_absent_not_errors() {
        let store = InMemoryArtifactStore::new();
        let unknown = SessionId::from("never-seen");
        assert!(store.retrieve(&unknown, ArtifactKind::JobAd).await.is_none());
        assert!(store.all(&unknown).await.is_empty());
        assert!(store.retrieve(&SessionId::from(""), ArtifactKind::JobAd).await.is_none());
    }

    #[tokio::test]
    async fn concurrent_sessions_do_not_interfere() {
        let store = Arc::new(InMemoryArtifactStore::new());
        let writes = (0..16).map(|i| {
            let store = Arc::clone(&store);
            async move {
                let session = SessionId::from(format!("s{i}").as_str());
                store.store(&session, invite(&format!("subject {i}"))).await.unwrap();
                session
            }
        });
        let sessions = futures::future::join_all(writes).await;

        for (i, session) in sessions.iter().enumerate() {
            let artifact = store.retrieve(session, ArtifactKind::CalendarInvite).await.unwrap();
            match artifact.output {
                TaskOutput::CalendarInvite(inv) => assert_eq!(inv.subject, format!("subject {i}")),
                other => panic!("unexpected output: {other:?}"),
            }
        }
        assert_eq!(store.session_count().await, 16);
    }
}
