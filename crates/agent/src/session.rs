//! Session-scoped state.
//!
//! A [`SessionContext`] owns one conversation history and addresses one
//! bucket of the shared artifact store. It is passed explicitly through the
//! orchestration loop and the task executor; nothing session-specific lives
//! in global state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tata_config::ConversationConfig;
use tata_core::artifact::ArtifactStore;
use tata_core::error::StoreError;
use tata_core::input::SupportedLanguage;
use tata_core::session::SessionId;
use tata_core::task::TaskKind;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::context::{ConversationHistory, DEFAULT_MAX_TURNS};

/// Metadata describing one recruitment project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Used as the chat title once known
    pub position_name: String,
    pub language: SupportedLanguage,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// The task that last completed successfully
    pub current_task: Option<TaskKind>,
}

impl Default for SessionInfo {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            position_name: String::new(),
            language: SupportedLanguage::default(),
            created_at: now,
            last_activity: now,
            current_task: None,
        }
    }
}

pub struct SessionContext {
    id: SessionId,
    history: Mutex<ConversationHistory>,
    store: Arc<dyn ArtifactStore>,
    info: RwLock<SessionInfo>,
}

impl SessionContext {
    /// Create a context. Fails on an empty id.
    pub fn new(
        id: SessionId,
        store: Arc<dyn ArtifactStore>,
        history: ConversationHistory,
    ) -> Result<Self, StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidSession);
        }
        Ok(Self {
            id,
            history: Mutex::new(history),
            store,
            info: RwLock::new(SessionInfo::default()),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The conversation history. Holding the lock serializes turns.
    pub fn history(&self) -> &Mutex<ConversationHistory> {
        &self.history
    }

    pub fn store(&self) -> &dyn ArtifactStore {
        self.store.as_ref()
    }

    pub async fn info(&self) -> SessionInfo {
        self.info.read().await.clone()
    }

    pub async fn set_position_name(&self, name: impl Into<String>) {
        let mut info = self.info.write().await;
        info.position_name = name.into();
        info.last_activity = Utc::now();
    }

    pub async fn set_language(&self, language: SupportedLanguage) {
        let mut info = self.info.write().await;
        info.language = language;
        info.last_activity = Utc::now();
    }

    pub(crate) async fn record_task(&self, task: TaskKind) {
        let mut info = self.info.write().await;
        info.current_task = Some(task);
        info.last_activity = Utc::now();
    }

    pub(crate) async fn touch(&self) {
        self.info.write().await.last_activity = Utc::now();
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("id", &self.id)
            .field("store", &self.store.name())
            .finish_non_exhaustive()
    }
}

/// Creates, finds and removes sessions over one shared artifact store.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<SessionContext>>>,
    store: Arc<dyn ArtifactStore>,
    max_turns: usize,
    system_prompt: Option<String>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            store,
            max_turns: DEFAULT_MAX_TURNS,
            system_prompt: None,
        }
    }

    pub fn from_config(store: Arc<dyn ArtifactStore>, config: &ConversationConfig) -> Self {
        Self {
            max_turns: config.max_turns,
            system_prompt: config.system_prompt.clone(),
            ..Self::new(store)
        }
    }

    fn new_history(&self) -> ConversationHistory {
        match &self.system_prompt {
            Some(prompt) => ConversationHistory::with_system_prompt(prompt.clone(), self.max_turns),
            None => ConversationHistory::new(self.max_turns),
        }
    }

    /// Start a session under a fresh uuid.
    pub async fn create(&self) -> Arc<SessionContext> {
        let id = SessionId::new();
        let context = Arc::new(SessionContext {
            id: id.clone(),
            history: Mutex::new(self.new_history()),
            store: Arc::clone(&self.store),
            info: RwLock::new(SessionInfo::default()),
        });
        self.sessions.write().await.insert(id.clone(), Arc::clone(&context));
        info!(session = %id, "Session created");
        context
    }

    /// Return the session with `id`, creating it if unknown.
    pub async fn open(&self, id: &SessionId) -> Result<Arc<SessionContext>, StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidSession);
        }
        let mut sessions = self.sessions.write().await;
        if let Some(existing) = sessions.get(id) {
            return Ok(Arc::clone(existing));
        }
        let context = Arc::new(SessionContext::new(
            id.clone(),
            Arc::clone(&self.store),
            self.new_history(),
        )?);
        sessions.insert(id.clone(), Arc::clone(&context));
        debug!(session = %id, "Session opened");
        Ok(context)
    }

    pub async fn get(&self, id: &SessionId) -> Result<Option<Arc<SessionContext>>, StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidSession);
        }
        Ok(self.sessions.read().await.get(id).cloned())
    }

    /// Forget a session and clear its artifact bucket. Returns whether the
    /// session was known.
    pub async fn remove(&self, id: &SessionId) -> Result<bool, StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidSession);
        }
        let removed = self.sessions.write().await.remove(id).is_some();
        self.store.clear(id).await?;
        info!(session = %id, known = removed, "Session removed");
        Ok(removed)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
