//! Server-side sessions
//!
//! A [`Session`] is created when a user logs in and is found again through the
//! `JSESSIONID` cookie on later requests. Sessions live in a [`SessionStore`]
//! until they are removed; there is no expiry.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

type Attribute = Arc<dyn Any + Send + Sync>;

/// Session state keyed by an opaque identifier.
pub struct Session {
    id: String,
    attributes: HashMap<String, Attribute>,
}

impl Session {
    /// Creates a session with a freshly generated random id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_attribute<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.attributes.insert(name.into(), Arc::new(value));
    }

    /// Returns the attribute if it exists and has type `T`.
    pub fn attribute<T: Any + Send + Sync>(&self, name: &str) -> Option<&T> {
        self.attributes.get(name)?.downcast_ref::<T>()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Shared map of live sessions.
///
/// Cloning yields another handle onto the same map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a session under its id, replacing any session with the same id.
    pub async fn add(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.sessions
            .write()
            .await
            .insert(session.id().to_string(), Arc::clone(&session));

        tracing::debug!(session_id = session.id(), "Session stored");
        session
    }

    pub async fn find(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Removes a session; later lookups of `id` find nothing.
    pub async fn remove(&self, id: &str) -> Option<Arc<Session>> {
        let removed = self.sessions.write().await.remove(id);
        if removed.is_some() {
            tracing::debug!(session_id = id, "Session invalidated");
        }
        removed
    }

    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
