//! Per-session scenario collections.
//!
//! Each logical session (one student, one tab) owns exactly one
//! [`ScenarioStore`]; the engine assumes single-writer access within a
//! session, so isolation between sessions is the only concurrency concern
//! handled here.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::domain::Scenario;
use super::store::{ScenarioStore, StoreError};

/// Session lookup and mutation errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction so the HTTP layer can be exercised against fixtures.
pub trait SessionStore: Send + Sync {
    /// Create a session around a freshly initialized scenario collection and
    /// return its id.
    fn create(&self, seed: Vec<Scenario>) -> Result<String, SessionError>;

    /// A point-in-time copy of the session's collection.
    fn snapshot(&self, id: &str) -> Result<ScenarioStore, SessionError>;

    /// Mutate the session's collection under its lock and return the
    /// post-mutation copy.
    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut ScenarioStore),
    ) -> Result<ScenarioStore, SessionError>;
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> String {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("ses-{id:06}")
}

/// Mutex-guarded in-memory sessions, the only backend the service ships.
#[derive(Debug, Default)]
pub struct InMemorySessions {
    sessions: Mutex<BTreeMap<String, ScenarioStore>>,
}

impl InMemorySessions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessions {
    fn create(&self, seed: Vec<Scenario>) -> Result<String, SessionError> {
        let store = ScenarioStore::initialize(seed)?;
        let id = next_session_id();
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|err| SessionError::Unavailable(err.to_string()))?;
        sessions.insert(id.clone(), store);
        Ok(id)
    }

    fn snapshot(&self, id: &str) -> Result<ScenarioStore, SessionError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|err| SessionError::Unavailable(err.to_string()))?;
        sessions.get(id).cloned().ok_or(SessionError::NotFound)
    }

    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut ScenarioStore),
    ) -> Result<ScenarioStore, SessionError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|err| SessionError::Unavailable(err.to_string()))?;
        let store = sessions.get_mut(id).ok_or(SessionError::NotFound)?;
        apply(store);
        Ok(store.clone())
    }
}
