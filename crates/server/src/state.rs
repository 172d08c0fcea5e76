use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use brevis_core::{Extractor, LazyModel, Session};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::ApiError;

/// Sessions idle for longer than this are dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);
/// Upper bound on live sessions; the least recently used one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

struct Entry {
    session: Session,
    touched: Instant,
}

impl Entry {
    fn new(session: Session) -> Self {
        Self { session, touched: Instant::now() }
    }
}

/// Shared application state.
///
/// The session lock is only taken to read or write a [`Session`]; fetches
/// and model calls run with it released. Every read or write refreshes the
/// session's idle timer.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<Mutex<HashMap<Uuid, Entry>>>,
    session_ttl: Duration,
    max_sessions: usize,
    pub extractor: Extractor,
    pub model: Arc<LazyModel>,
}

impl AppState {
    pub fn new(extractor: Extractor, model: LazyModel) -> Self {
        Self {
            sessions: Arc::default(),
            session_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
            extractor,
            model: Arc::new(model),
        }
    }

    pub fn with_session_limits(mut self, ttl: Duration, max_sessions: usize) -> Self {
        self.session_ttl = ttl;
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub async fn create_session(&self) -> (Uuid, Session) {
        let id = Uuid::new_v4();
        let session = Session::new();

        let mut sessions = self.sessions.lock().await;
        self.evict_expired(&mut sessions);

        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions.iter().min_by_key(|(_, entry)| entry.touched).map(|(id, _)| *id) else {
                break;
            };
            sessions.remove(&oldest);
            tracing::debug!(id = %oldest, "session evicted, store full");
        }

        sessions.insert(id, Entry::new(session.clone()));
        tracing::debug!(%id, "session created");
        (id, session)
    }

    /// A snapshot of the session.
    pub async fn session(&self, id: Uuid) -> Result<Session, ApiError> {
        self.update(id, |_| ()).await.map(|((), session)| session)
    }

    /// Applies `f` to the session under the lock and returns its result
    /// together with a snapshot taken afterwards.
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Result<(T, Session), ApiError> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&id).ok_or(ApiError::NotFound(id))?;
        entry.touched = Instant::now();
        let out = f(&mut entry.session);
        Ok((out, entry.session.clone()))
    }

    pub async fn remove_session(&self, id: Uuid) -> Result<(), ApiError> {
        match self.sessions.lock().await.remove(&id) {
            Some(_) => {
                tracing::debug!(%id, "session removed");
                Ok(())
            }
            None => Err(ApiError::NotFound(id)),
        }
    }

    /// Drops every session idle for longer than the TTL. Returns how many
    /// were removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        self.evict_expired(&mut sessions)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn evict_expired(&self, sessions: &mut HashMap<Uuid, Entry>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.touched.elapsed() <= self.session_ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, "expired sessions dropped");
        }
        removed
    }
}
