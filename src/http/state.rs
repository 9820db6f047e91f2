use crate::lyrics::Aligner;
use crate::session::{KaraokeSession, SessionConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active playback sessions (session_id → session)
    pub sessions: Arc<RwLock<HashMap<String, Arc<Mutex<KaraokeSession>>>>>,

    /// Aligner used for every uploaded payload
    pub aligner: Aligner,

    /// Template for new sessions (the id is regenerated per session)
    pub session_defaults: SessionConfig,
}

impl AppState {
    pub fn new(aligner: Aligner, session_defaults: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            aligner,
            session_defaults,
        }
    }

    pub async fn session(&self, session_id: &str) -> Option<Arc<Mutex<KaraokeSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Aligner::default(), SessionConfig::default())
    }
}
