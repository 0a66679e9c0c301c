//! Server state management
//!
//! Every session owns an independent grid and input classifier; nothing
//! mutable is shared between sessions.

use crate::error::ApiError;
use hexgrid_core::{GridConfig, GridError, Grid, InputClassifier};
use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// One client's grid and input state
#[derive(Clone, Debug)]
pub struct Session {
    pub grid: Grid,
    pub input: InputClassifier,
}

impl Session {
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        let (grid, input) = config.build()?;
        Ok(Self {
            grid: grid.with_change_log(),
            input,
        })
    }
}

/// Default cap on open sessions
pub const MAX_SESSIONS: usize = 1024;

/// Server-wide shared state
///
/// Sessions live until deleted; once `max_sessions` are open, creation
/// fails until a client deletes one.
pub struct ServerState {
    pub config: GridConfig,
    pub max_sessions: usize,
    pub sessions: RwLock<FxHashMap<String, Session>>,
}

impl ServerState {
    /// Fails if `config` could not build a grid
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self {
            config,
            max_sessions: MAX_SESSIONS,
            sessions: RwLock::new(FxHashMap::default()),
        })
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Create a session under a fresh random id
    pub fn create_session(&self) -> Result<String, ApiError> {
        let session = Session::new(&self.config)?;
        let mut sessions = self.sessions.write().unwrap();
        if sessions.len() >= self.max_sessions {
            tracing::warn!("Session limit reached ({} open)", sessions.len());
            return Err(ApiError::TooManySessions(sessions.len()));
        }

        let mut id = new_session_id();
        while sessions.contains_key(&id) {
            id = new_session_id();
        }
        sessions.insert(id.clone(), session);
        Ok(id)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            config: GridConfig::default(),
            max_sessions: MAX_SESSIONS,
            sessions: RwLock::new(FxHashMap::default()),
        }
    }
}

fn new_session_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}
