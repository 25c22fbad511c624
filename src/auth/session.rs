//! Session state for the two-token auth scheme.
//!
//! The backend issues a long-lived refresh token and a short-lived access
//! token. `SessionManager` owns that pair: it loads a persisted session at
//! construction, replaces the access token on refresh, and wipes everything
//! on logout. The request engine in `api::client` is the only writer besides
//! login/logout.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// On-disk session shape. The `access_token` / `refresh_token` field names
/// are a storage contract shared with earlier builds; `saved_at` is
/// informational and absent files from older versions still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct TokenPair {
    access: Option<String>,
    refresh: Option<String>,
}

/// Holds the token pair and its persistence, behind a narrow interface.
///
/// Token reads go through a `std` RwLock that is never held across an await.
/// `lock_refresh` hands out the async gate that serializes refresh attempts
/// so concurrent 401s collapse into a single refresh call.
pub struct SessionManager {
    storage_dir: Option<PathBuf>,
    tokens: RwLock<TokenPair>,
    refresh_gate: Mutex<()>,
}

impl SessionManager {
    /// Session backed by `storage_dir/session.json`, loading any persisted
    /// tokens. An unreadable or corrupt file logs a warning and starts the
    /// session logged out rather than failing construction.
    pub fn persistent(storage_dir: impl Into<PathBuf>) -> Self {
        let storage_dir = storage_dir.into();
        let path = storage_dir.join(SESSION_FILE);
        let mut tokens = TokenPair::default();

        if path.exists() {
            match Self::load_session_file(&path) {
                Ok(data) => {
                    debug!(path = %path.display(), "Loaded persisted session");
                    tokens.access = data.access_token;
                    tokens.refresh = data.refresh_token;
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Failed to load session, starting logged out");
                }
            }
        }

        Self {
            storage_dir: Some(storage_dir),
            tokens: RwLock::new(tokens),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Session that never touches disk. Starts logged out.
    pub fn in_memory() -> Self {
        Self {
            storage_dir: None,
            tokens: RwLock::new(TokenPair::default()),
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read_tokens().access.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read_tokens().refresh.clone()
    }

    /// True iff an access token is held. A liveness hint only: the token may
    /// already be expired server-side.
    pub fn is_authenticated(&self) -> bool {
        self.read_tokens().access.is_some()
    }

    /// Replace both tokens (login) and persist.
    pub fn set_pair(&self, access: String, refresh: String) {
        {
            let mut tokens = self.write_tokens();
            tokens.access = Some(access);
            tokens.refresh = Some(refresh);
        }
        self.persist();
    }

    /// Replace only the access token (refresh) and persist. The refresh
    /// token is left as it was.
    pub fn set_access(&self, access: String) {
        {
            let mut tokens = self.write_tokens();
            tokens.access = Some(access);
        }
        self.persist();
    }

    /// Drop both tokens and remove the session file. Idempotent.
    pub fn clear(&self) {
        {
            let mut tokens = self.write_tokens();
            tokens.access = None;
            tokens.refresh = None;
        }
        if let Some(path) = self.session_path() {
            match std::fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "Removed session file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Failed to remove session file");
                }
            }
        }
    }

    /// Acquire the refresh gate. Held only for the duration of one refresh
    /// attempt; callers re-check the access token after acquiring in case
    /// another task already refreshed while they waited.
    pub(crate) async fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_gate.lock().await
    }

    // Token writes are plain assignments, so a poisoned lock still holds a
    // usable pair; recover instead of propagating.
    fn read_tokens(&self) -> RwLockReadGuard<'_, TokenPair> {
        self.tokens.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_tokens(&self) -> RwLockWriteGuard<'_, TokenPair> {
        self.tokens.write().unwrap_or_else(|e| e.into_inner())
    }

    fn session_path(&self) -> Option<PathBuf> {
        self.storage_dir.as_ref().map(|dir| dir.join(SESSION_FILE))
    }

    /// Write the current pair to disk. Persistence failures are warnings:
    /// the in-memory session stays valid for this process either way.
    fn persist(&self) {
        let Some(path) = self.session_path() else {
            return;
        };
        let data = {
            let tokens = self.read_tokens();
            SessionData {
                access_token: tokens.access.clone(),
                refresh_token: tokens.refresh.clone(),
                saved_at: Utc::now(),
            }
        };
        if let Err(e) = Self::write_session_file(&path, &data) {
            warn!(error = %e, path = %path.display(), "Failed to persist session");
        }
    }

    fn load_session_file(path: &PathBuf) -> Result<SessionData> {
        let contents = std::fs::read_to_string(path).context("Failed to read session file")?;
        serde_json::from_str(&contents).context("Failed to parse session file")
    }

    fn write_session_file(path: &PathBuf, data: &SessionData) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create session directory")?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(path, contents).context("Failed to write session file")?;
        Ok(())
    }
}
