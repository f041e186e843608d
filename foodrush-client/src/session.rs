//! Persisted session cache — the console's localStorage analogue
//!
//! A session is `{user, token}` in one JSON file. The contract is
//! validate-on-load: [`restore_session`] always confirms the token
//! against `/api/auth/users/me` before the session is trusted, and any
//! auth failure clears the file. Presence of the file alone never
//! authenticates anything.

use serde::{Deserialize, Serialize};
use shared::models::UserInfo;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Persisted session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: UserInfo,
    pub token: String,
}

/// JSON-file session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a session store at `base_path/filename`
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Persist a session
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
    }

    /// Load the persisted session, if any
    pub fn load(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Whether a session file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the persisted session
    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Get the storage path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Validate the persisted session against the server and return the
/// confirmed user.
///
/// - No stored session → `Ok(None)`, client stays logged out.
/// - Stored token rejected (401 or an auth error code) → the file is
///   cleared, the client token dropped, `Ok(None)`.
/// - Network or server failure → the error propagates and the stored
///   session is kept; nothing is trusted until a later check passes.
pub async fn restore_session(
    client: &mut ApiClient,
    store: &SessionStore,
) -> ClientResult<Option<UserInfo>> {
    let Some(session) = store.load() else {
        return Ok(None);
    };

    client.set_token(&session.token);
    match client.me().await {
        Ok(user) => {
            // Refresh the cached user descriptor alongside the token
            store.save(&Session {
                user: user.clone(),
                token: session.token,
            })?;
            Ok(Some(user))
        }
        Err(err) if err.invalidates_session() => {
            tracing::debug!("Stored session rejected: {err}");
            store.clear()?;
            client.clear_token();
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Log in and persist the resulting session
pub async fn login_and_persist(
    client: &mut ApiClient,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> ClientResult<UserInfo> {
    let token = client.login(username, password).await?;
    let user = client.me().await?;
    store.save(&Session {
        user: user.clone(),
        token: token.access_token,
    })?;
    Ok(user)
}

/// Drop the session everywhere: persisted file and client token
pub fn logout(client: &mut ApiClient, store: &SessionStore) -> std::io::Result<()> {
    client.clear_token();
    store.clear()
}
