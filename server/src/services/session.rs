//! Server-side sessions binding a browser cookie to provider tokens.
//!
//! ARCHITECTURE
//! ============
//! The identity provider owns the session lifecycle; this store only keeps
//! its tokens out of the browser. The cookie carries an opaque random token,
//! and the map resolves it to the provider tokens plus the principal.
//!
//! TRADE-OFFS
//! ==========
//! Sessions are process-local and vanish on restart. Users sign in again,
//! which the provider makes cheap.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use tokio::sync::RwLock;

use crate::identity::types::{AuthTokens, Principal};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// A live session.
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub tokens: AuthTokens,
    pub expires_at: SystemTime,
}

impl Session {
    #[must_use]
    pub fn new(principal: Principal, tokens: AuthTokens, now: SystemTime) -> Self {
        let expires_at = now + Duration::from_secs(tokens.expires_in);
        Self { principal, tokens, expires_at }
    }

    #[must_use]
    pub fn is_expired(&self, now: SystemTime) -> bool {
        now >= self.expires_at
    }

    /// Expiry as unix seconds.
    #[must_use]
    pub fn expires_at_unix(&self) -> u64 {
        self.expires_at
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

/// Shared session map. Clone is cheap; all clones see the same sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session and return its cookie token.
    pub async fn create(&self, principal: Principal, tokens: AuthTokens) -> String {
        let token = generate_token();
        let session = Session::new(principal, tokens, SystemTime::now());
        self.inner.write().await.insert(token.clone(), session);
        token
    }

    /// Resolve a token to its session. Expired sessions are dropped.
    pub async fn validate(&self, token: &str) -> Option<Session> {
        self.validate_at(token, SystemTime::now()).await
    }

    pub(crate) async fn validate_at(&self, token: &str, now: SystemTime) -> Option<Session> {
        {
            let sessions = self.inner.read().await;
            match sessions.get(token) {
                None => return None,
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
            }
        }
        self.inner.write().await.remove(token);
        None
    }

    /// Remove a session, returning it if it existed.
    pub async fn delete(&self, token: &str) -> Option<Session> {
        self.inner.write().await.remove(token)
    }

    /// Drop every expired session. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = SystemTime::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

/// Periodically purge expired sessions until the runtime shuts down.
pub fn spawn_purge_task(store: SessionStore, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = store.purge_expired().await;
            if removed > 0 {
                let remaining = store.len().await;
                tracing::debug!(removed, remaining, "purged expired sessions");
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
