//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once by `AuthProvider` and read by route guards, the navbar, and
//! the auth pages. Every sign-in path funnels through [`AuthContext`] so the
//! current user has a single writer.
//!
//! ERROR HANDLING
//! ==============
//! Context operations log the failure and hand it back unchanged. Pages own
//! the user-facing message.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::net::api::{self, ApiError};
use crate::net::types::{AuthSession, FederatedProvider, SignUpResult, User};

/// Authentication state tracking the current user and loading status.
///
/// Starts in the loading state until the initial session check settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Settled state for a finished session check.
    pub fn resolved(user: Option<User>) -> Self {
        Self { user, loading: false }
    }
}

/// Cancellation flag for the one-shot session check run on mount.
///
/// Cloned into the async task and flipped from `on_cleanup`, so a lookup
/// that completes after unmount leaves state alone.
#[derive(Clone, Debug, Default)]
pub struct SessionCheck {
    cancelled: Arc<AtomicBool>,
}

impl SessionCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Turn a lookup result into the next state, or `None` once cancelled.
    ///
    /// A failed lookup is treated as signed out.
    pub fn settle(&self, result: Result<Option<User>, ApiError>) -> Option<AuthState> {
        if self.is_cancelled() {
            return None;
        }
        Some(AuthState::resolved(result.unwrap_or_default()))
    }
}

/// Handle to the shared auth state plus the operations that mutate it.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
}

impl AuthContext {
    pub fn new(state: RwSignal<AuthState>) -> Self {
        Self { state }
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.get().user
    }

    pub fn is_loading(&self) -> bool {
        self.state.get().loading
    }

    /// Create an account. When the provider confirms it immediately the
    /// server also opens a session and the returned user becomes current.
    ///
    /// # Errors
    ///
    /// Propagates the API failure after logging it.
    pub async fn signup(self, email: String, password: String) -> Result<SignUpResult, ApiError> {
        let result = api::sign_up(&email, &password).await.inspect_err(|e| report("signup", e))?;
        if let Some(user) = result.user.clone() {
            self.state.set(AuthState::resolved(Some(user)));
        }
        Ok(result)
    }

    /// # Errors
    ///
    /// Propagates the API failure after logging it.
    pub async fn login(self, email: String, password: String) -> Result<User, ApiError> {
        let user = api::sign_in(&email, &password).await.inspect_err(|e| report("login", e))?;
        self.state.set(AuthState::resolved(Some(user.clone())));
        Ok(user)
    }

    /// Hand the browser to the provider's hosted sign-in. The session is
    /// established by the callback route, not here.
    ///
    /// # Errors
    ///
    /// Propagates the navigation failure after logging it.
    pub fn login_with_federated(self, provider: FederatedProvider) -> Result<(), ApiError> {
        api::begin_federated(provider).inspect_err(|e| report("federated login", e))
    }

    /// # Errors
    ///
    /// Propagates the API failure after logging it. The current user is kept
    /// when sign-out fails.
    pub async fn logout(self) -> Result<(), ApiError> {
        api::sign_out().await.inspect_err(|e| report("logout", e))?;
        self.state.set(AuthState::resolved(None));
        Ok(())
    }

    /// Look up the signed-in user without touching local state.
    ///
    /// # Errors
    ///
    /// Propagates the API failure after logging it.
    pub async fn fetch_current_user(self) -> Result<Option<User>, ApiError> {
        api::fetch_current_user().await.inspect_err(|e| report("current user lookup", e))
    }

    /// # Errors
    ///
    /// Propagates the API failure after logging it.
    pub async fn fetch_session(self) -> Result<AuthSession, ApiError> {
        api::fetch_session().await.inspect_err(|e| report("session lookup", e))
    }
}

/// Read the auth context provided by `AuthProvider`.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

fn report(op: &str, err: &ApiError) {
    #[cfg(feature = "hydrate")]
    log::error!("{op} failed: {err}");
    #[cfg(not(feature = "hydrate"))]
    let _ = (op, err);
}
