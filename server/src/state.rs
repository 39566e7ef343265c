//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the identity provider client and the server-side session map.

use std::sync::Arc;

use crate::identity::IdentityProvider;
use crate::services::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity, sessions: SessionStore::new() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[tokio::test]
    async fn new_state_has_no_sessions() {
        let state = test_app_state(Arc::new(MockIdentity::default()));
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_identity_and_sessions() {
        let mock = Arc::new(MockIdentity::with_account("a@b.co"));
        let state = test_app_state(mock.clone());
        let clone = state.clone();
        clone.identity.sign_out("x").await.unwrap();
        assert_eq!(mock.calls(), vec!["sign_out".to_owned()]);
    }
}
