//! Shared DTOs for the browser/server auth API.
//!
//! DESIGN
//! ======
//! These types mirror the server's auth route payloads so serde round-trips
//! stay lossless. Unknown fields are ignored to keep older bundles working
//! against newer servers.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identity-provider subject.
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    /// `"password"` or `"federated:<Provider>"`.
    pub sign_in_method: String,
}

impl User {
    /// Best human-readable label: email when known, username otherwise.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.username)
    }

    /// `true` when the session came from an external provider redirect.
    pub fn is_federated(&self) -> bool {
        self.sign_in_method.starts_with("federated:")
    }
}

/// Email + password payload for signup and login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response from `/api/auth/signup`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignUpResult {
    pub user_confirmed: bool,
    pub signed_in: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Provider tokens for the current session from `/api/auth/session-token`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthSession {
    pub id_token: String,
    pub access_token: String,
    /// Access-token expiry, unix seconds.
    pub expires_at: u64,
}

/// Error body returned by the auth API on failure.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// External providers offered on the login and register screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
}

impl FederatedProvider {
    /// Path segment understood by `/auth/federated/{provider}`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}
