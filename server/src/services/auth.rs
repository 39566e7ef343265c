//! Account flows: sign-up, password sign-in, federated completion, sign-out.
//!
//! Each flow is one or two delegated identity calls followed by session
//! bookkeeping. Handlers in `routes::auth` stay focused on cookies and status
//! codes.

use crate::identity::types::{IdentityError, Principal};
use crate::state::AppState;

/// A freshly created session.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub token: String,
    pub principal: Principal,
}

/// Result of registering an account.
#[derive(Debug, Clone)]
pub struct Registered {
    pub user_confirmed: bool,
    /// Present when the account was confirmed and signed in immediately.
    pub signed_in: Option<SignedIn>,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

fn invalid_email() -> IdentityError {
    IdentityError::Rejected { status: 400, kind: "InvalidParameterException".into(), message: "invalid email".into() }
}

/// Authenticate with email + password and open a session.
pub async fn sign_in(state: &AppState, email: &str, password: &str) -> Result<SignedIn, IdentityError> {
    let email = normalize_email(email).ok_or_else(invalid_email)?;
    let tokens = state.identity.sign_in(&email, password).await?;
    let principal = state.identity.get_user(&tokens.access_token).await?;
    let token = state.sessions.create(principal.clone(), tokens).await;
    tracing::info!(user_id = %principal.user_id, "password sign-in");
    Ok(SignedIn { token, principal })
}

/// Register an account. Confirmed accounts are signed in right away.
///
/// Once the provider has created the account, a failed follow-up sign-in
/// still reports success without a session.
pub async fn sign_up(state: &AppState, email: &str, password: &str) -> Result<Registered, IdentityError> {
    let email = normalize_email(email).ok_or_else(invalid_email)?;
    let outcome = state.identity.sign_up(&email, password).await?;
    tracing::info!(user_sub = %outcome.user_sub, confirmed = outcome.user_confirmed, "account registered");

    if !outcome.user_confirmed {
        return Ok(Registered { user_confirmed: false, signed_in: None });
    }
    match sign_in(state, &email, password).await {
        Ok(signed_in) => Ok(Registered { user_confirmed: true, signed_in: Some(signed_in) }),
        Err(e) => {
            tracing::warn!(error = %e, user_sub = %outcome.user_sub, "account created but sign-in failed");
            Ok(Registered { user_confirmed: true, signed_in: None })
        }
    }
}

/// Exchange a federated callback code and open a session.
pub async fn complete_federated(state: &AppState, code: &str) -> Result<SignedIn, IdentityError> {
    let tokens = state.identity.exchange_code(code).await?;
    let principal = state.identity.get_user(&tokens.access_token).await?;
    let token = state.sessions.create(principal.clone(), tokens).await;
    tracing::info!(user_id = %principal.user_id, method = %principal.sign_in_method, "federated sign-in");
    Ok(SignedIn { token, principal })
}

/// Drop the session and revoke provider tokens.
///
/// The local session is always removed; a provider failure is returned so
/// the caller can log it.
pub async fn sign_out(state: &AppState, token: &str) -> Result<(), IdentityError> {
    let Some(session) = state.sessions.delete(token).await else {
        return Ok(());
    };
    state
        .identity
        .sign_out(&session.tokens.access_token)
        .await
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
