//! REST helpers for the auth API served alongside the app.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Callers decide whether to
//! surface a fixed message or ignore the failure; nothing here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AuthSession, FederatedProvider, SignUpResult, User};
#[cfg(feature = "hydrate")]
use super::types::Credentials;
#[cfg(any(test, feature = "hydrate"))]
use super::types::ErrorBody;

/// Failures talking to the auth API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("request failed ({status}): {code}")]
    Http { status: u16, code: String },
    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),
    /// Browser navigation could not be started.
    #[error("navigation failed")]
    Navigation,
    /// Called outside the browser.
    #[error("not available on server")]
    Unavailable,
}

#[cfg(any(test, feature = "hydrate"))]
fn error_code_from_body(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(|_| "E_UNKNOWN".to_owned(), |b| b.error)
}

#[cfg(any(test, feature = "hydrate"))]
fn federated_path(provider: FederatedProvider) -> String {
    format!("/auth/federated/{}", provider.slug())
}

#[cfg(feature = "hydrate")]
async fn http_error(resp: gloo_net::http::Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    ApiError::Http { status, code: error_code_from_body(&body) }
}

#[cfg(feature = "hydrate")]
async fn post_credentials(url: &str, email: &str, password: &str) -> Result<gloo_net::http::Response, ApiError> {
    let payload = Credentials { email: email.to_owned(), password: password.to_owned() };
    let resp = gloo_net::http::Request::post(url)
        .json(&payload)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(http_error(resp).await);
    }
    Ok(resp)
}

/// Fetch the currently authenticated user from `/api/auth/me`.
///
/// # Errors
///
/// `Ok(None)` means "not signed in"; errors are transport or server faults.
pub async fn fetch_current_user() -> Result<Option<User>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if resp.status() == 401 {
            return Ok(None);
        }
        if !resp.ok() {
            return Err(http_error(resp).await);
        }
        let user = resp
            .json::<User>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(Some(user))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Register an account via `POST /api/auth/signup`.
///
/// # Errors
///
/// Returns an error if the request fails or the provider rejects the account.
pub async fn sign_up(email: &str, password: &str) -> Result<SignUpResult, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = post_credentials("/api/auth/signup", email, password).await?;
        resp.json::<SignUpResult>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(ApiError::Unavailable)
    }
}

/// Sign in with email + password via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns an error if the request fails or the credentials are rejected.
pub async fn sign_in(email: &str, password: &str) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = post_credentials("/api/auth/login", email, password).await?;
        resp.json::<User>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(ApiError::Unavailable)
    }
}

/// Sign out via `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns an error if the request fails. A 401 counts as success since the
/// session is already gone.
pub async fn sign_out() -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if resp.ok() || resp.status() == 401 {
            return Ok(());
        }
        Err(http_error(resp).await)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Fetch provider tokens for the current session from `/api/auth/session-token`.
///
/// # Errors
///
/// Returns an error if not signed in or the request fails.
pub async fn fetch_session() -> Result<AuthSession, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/session-token")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(http_error(resp).await);
        }
        resp.json::<AuthSession>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Leave the app for the provider's hosted sign-in page.
///
/// The browser comes back through `/auth/federated/callback`, which lands on
/// `/dashboard` once the session cookie is set.
///
/// # Errors
///
/// Returns an error if the browser refuses the navigation.
pub fn begin_federated(provider: FederatedProvider) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or(ApiError::Navigation)?;
        window
            .location()
            .set_href(&federated_path(provider))
            .map_err(|_| ApiError::Navigation)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = provider;
        Err(ApiError::Unavailable)
    }
}
