//! Auth routes: password + federated sign-in, session cookie, current user.

use axum::extract::{FromRef, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::identity::types::{FederatedProvider, IdentityError, Principal, RejectionKind};
use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
pub(crate) const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";
const AFTER_LOGIN_PATH: &str = "/dashboard";
pub(crate) const FEDERATED_FAILURE_PATH: &str = "/login?error=federated";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("COGNITO_REDIRECT_URI")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

pub(crate) fn identity_error_to_status(err: &IdentityError) -> StatusCode {
    match err {
        IdentityError::Rejected { .. } => match err.rejection() {
            Some(RejectionKind::InvalidCredentials | RejectionKind::UserNotConfirmed) => StatusCode::UNAUTHORIZED,
            Some(RejectionKind::UserExists) => StatusCode::CONFLICT,
            Some(RejectionKind::InvalidParameter) => StatusCode::BAD_REQUEST,
            Some(RejectionKind::TooManyRequests) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::BAD_GATEWAY,
        },
        IdentityError::ChallengeRequired(_) => StatusCode::UNAUTHORIZED,
        IdentityError::UnsupportedProvider(_) => StatusCode::NOT_FOUND,
        IdentityError::FederationNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        IdentityError::Request(_) | IdentityError::Parse(_) => StatusCode::BAD_GATEWAY,
        IdentityError::ConfigParse(_) | IdentityError::MissingConfig { .. } | IdentityError::HttpClientBuild(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(err: &IdentityError) -> Response {
    let status = identity_error_to_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "identity call failed");
    } else {
        tracing::warn!(error = %err, "identity call rejected");
    }
    (status, Json(serde_json::json!({ "error": err.code() }))).into_response()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub session: session::Session,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let session = app_state
            .sessions
            .validate(token)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { session, token: token.to_owned() })
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
pub struct CredentialsRequest {
    email: String,
    password: String,
}

/// Current user as exposed to the browser.
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub user_id: String,
    pub username: String,
    pub email: Option<String>,
    pub sign_in_method: String,
}

impl From<Principal> for CurrentUser {
    fn from(p: Principal) -> Self {
        Self { user_id: p.user_id, username: p.username, email: p.email, sign_in_method: p.sign_in_method }
    }
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user_confirmed: bool,
    pub signed_in: bool,
    pub user: Option<CurrentUser>,
}

#[derive(Debug, Serialize)]
pub struct SessionTokenResponse {
    pub id_token: String,
    pub access_token: String,
    pub expires_at: u64,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/signup`: register; sign in immediately when confirmed.
pub async fn signup(State(state): State<AppState>, jar: CookieJar, Json(req): Json<CredentialsRequest>) -> Response {
    match auth_svc::sign_up(&state, &req.email, &req.password).await {
        Ok(registered) => {
            let (jar, user): (CookieJar, Option<CurrentUser>) = match registered.signed_in {
                Some(signed_in) => (jar.add(session_cookie(signed_in.token)), Some(signed_in.principal.into())),
                None => (jar, None),
            };
            let body = SignUpResponse { user_confirmed: registered.user_confirmed, signed_in: user.is_some(), user };
            (jar, (StatusCode::CREATED, Json(body))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// `POST /api/auth/login`: password sign-in, sets the session cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(req): Json<CredentialsRequest>) -> Response {
    match auth_svc::sign_in(&state, &req.email, &req.password).await {
        Ok(signed_in) => {
            let jar = jar.add(session_cookie(signed_in.token));
            (jar, Json(CurrentUser::from(signed_in.principal))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// `POST /api/auth/logout`: revoke tokens, delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = auth_svc::sign_out(&state, &auth.token).await {
        tracing::warn!(error = %e, "provider sign-out failed; local session removed");
    }
    (jar.add(expired_cookie(COOKIE_NAME)), StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<CurrentUser> {
    Json(auth.session.principal.into())
}

/// `GET /api/auth/session-token`: provider tokens for the current session.
pub async fn session_token(auth: AuthUser) -> Json<SessionTokenResponse> {
    let expires_at = auth.session.expires_at_unix();
    let tokens = auth.session.tokens;
    Json(SessionTokenResponse { id_token: tokens.id_token, access_token: tokens.access_token, expires_at })
}

/// `GET /auth/federated/{provider}`: redirect to the hosted UI for `provider`.
pub async fn federated_redirect(State(state): State<AppState>, Path(provider): Path<String>) -> Response {
    let provider = match provider.parse::<FederatedProvider>() {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };

    let oauth_state = session::generate_token();
    let url = match state.identity.authorize_url(provider, &oauth_state) {
        Ok(url) => url,
        Err(e) => return error_response(&e),
    };

    let cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, oauth_state))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::minutes(10));

    let jar = CookieJar::new().add(cookie);
    (jar, Redirect::temporary(&url)).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// `GET /auth/federated/callback`: verify state, exchange code, set cookie,
/// redirect to the dashboard.
///
/// Every failure lands back on the login page with
/// [`FEDERATED_FAILURE_PATH`]. The state cookie is single-use and expired on
/// every outcome.
pub async fn federated_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(|c| c.value().to_owned())
        .unwrap_or_default();
    let jar = jar.add(expired_cookie(OAUTH_STATE_COOKIE_NAME));
    let fail = |jar: CookieJar| (jar, Redirect::temporary(FEDERATED_FAILURE_PATH)).into_response();

    if let Some(error) = params.error.as_deref() {
        tracing::warn!(%error, "federated sign-in cancelled or denied");
        return fail(jar);
    }

    // Verify OAuth CSRF state from cookie.
    let callback_state = params.state.as_deref().unwrap_or_default();
    if expected_state.is_empty() || expected_state != callback_state {
        tracing::warn!("federated callback state mismatch");
        return fail(jar);
    }
    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        tracing::warn!("federated callback without code");
        return fail(jar);
    };

    match auth_svc::complete_federated(&state, code).await {
        Ok(signed_in) => {
            let jar = jar.add(session_cookie(signed_in.token));
            (jar, Redirect::temporary(AFTER_LOGIN_PATH)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "federated code exchange failed");
            fail(jar)
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
