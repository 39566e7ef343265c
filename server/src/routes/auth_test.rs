use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::state::test_helpers::{FEDERATED_CODE, GOOD_PASSWORD, MockIdentity, test_app_state};

// =============================================================================
// env_bool: uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on", " TRUE "].iter().enumerate() {
        let key = format!("__TEST_WF_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_WF_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_or_unset_returns_none() {
    let key = "__TEST_WF_EB_INVALID_311__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__TEST_WF_EB_SURELY_UNSET_312__"), None);
}

// =============================================================================
// identity_error_to_status
// =============================================================================

fn rejected(kind: &str) -> IdentityError {
    IdentityError::Rejected { status: 400, kind: kind.into(), message: String::new() }
}

#[test]
fn identity_error_to_status_maps_rejections() {
    assert_eq!(identity_error_to_status(&rejected("NotAuthorizedException")), StatusCode::UNAUTHORIZED);
    assert_eq!(identity_error_to_status(&rejected("UserNotConfirmedException")), StatusCode::UNAUTHORIZED);
    assert_eq!(identity_error_to_status(&rejected("UsernameExistsException")), StatusCode::CONFLICT);
    assert_eq!(identity_error_to_status(&rejected("InvalidPasswordException")), StatusCode::BAD_REQUEST);
    assert_eq!(identity_error_to_status(&rejected("TooManyRequestsException")), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(identity_error_to_status(&rejected("InternalErrorException")), StatusCode::BAD_GATEWAY);
}

#[test]
fn identity_error_to_status_maps_local_errors() {
    assert_eq!(identity_error_to_status(&IdentityError::Request("timeout".into())), StatusCode::BAD_GATEWAY);
    assert_eq!(
        identity_error_to_status(&IdentityError::FederationNotConfigured),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        identity_error_to_status(&IdentityError::UnsupportedProvider("x".into())),
        StatusCode::NOT_FOUND
    );
}

// =============================================================================
// Router
// =============================================================================

fn app(mock: MockIdentity) -> (Router, AppState) {
    let state = test_app_state(Arc::new(mock));
    (api_routes(state.clone()), state)
}

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request")
}

fn session_cookie_from(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{COOKIE_NAME}=")))
        .and_then(|v| v.split(';').next())
        .map(str::to_owned)
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn healthz_ok() {
    let (router, _) = app(MockIdentity::default());
    let resp = router
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let (router, _) = app(MockIdentity::default());
    let resp = router
        .oneshot(Request::builder().uri("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_unknown_cookie_is_unauthorized() {
    let (router, _) = app(MockIdentity::default());
    let resp = router
        .oneshot(get_with_cookie("/api/auth/me", "session_token=forged"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_sets_cookie_and_me_returns_user() {
    let (router, _) = app(MockIdentity::with_account("a@b.co"));

    let resp = router
        .clone()
        .oneshot(json_post("/api/auth/login", &serde_json::json!({ "email": "a@b.co", "password": GOOD_PASSWORD })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie_from(&resp).expect("session cookie");
    let body = body_json(resp).await;
    assert_eq!(body["username"], "a@b.co");
    assert_eq!(body["sign_in_method"], "password");

    let resp = router
        .oneshot(get_with_cookie("/api/auth/me", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["email"], "a@b.co");
}

#[tokio::test]
async fn login_bad_password_returns_unauthorized_code() {
    let (router, _) = app(MockIdentity::with_account("a@b.co"));
    let resp = router
        .oneshot(json_post("/api/auth/login", &serde_json::json!({ "email": "a@b.co", "password": "nope" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie_from(&resp).is_none());
    assert_eq!(body_json(resp).await["error"], "E_INVALID_CREDENTIALS");
}

#[tokio::test]
async fn signup_unconfirmed_returns_created_without_cookie() {
    let (router, _) = app(MockIdentity::default());
    let resp = router
        .oneshot(json_post("/api/auth/signup", &serde_json::json!({ "email": "new@b.co", "password": GOOD_PASSWORD })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(session_cookie_from(&resp).is_none());
    let body = body_json(resp).await;
    assert_eq!(body["user_confirmed"], false);
    assert_eq!(body["signed_in"], false);
}

#[tokio::test]
async fn signup_confirmed_signs_in() {
    let (router, _) = app(MockIdentity::auto_confirming());
    let resp = router
        .oneshot(json_post("/api/auth/signup", &serde_json::json!({ "email": "new@b.co", "password": GOOD_PASSWORD })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(session_cookie_from(&resp).is_some());
    assert_eq!(body_json(resp).await["user"]["username"], "new@b.co");
}

#[tokio::test]
async fn signup_confirmed_without_session_is_still_created() {
    let (router, _) = app(MockIdentity::auto_confirming());
    let resp = router
        .oneshot(json_post("/api/auth/signup", &serde_json::json!({ "email": "new@b.co", "password": "different-pw" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(session_cookie_from(&resp).is_none());
    let body = body_json(resp).await;
    assert_eq!(body["user_confirmed"], true);
    assert_eq!(body["signed_in"], false);
}

#[tokio::test]
async fn signup_duplicate_returns_conflict() {
    let (router, _) = app(MockIdentity::with_account("a@b.co"));
    let resp = router
        .oneshot(json_post("/api/auth/signup", &serde_json::json!({ "email": "a@b.co", "password": GOOD_PASSWORD })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["error"], "E_USER_EXISTS");
}

#[tokio::test]
async fn logout_clears_session() {
    let (router, state) = app(MockIdentity::with_account("a@b.co"));
    let signed_in = auth_svc::sign_in(&state, "a@b.co", GOOD_PASSWORD).await.unwrap();
    let cookie = format!("{COOKIE_NAME}={}", signed_in.token);

    let resp = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(state.sessions.is_empty().await);

    let resp = router
        .oneshot(get_with_cookie("/api/auth/me", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_token_returns_provider_tokens() {
    let (router, state) = app(MockIdentity::with_account("a@b.co"));
    let signed_in = auth_svc::sign_in(&state, "a@b.co", GOOD_PASSWORD).await.unwrap();
    let resp = router
        .oneshot(get_with_cookie("/api/auth/session-token", &format!("{COOKIE_NAME}={}", signed_in.token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["access_token"], "access-a@b.co");
    assert_eq!(body["id_token"], "id-a@b.co");
    assert!(body["expires_at"].as_u64().unwrap() > 0);
}

// =============================================================================
// Federated flow
// =============================================================================

#[tokio::test]
async fn federated_redirect_sets_state_cookie() {
    let (router, _) = app(MockIdentity::default());
    let resp = router
        .oneshot(Request::builder().uri("/auth/federated/google").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers()[header::LOCATION].to_str().unwrap().to_owned();
    assert!(location.contains("identity_provider=Google"));
    let has_state_cookie = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .any(|v| v.to_str().unwrap_or_default().starts_with(OAUTH_STATE_COOKIE_NAME));
    assert!(has_state_cookie);
}

#[tokio::test]
async fn federated_redirect_unknown_provider_is_not_found() {
    let (router, _) = app(MockIdentity::default());
    let resp = router
        .oneshot(Request::builder().uri("/auth/federated/myspace").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn state_cookie_cleared(response: &Response) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&format!("{OAUTH_STATE_COOKIE_NAME}=")) && v.contains("Max-Age=0"))
}

async fn callback(uri: &str, state_cookie: Option<&str>) -> (Response, AppState) {
    let (router, state) = app(MockIdentity::default());
    let request = match state_cookie {
        Some(value) => get_with_cookie(uri, &format!("{OAUTH_STATE_COOKIE_NAME}={value}")),
        None => Request::builder().uri(uri).body(Body::empty()).unwrap(),
    };
    (router.oneshot(request).await.unwrap(), state)
}

fn assert_back_to_login_with_error(resp: &Response) {
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/login?error=federated");
    assert!(state_cookie_cleared(resp));
    assert!(session_cookie_from(resp).is_none());
}

#[tokio::test]
async fn federated_callback_success_redirects_to_dashboard() {
    let uri = format!("/auth/federated/callback?code={FEDERATED_CODE}&state=abc");
    let (resp, state) = callback(&uri, Some("abc")).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/dashboard");
    assert!(session_cookie_from(&resp).is_some());
    assert!(state_cookie_cleared(&resp));
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn federated_callback_state_mismatch_goes_back_to_login() {
    let uri = format!("/auth/federated/callback?code={FEDERATED_CODE}&state=abc");
    let (resp, state) = callback(&uri, Some("xyz")).await;
    assert_back_to_login_with_error(&resp);
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn federated_callback_without_state_cookie_goes_back_to_login() {
    let uri = format!("/auth/federated/callback?code={FEDERATED_CODE}&state=abc");
    let (resp, state) = callback(&uri, None).await;
    assert_back_to_login_with_error(&resp);
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn federated_callback_missing_code_goes_back_to_login() {
    let (resp, state) = callback("/auth/federated/callback?state=abc", Some("abc")).await;
    assert_back_to_login_with_error(&resp);
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn federated_callback_failed_exchange_goes_back_to_login() {
    let (resp, state) = callback("/auth/federated/callback?code=stale&state=abc", Some("abc")).await;
    assert_back_to_login_with_error(&resp);
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn federated_callback_provider_error_goes_back_to_login() {
    let (resp, _) = callback("/auth/federated/callback?error=access_denied", Some("abc")).await;
    assert_back_to_login_with_error(&resp);
}
