use super::*;

fn traveler() -> User {
    User {
        user_id: "sub-1".to_owned(),
        username: "traveler".to_owned(),
        email: Some("traveler@example.com".to_owned()),
        sign_in_method: "password".to_owned(),
    }
}

#[test]
fn auth_state_starts_loading_without_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
}

#[test]
fn resolved_clears_loading() {
    let state = AuthState::resolved(Some(traveler()));
    assert!(!state.loading);
    assert_eq!(state.user, Some(traveler()));
}

#[test]
fn settle_with_user_signs_in() {
    let check = SessionCheck::new();
    assert_eq!(check.settle(Ok(Some(traveler()))), Some(AuthState::resolved(Some(traveler()))));
}

#[test]
fn settle_with_no_session_signs_out() {
    let check = SessionCheck::new();
    assert_eq!(check.settle(Ok(None)), Some(AuthState::resolved(None)));
}

#[test]
fn settle_failure_counts_as_signed_out() {
    let check = SessionCheck::new();
    let next = check.settle(Err(ApiError::Network("offline".into())));
    assert_eq!(next, Some(AuthState::resolved(None)));
}

#[test]
fn late_success_after_cancel_is_ignored() {
    let check = SessionCheck::new();
    let task_copy = check.clone();
    check.cancel();
    assert!(task_copy.is_cancelled());
    assert_eq!(task_copy.settle(Ok(Some(traveler()))), None);
}

#[test]
fn late_failure_after_cancel_is_ignored() {
    let check = SessionCheck::new();
    let task_copy = check.clone();
    check.cancel();
    assert_eq!(task_copy.settle(Err(ApiError::Unavailable)), None);
}
