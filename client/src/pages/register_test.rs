use super::*;
use crate::net::api::ApiError;
use crate::net::types::SignUpResult;
use crate::util::form::{EMAIL_INVALID, PASSWORD_MISMATCH, PASSWORD_TOO_SHORT};

#[test]
fn mismatched_confirmation_blocks_signup_call() {
    let mut signup_calls = 0;
    let errors = submit_validated(validate_register("new@example.com", "secret123", "secret321"), |_| {
        signup_calls += 1;
    });
    assert_eq!(signup_calls, 0);
    assert_eq!(errors.password_confirm, Some(PASSWORD_MISMATCH));
}

#[test]
fn every_invalid_field_is_reported_together() {
    let errors = validate_register("nope", "123", "456").unwrap_err();
    assert_eq!(errors.email, Some(EMAIL_INVALID));
    assert_eq!(errors.password, Some(PASSWORD_TOO_SHORT));
    assert_eq!(errors.password_confirm, Some(PASSWORD_MISMATCH));
}

#[test]
fn valid_form_dispatches_signup_once() {
    let mut dispatched = Vec::new();
    let errors = submit_validated(validate_register("new@example.com", "secret123", "secret123"), |creds| {
        dispatched.push(creds.email);
    });
    assert!(errors.is_empty());
    assert_eq!(dispatched, vec!["new@example.com".to_owned()]);
}

#[test]
fn successful_signup_navigates_to_dashboard() {
    let result: Result<SignUpResult, ApiError> = Ok(SignUpResult { user_confirmed: false, signed_in: false, user: None });
    assert_eq!(auth_outcome(&result, SIGNUP_FAILED), Ok("/dashboard"));
}

#[test]
fn failed_signup_shows_fixed_message() {
    let result: Result<SignUpResult, ApiError> = Err(ApiError::Http { status: 409, code: "E_USER_EXISTS".into() });
    assert_eq!(auth_outcome(&result, SIGNUP_FAILED), Err("계정 생성에 실패했습니다."));
}

#[test]
fn submit_label_reflects_busy_state() {
    assert_eq!(submit_label(false), "회원가입");
    assert_eq!(submit_label(true), "계정 생성 중...");
}
