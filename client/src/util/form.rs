//! Field validation for the login and register forms.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both auth pages validate locally before any network call. A form that
//! fails validation never reaches the auth context, so an empty submit costs
//! nothing and leaves the session untouched.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::sync::LazyLock;

use regex::Regex;

pub const EMAIL_REQUIRED: &str = "이메일을 입력해주세요.";
pub const EMAIL_INVALID: &str = "유효한 이메일 주소를 입력해주세요.";
pub const PASSWORD_REQUIRED: &str = "비밀번호를 입력해주세요.";
pub const PASSWORD_TOO_SHORT: &str = "비밀번호는 최소 6자 이상이어야 합니다.";
pub const PASSWORD_CONFIRM_REQUIRED: &str = "비밀번호를 다시 입력해주세요.";
pub const PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";

/// Counted in UTF-16 code units, the way browser `minlength` counts.
pub const MIN_PASSWORD_UNITS: usize = 6;

/// Where a successful login or signup lands.
pub const AFTER_AUTH_PATH: &str = "/dashboard";

// ASCII-only case folding: `ſ` and the Kelvin sign must not match `[A-Z]`.
static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i-u)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").ok());

/// Per-field messages shown under each input. `None` means the field is fine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub password_confirm: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.password_confirm.is_none()
    }
}

/// Credentials that passed form validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidCredentials {
    pub email: String,
    pub password: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|re| re.is_match(email))
}

/// Login only requires both fields to be present.
///
/// # Errors
///
/// Returns the per-field messages when either field is empty.
pub fn validate_login(email: &str, password: &str) -> Result<ValidCredentials, FieldErrors> {
    let email = email.trim();
    let errors = FieldErrors {
        email: email.is_empty().then_some(EMAIL_REQUIRED),
        password: password.is_empty().then_some(PASSWORD_REQUIRED),
        password_confirm: None,
    };
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ValidCredentials { email: email.to_owned(), password: password.to_owned() })
}

/// Register checks email shape, password length, and that the confirmation
/// matches.
///
/// # Errors
///
/// Returns the per-field messages for every failing field.
pub fn validate_register(email: &str, password: &str, password_confirm: &str) -> Result<ValidCredentials, FieldErrors> {
    let email = email.trim();
    let email_error = if email.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !is_valid_email(email) {
        Some(EMAIL_INVALID)
    } else {
        None
    };
    let password_error = if password.is_empty() {
        Some(PASSWORD_REQUIRED)
    } else if password.encode_utf16().count() < MIN_PASSWORD_UNITS {
        Some(PASSWORD_TOO_SHORT)
    } else {
        None
    };
    let confirm_error = if password_confirm.is_empty() {
        Some(PASSWORD_CONFIRM_REQUIRED)
    } else if password_confirm != password {
        Some(PASSWORD_MISMATCH)
    } else {
        None
    };

    let errors = FieldErrors { email: email_error, password: password_error, password_confirm: confirm_error };
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ValidCredentials { email: email.to_owned(), password: password.to_owned() })
}

/// Run `dispatch` only for validated input and hand back the messages to
/// display. A failed validation returns its errors without calling
/// `dispatch`.
pub fn submit_validated<T, F>(validated: Result<T, FieldErrors>, dispatch: F) -> FieldErrors
where
    F: FnOnce(T),
{
    match validated {
        Ok(input) => {
            dispatch(input);
            FieldErrors::default()
        }
        Err(errors) => errors,
    }
}

/// Map an auth call result to either the next route or the message to show.
///
/// # Errors
///
/// Returns `failure` when the call failed.
pub fn auth_outcome<T, E>(result: &Result<T, E>, failure: &'static str) -> Result<&'static str, &'static str> {
    match result {
        Ok(_) => Ok(AFTER_AUTH_PATH),
        Err(_) => Err(failure),
    }
}
