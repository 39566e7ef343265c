use super::*;

#[test]
fn error_code_from_body_reads_error_field() {
    assert_eq!(error_code_from_body(r#"{"error":"E_INVALID_CREDENTIALS"}"#), "E_INVALID_CREDENTIALS");
}

#[test]
fn error_code_from_body_falls_back_on_garbage() {
    assert_eq!(error_code_from_body("<html>502</html>"), "E_UNKNOWN");
    assert_eq!(error_code_from_body(""), "E_UNKNOWN");
}

#[test]
fn federated_path_formats_provider() {
    assert_eq!(federated_path(FederatedProvider::Google), "/auth/federated/google");
}

#[test]
fn api_error_display() {
    let err = ApiError::Http { status: 401, code: "E_INVALID_CREDENTIALS".into() };
    assert_eq!(err.to_string(), "request failed (401): E_INVALID_CREDENTIALS");
    assert_eq!(ApiError::Unavailable.to_string(), "not available on server");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn begin_federated_is_unavailable_off_browser() {
    assert_eq!(begin_federated(FederatedProvider::Google), Err(ApiError::Unavailable));
}
