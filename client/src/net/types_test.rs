use super::*;

#[test]
fn user_deserializes_without_email() {
    let user: User = serde_json::from_str(
        r#"{"user_id":"sub-1","username":"google_1049","sign_in_method":"federated:Google","extra":1}"#,
    )
    .unwrap();
    assert_eq!(user.email, None);
    assert_eq!(user.display_name(), "google_1049");
    assert!(user.is_federated());
}

#[test]
fn user_display_name_prefers_email() {
    let user = User {
        user_id: "sub-2".into(),
        username: "u".into(),
        email: Some("traveler@example.com".into()),
        sign_in_method: "password".into(),
    };
    assert_eq!(user.display_name(), "traveler@example.com");
    assert!(!user.is_federated());
}

#[test]
fn signup_result_without_user() {
    let result: SignUpResult = serde_json::from_str(r#"{"user_confirmed":false,"signed_in":false,"user":null}"#).unwrap();
    assert!(!result.signed_in);
    assert!(result.user.is_none());
}

#[test]
fn credentials_serialize_field_names() {
    let json = serde_json::to_value(Credentials { email: "a@b.co".into(), password: "pw".into() }).unwrap();
    assert_eq!(json, serde_json::json!({ "email": "a@b.co", "password": "pw" }));
}

#[test]
fn federated_provider_slug() {
    assert_eq!(FederatedProvider::Google.slug(), "google");
}
