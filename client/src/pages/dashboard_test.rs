use super::*;

fn user_with_method(method: &str) -> User {
    User {
        user_id: "sub-1".into(),
        username: "traveler".into(),
        email: None,
        sign_in_method: method.into(),
    }
}

#[test]
fn sign_in_method_label_distinguishes_federated() {
    assert_eq!(sign_in_method_label(&user_with_method("password")), "이메일");
    assert_eq!(sign_in_method_label(&user_with_method("federated:Google")), "Google 계정");
}

#[test]
fn describe_expiry_rounds_minutes_up() {
    assert_eq!(describe_expiry(1_000 + 3_600, 1_000), "세션 만료까지 약 60분");
    assert_eq!(describe_expiry(1_000 + 61, 1_000), "세션 만료까지 약 2분");
    assert_eq!(describe_expiry(1_000 + 1, 1_000), "세션 만료까지 약 1분");
}

#[test]
fn describe_expiry_past_or_now_is_expired() {
    let expired = "세션이 만료되었습니다. 다시 로그인해주세요.";
    assert_eq!(describe_expiry(1_000, 1_000), expired);
    assert_eq!(describe_expiry(999, 1_000), expired);
}
