//! Dashboard page for the signed-in traveler.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route after login, signup, and the
//! federated callback. It shows who is signed in, how the session was opened,
//! and when the provider tokens expire.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::types::User;
use crate::state::auth::use_auth;

pub(crate) fn sign_in_method_label(user: &User) -> &'static str {
    if user.is_federated() { "Google 계정" } else { "이메일" }
}

/// Human-readable remaining session time, in whole minutes.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn describe_expiry(expires_at: u64, now_secs: u64) -> String {
    match expires_at.checked_sub(now_secs) {
        Some(remaining) if remaining > 0 => format!("세션 만료까지 약 {}분", remaining.div_ceil(60)),
        _ => "세션이 만료되었습니다. 다시 로그인해주세요.".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let expiry = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            let Ok(session) = auth.fetch_session().await else {
                return;
            };
            if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                return;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let now_secs = (js_sys::Date::now() / 1000.0) as u64;
            expiry.set(Some(describe_expiry(session.expires_at, now_secs)));
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let user = move || auth.current_user();

    view! {
        <div class="page dashboard-page">
            <h1 class="page__title">"대시보드"</h1>
            {move || {
                user()
                    .map(|user| {
                        view! {
                            <section class="card">
                                <p class="card__lead">
                                    "환영합니다, " <strong>{user.display_name().to_owned()}</strong> "님"
                                </p>
                                <p class="card__meta">"로그인 방식: " {sign_in_method_label(&user)}</p>
                                <p class="card__meta">{move || expiry.get().unwrap_or_default()}</p>
                            </section>
                        }
                    })
            }}
            <section class="card">
                <h2 class="card__title">"내 여행"</h2>
                <p class="card__meta">"아직 계획된 여행이 없습니다."</p>
                <a class="auth-button dashboard-page__cta" href="/plan">
                    "새 여행 계획하기"
                </a>
            </section>
        </div>
    }
}
