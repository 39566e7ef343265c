//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let signed_in = move || auth.current_user().is_some();

    view! {
        <div class="page home-page">
            <section class="hero">
                <h1 class="hero__title">"여행 계획을 더 쉽게"</h1>
                <p class="hero__subtitle">"목적지와 일정을 정리하고 나만의 여행 일정을 만들어 보세요."</p>
                <div class="hero__actions">
                    <Show
                        when=signed_in
                        fallback=|| {
                            view! {
                                <a class="auth-button" href="/register">
                                    "지금 시작하기"
                                </a>
                                <a class="hero__link" href="/login">
                                    "로그인"
                                </a>
                            }
                        }
                    >
                        <a class="auth-button" href="/plan">
                            "여행 계획하기"
                        </a>
                        <a class="hero__link" href="/dashboard">
                            "대시보드로 이동"
                        </a>
                    </Show>
                </div>
            </section>
        </div>
    }
}
