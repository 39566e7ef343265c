//! Top navigation bar.
//!
//! Shows sign-in links for visitors and the trip links plus logout for
//! signed-in users.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_auth;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">
                "Wayfarer"
            </a>
            <div class="navbar__links">
                <Show
                    when=move || auth.current_user().is_some()
                    fallback=|| {
                        view! {
                            <a class="navbar__link" href="/login">
                                "로그인"
                            </a>
                            <a class="navbar__link navbar__link--primary" href="/register">
                                "회원가입"
                            </a>
                        }
                    }
                >
                    <a class="navbar__link" href="/dashboard">
                        "대시보드"
                    </a>
                    <a class="navbar__link" href="/plan">
                        "여행 계획"
                    </a>
                    <LogoutButton/>
                </Show>
            </div>
        </nav>
    }
}

#[component]
fn LogoutButton() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if auth.logout().await.is_ok() {
                navigate("/", NavigateOptions::default());
            }
        });
    };

    view! {
        <button class="navbar__link navbar__button" type="button" on:click=on_logout>
            "로그아웃"
        </button>
    }
}
