//! Register page: email + password signup with confirmation, or Google.
//!
//! A confirmed signup opens a session right away and lands on `/dashboard`.
//! An account still awaiting confirmation lands there too and the route guard
//! sends it on to `/login`.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::federated_button::FederatedButton;
use crate::net::types::FederatedProvider;
use crate::pages::login::FEDERATED_LOGIN_FAILED;
use crate::state::auth::use_auth;
use crate::util::form::{FieldErrors, ValidCredentials, auth_outcome, submit_validated, validate_register};

pub(crate) const SIGNUP_FAILED: &str = "계정 생성에 실패했습니다.";
pub(crate) const SUBMIT_LABEL: &str = "회원가입";
pub(crate) const SUBMIT_BUSY_LABEL: &str = "계정 생성 중...";

pub(crate) fn submit_label(busy: bool) -> &'static str {
    if busy { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL }
}

fn field_error(msg: Option<&'static str>) -> Option<impl IntoView> {
    msg.map(|msg| view! { <p class="auth-field-error">{msg}</p> })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::default());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let navigate = navigate.clone();
        let validated = validate_register(&email.get(), &password.get(), &password_confirm.get());
        let errors = submit_validated(validated, move |creds: ValidCredentials| {
            error.set(String::new());
            busy.set(true);
            leptos::task::spawn_local(async move {
                let result = auth.signup(creds.email, creds.password).await;
                match auth_outcome(&result, SIGNUP_FAILED) {
                    Ok(path) => navigate(path, NavigateOptions::default()),
                    Err(message) => {
                        error.set(message.to_owned());
                        busy.set(false);
                    }
                }
            });
        });
        field_errors.set(errors);
    };

    let on_google = Callback::new(move |()| {
        error.set(String::new());
        busy.set(true);
        if auth.login_with_federated(FederatedProvider::Google).is_err() {
            error.set(FEDERATED_LOGIN_FAILED.to_owned());
            busy.set(false);
        }
    });

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">"회원가입"</h1>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-alert">{move || error.get()}</p>
                </Show>
                <form class="auth-form" novalidate on:submit=on_submit>
                    <label class="auth-label" for="email">
                        "이메일"
                    </label>
                    <input
                        id="email"
                        class="auth-input"
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    {move || field_error(field_errors.get().email)}
                    <label class="auth-label" for="password">
                        "비밀번호"
                    </label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    {move || field_error(field_errors.get().password)}
                    <label class="auth-label" for="password-confirm">
                        "비밀번호 확인"
                    </label>
                    <input
                        id="password-confirm"
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || password_confirm.get()
                        on:input=move |ev| password_confirm.set(event_target_value(&ev))
                    />
                    {move || field_error(field_errors.get().password_confirm)}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get())}
                    </button>
                </form>
                <div class="auth-divider">
                    <span>"또는"</span>
                </div>
                <FederatedButton label="구글 계정으로 가입" disabled=busy on_click=on_google/>
                <p class="auth-card__footer">
                    "이미 계정이 있으신가요? " <a href="/login">"로그인"</a>
                </p>
            </div>
        </div>
    }
}
