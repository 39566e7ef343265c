//! Login page supporting email + password and Google sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::federated_button::FederatedButton;
use crate::net::types::FederatedProvider;
use crate::state::auth::use_auth;
use crate::util::form::{FieldErrors, ValidCredentials, auth_outcome, submit_validated, validate_login};

pub(crate) const LOGIN_FAILED: &str = "로그인에 실패했습니다. 이메일과 비밀번호를 확인해주세요.";
pub(crate) const FEDERATED_LOGIN_FAILED: &str = "Google 로그인에 실패했습니다.";
pub(crate) const SUBMIT_LABEL: &str = "로그인";
pub(crate) const SUBMIT_BUSY_LABEL: &str = "로그인 중...";

/// Query value the federated callback uses to report a failed sign-in.
pub(crate) const FEDERATED_ERROR_QUERY: &str = "federated";

/// Message to show on arrival, from the `error` query parameter.
pub(crate) fn arrival_error(query_error: Option<&str>) -> Option<&'static str> {
    (query_error == Some(FEDERATED_ERROR_QUERY)).then_some(FEDERATED_LOGIN_FAILED)
}

pub(crate) fn submit_label(busy: bool) -> &'static str {
    if busy { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::default());
    let query = use_query_map();
    let arrival = arrival_error(query.get_untracked().get("error").as_deref());
    let error = RwSignal::new(arrival.unwrap_or_default().to_owned());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let navigate = navigate.clone();
        let validated = validate_login(&email.get(), &password.get());
        let errors = submit_validated(validated, move |creds: ValidCredentials| {
            error.set(String::new());
            busy.set(true);
            leptos::task::spawn_local(async move {
                let result = auth.login(creds.email, creds.password).await;
                match auth_outcome(&result, LOGIN_FAILED) {
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
                <h1 class="auth-card__title">"로그인"</h1>
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
                    {move || field_errors.get().email.map(|msg| view! { <p class="auth-field-error">{msg}</p> })}
                    <label class="auth-label" for="password">
                        "비밀번호"
                    </label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    {move || field_errors.get().password.map(|msg| view! { <p class="auth-field-error">{msg}</p> })}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get())}
                    </button>
                </form>
                <div class="auth-divider">
                    <span>"또는"</span>
                </div>
                <FederatedButton label="구글 계정으로 로그인" disabled=busy on_click=on_google/>
                <p class="auth-card__footer">
                    "계정이 없으신가요? " <a href="/register">"회원가입"</a>
                </p>
            </div>
        </div>
    }
}
