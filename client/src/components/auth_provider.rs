//! Root auth provider that resolves the session once on mount.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything under this provider renders only after the initial session
//! check settles, so guards never see a half-known user.

use leptos::prelude::*;

use crate::state::auth::{AuthContext, AuthState, SessionCheck};

#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let state = RwSignal::new(AuthState::default());
    let auth = AuthContext::new(state);
    provide_context(auth);

    let check = SessionCheck::new();

    #[cfg(feature = "hydrate")]
    {
        let task_check = check.clone();
        leptos::task::spawn_local(async move {
            let result = auth.fetch_current_user().await;
            if let Some(next) = task_check.settle(result) {
                state.set(next);
            }
        });
    }

    on_cleanup(move || check.cancel());

    view! {
        <Show when=move || !state.get().loading>
            {children()}
        </Show>
    }
}
