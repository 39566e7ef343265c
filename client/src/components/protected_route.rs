//! Route guard for pages that need a signed-in user.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_auth;
use crate::util::auth::install_unauth_redirect;

/// Renders `children` for a signed-in user and sends everyone else to
/// `/login`.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    install_unauth_redirect(auth.state, use_navigate());

    view! {
        <Show when=move || auth.state.get().user.is_some()>
            {children()}
        </Show>
    }
}
