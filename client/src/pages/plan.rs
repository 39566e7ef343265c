//! Trip planning page. Protected; rendered behind `ProtectedRoute`.

use leptos::prelude::*;

use crate::state::auth::use_auth;

#[component]
pub fn PlanTravelPage() -> impl IntoView {
    let auth = use_auth();
    let greeting = move || {
        auth.current_user()
            .map(|user| format!("{}님의 다음 여행은 어디인가요?", user.display_name()))
            .unwrap_or_default()
    };

    view! {
        <div class="page plan-page">
            <h1 class="page__title">"여행 계획"</h1>
            <p class="page__subtitle">{greeting}</p>
            <section class="card">
                <p class="card__meta">"여행 계획 기능은 준비 중입니다."</p>
            </section>
        </div>
    }
}
