//! Itinerary viewer addressed by `/itinerary/:id`.

#[cfg(test)]
#[path = "itinerary_test.rs"]
mod itinerary_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

/// Route param, or `None` when the segment is blank.
pub(crate) fn itinerary_id(raw: Option<String>) -> Option<String> {
    raw.map(|id| id.trim().to_owned()).filter(|id| !id.is_empty())
}

#[component]
pub fn ViewItineraryPage() -> impl IntoView {
    let params = use_params_map();
    let id = move || itinerary_id(params.read().get("id"));

    view! {
        <div class="page itinerary-page">
            <h1 class="page__title">"여행 일정"</h1>
            {move || match id() {
                Some(id) => {
                    view! { <p class="card__meta">"일정 번호: " <code>{id}</code></p> }.into_any()
                }
                None => view! { <p class="card__meta">"일정을 찾을 수 없습니다."</p> }.into_any(),
            }}
        </div>
    }
}
