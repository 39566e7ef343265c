use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page not-found-page">
            <h1 class="page__title">"페이지를 찾을 수 없습니다"</h1>
            <a class="hero__link" href="/">
                "홈으로 돌아가기"
            </a>
        </div>
    }
}
