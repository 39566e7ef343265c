use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p>"© Wayfarer. 여행의 모든 순간을 함께합니다."</p>
        </footer>
    }
}
