use leptos::*;

use crate::SessionFlow;

#[component]
pub fn LoadingCard(session: SessionFlow) -> impl IntoView {
    view! {
        <Show
            when=move || session.is_submitting()
            fallback=|| view! { }
        >
            <div class="card card-loading">
                <div class="spinner"></div>
                <p class="loading-title">"Processing image..."</p>
                <p class="loading-hint">"AI is analyzing the X-ray for defects"</p>
            </div>
        </Show>
    }
}
