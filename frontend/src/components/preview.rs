//! Image preview and the "Detect Defect" control.

use leptos::*;

use crate::SessionFlow;

#[component]
pub fn PreviewSection(session: SessionFlow) -> impl IntoView {
    view! {
        <Show
            when=move || session.preview().is_some()
            fallback=|| view! { }
        >
            <div class="card">
                <div class="card-header">
                    <div class="card-title">"Image Preview"</div>
                </div>
                <div class="preview-frame">
                    <img
                        src=move || session.preview().unwrap_or_default()
                        alt="Preview"
                        class="preview-image"
                    />
                </div>

                <button
                    class="btn btn-primary btn-wide"
                    disabled=move || !session.can_submit()
                    on:click=move |_| session.submit()
                >
                    {move || if session.is_submitting() {
                        "⏳ Analyzing..."
                    } else {
                        "⚠️ Detect Defect"
                    }}
                </button>
            </div>
        </Show>
    }
}
