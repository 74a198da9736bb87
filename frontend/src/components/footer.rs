//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Powered by PyTorch AI Model • Real-time Analysis • " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
        </footer>
    }
}
