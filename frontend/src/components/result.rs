//! Result card: verdict, confidence and advice.

use leptos::*;
use pipescan_core::FlowState;

use crate::SessionFlow;

#[component]
pub fn ResultCard(session: SessionFlow) -> impl IntoView {
    view! {
        <Show
            when=move || session.state() == FlowState::ResultReady
            fallback=|| view! { }
        >
            {move || session.result().map(|result| {
                let verdict = result.verdict();
                view! {
                    <div class=format!("card card-result {}", verdict.css_class())>
                        <div class="card-header">
                            <div class="card-title verdict-title">{verdict.title()}</div>
                        </div>
                        <div class="confidence">
                            <div class="confidence-row">
                                <span class="confidence-label">"Confidence Level"</span>
                                <span class="confidence-value">{result.confidence_percent()}</span>
                            </div>
                            <div class="confidence-track">
                                <div
                                    class="confidence-fill"
                                    style=format!("width: {:.1}%;", result.bar_width_percent())
                                ></div>
                            </div>
                        </div>
                        <div class="verdict-advice">
                            {verdict.emoji()} " " {verdict.advice()}
                        </div>
                    </div>
                }
            })}
        </Show>
    }
}
