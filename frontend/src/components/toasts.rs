//! Toast stack for the flow's notices.

use leptos::*;

use crate::SessionFlow;

#[component]
pub fn Toaster(session: SessionFlow) -> impl IntoView {
    let toasts = session.toasts();

    view! {
        <div class="toaster">
            <For
                each=move || toasts.get().toasts().to_vec()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.css_class() on:click=move |_| session.dismiss_toast(id)>
                            <div class="toast-title">{toast.notice.title.clone()}</div>
                            <div class="toast-description">{toast.notice.description.clone()}</div>
                            <div class="toast-time">{toast.timestamp.clone()}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
