//! Image upload component with drag & drop support.
//!
//! Hands the chosen file to the session; validation and preview happen
//! there.

use leptos::*;
use web_sys::{DragEvent, Event, HtmlInputElement};

use crate::SessionFlow;

#[component]
pub fn UploadSection(session: SessionFlow) -> impl IntoView {
    let (is_dragging, set_is_dragging) = create_signal(false);
    let file_input = create_node_ref::<html::Input>();

    // File picker
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            session.select(file);
        }
    };

    // Drop zone
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragging.set(false);

        if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0)) {
            session.select(file);
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragging.set(true);
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragging.set(false);
    };

    // Clear also resets the input so the same file can be picked again
    let on_clear = move |_| {
        session.clear();
        if let Some(input) = file_input.get() {
            input.set_value("");
        }
    };

    view! {
        <div class="card">
            <div class="card-header">
                <div class="card-title">"📤 Upload X-ray Image"</div>
                <div class="card-description">"Drag and drop an X-ray image or click to browse"</div>
            </div>

            <div
                class="upload-zone"
                class:dragging=move || is_dragging.get()
                on:drop=on_drop
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
            >
                <input
                    type="file"
                    accept="image/*"
                    class="upload-input"
                    node_ref=file_input
                    on:change=on_file_change
                />
                <div class="upload-icon">"📤"</div>
                <div class="upload-text">
                    {move || if is_dragging.get() {
                        "Drop image here"
                    } else {
                        "Click to upload or drag and drop"
                    }}
                </div>
                <div class="upload-hint">"PNG, JPG, JPEG up to 10MB"</div>
            </div>

            <Show
                when=move || session.selected_name().is_some()
                fallback=|| view! { }
            >
                <div class="selected-file">
                    <span class="selected-file-name">
                        {move || session.selected_name().unwrap_or_default()}
                    </span>
                    <button class="btn btn-ghost" title="Clear" on:click=on_clear>"✕"</button>
                </div>
            </Show>
        </div>
    }
}
