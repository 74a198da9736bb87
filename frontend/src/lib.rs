//! Pipescan - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading a pipe X-ray image and showing the
//! defect classification returned by the inference endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection (drop zone, picker, selected file)       │
//! │  ├── PreviewSection (when a preview is ready)               │
//! │  ├── LoadingCard (while submitting)                         │
//! │  └── ResultCard (when a result is ready)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Toaster, Footer                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`session`] - The flow record held in a signal
//! - [`types`] - Toast stack
//! - [`components`] - UI components
//! - [`services`] - Browser I/O (preview read, endpoint upload)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod session;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;

pub use types::{Toast, ToastQueue};

pub use session::SessionFlow;

pub use components::*;

pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Pipescan - Starting Leptos App (endpoint: {})", PREDICT_URL);

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // One session per tab
    let session = SessionFlow::new();

    view! {
        <div class="container">
            <Hero/>
            <UploadSection session=session/>
            <PreviewSection session=session/>
            <LoadingCard session=session/>
            <ResultCard session=session/>
        </div>

        <Toaster session=session/>
        <Footer/>
    }
}
