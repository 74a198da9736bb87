//! Application configuration.
//!
//! The endpoint is baked in at build time: set `PIPESCAN_PREDICT_URL`
//! when running `trunk build` to point the UI at another classifier.

use pipescan_core::DEFAULT_PREDICT_URL;

/// Inference endpoint the UI submits to.
pub const PREDICT_URL: &str = match option_env!("PIPESCAN_PREDICT_URL") {
    Some(url) => url,
    None => DEFAULT_PREDICT_URL,
};

/// Application name, shown in the hero and the page title.
pub const APP_NAME: &str = "Pipe Defect Detection System";

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u32 = 5_000;

/// Maximum toasts shown at once.
pub const MAX_TOASTS: usize = 3;
