//! UI Components for the Pipescan application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Image picker with drag & drop
//! - [`PreviewSection`] - Image preview and the submit control
//! - [`LoadingCard`] - Shown while the endpoint is working
//! - [`ResultCard`] - Verdict and confidence bar
//! - [`Toaster`] - Transient notices

mod hero;
mod upload;
mod preview;
mod loading;
mod result;
mod toasts;
mod footer;

pub use hero::*;
pub use upload::*;
pub use preview::*;
pub use loading::*;
pub use result::*;
pub use toasts::*;
pub use footer::*;
