//! # Pipescan core - upload, submit and display an X-ray inspection
//!
//! This crate owns the one stateful piece of Pipescan: the flow that takes
//! an operator from picking an image, through the remote defect
//! classification, to the result card. It has no browser or runtime
//! dependency; the Leptos frontend and the native CLI both drive it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ select_file │────▶│   preview   │────▶│   submit    │────▶│   result    │
//! │ (validate)  │     │  (ticketed) │     │ (one POST)  │     │ (verdict)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Hosts hold an [`UploadSubmitFlow`] behind a [`FlowCell`] and plug a
//! [`PredictTransport`] into [`submit_with`].
//!
//! ## Modules
//!
//! - [`config`] - Endpoint and validation constants
//! - [`error`] - Flow and submission error types
//! - [`types`] - Selected file, analysis result, notices
//! - [`flow`] - The state machine
//! - [`preview`] - Data URL encoding
//! - [`response`] - Endpoint response contract
//! - [`submit`] - Async submission driver

pub mod config;
pub mod error;
pub mod types;
pub mod flow;
pub mod preview;
pub mod response;
pub mod submit;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;

pub use error::{FlowError, FlowResult, SubmissionError};

pub use types::{
    // Selection
    SelectedFile,
    // Result
    AnalysisResult, Verdict,
    // Notices
    Notice, NoticeSeverity,
};

pub use flow::{FlowState, PreviewTicket, Settlement, SubmitRequest, SubmitTicket, UploadSubmitFlow};

pub use preview::encode_data_url;

pub use response::decode_prediction;

pub use submit::{submit_with, FlowCell, PredictTransport, SubmitGuard};
