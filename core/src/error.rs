//! Error types for the upload/submit flow.
//!
//! - [`SubmissionError`] - Why a submission did not yield a result
//! - [`FlowError`] - Everything an operation on the flow can fail with
//!
//! Both are `Clone + PartialEq`: the flow keeps the last submission error
//! in its state and tests compare errors directly.

use thiserror::Error;

// =============================================================================
// Submission Errors
// =============================================================================

/// Why a submission to the inference endpoint failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// Network unreachable, request could not be built, body unreadable.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("API error: {code}")]
    Status { code: u16, body: String },

    /// The body did not decode as `{status, confidence}`.
    #[error("Malformed response: {0}")]
    MalformedBody(String),

    /// The request was dropped before it settled.
    #[error("Request abandoned before it settled")]
    Abandoned,
}

// =============================================================================
// Flow Errors
// =============================================================================

/// Errors returned by [`crate::UploadSubmitFlow`] operations.
///
/// None of them is fatal: the flow always returns to an interactive state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// The candidate is not an image.
    #[error("Invalid file type: {media_type}")]
    InvalidFileType { media_type: String },

    /// The candidate exceeds the configured size limit.
    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// `submit` was called without a selected file.
    #[error("No file selected")]
    NoFileSelected,

    /// `submit` was called while a request is still in flight.
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// The submission settled without a result.
    #[error("Submission failed: {0}")]
    SubmissionFailed(#[from] SubmissionError),
}

/// Result type for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;
