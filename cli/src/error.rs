//! Error types for the Pipescan command-line client.
//!
//! Flow-level failures come from `pipescan-core`; this module adds what
//! can go wrong around them (files, configuration, HTTP client setup).
//! Conversion is automatic via `From`, so `?` works across the boundary.

use std::path::PathBuf;

use pipescan_core::FlowError;
use thiserror::Error;

/// Errors of the command-line client.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to read an image.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An accepted image ended up without a preview.
    #[error("No preview available for {}", path.display())]
    PreviewUnavailable { path: PathBuf },

    /// Invalid endpoint or limit.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The flow refused or failed an operation.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Output serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some images of a batch were not analyzed.
    #[error("{failed} of {total} images could not be analyzed")]
    Incomplete { failed: usize, total: usize },
}

/// Result type for client operations.
pub type CliResult<T> = Result<T, CliError>;
