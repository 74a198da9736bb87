//! # Pipescan - command-line client for pipe X-ray defect detection
//!
//! Drives the same upload/submit flow as the browser UI against the
//! inference endpoint, for headless inspection and scripting.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Image file  │────▶│   media     │────▶│    flow     │────▶│   client    │
//! │  (.png ...) │     │ (guess type)│     │ (core crate)│     │ (multipart) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pipescan::{analyze_images, AnalyzeOptions, HttpPredictClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = HttpPredictClient::new("http://localhost:8000/predict").unwrap();
//!     let reports = analyze_images(&["xray1.png".into()], &AnalyzeOptions::default(), &client).await;
//!     println!("{:?}", reports);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Client error types
//! - [`config`] - Endpoint and limit resolution
//! - [`media`] - Loading images from disk
//! - [`client`] - reqwest transport
//! - [`commands`] - `analyze` and `preview`

pub mod error;
pub mod config;
pub mod media;
pub mod client;
pub mod commands;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CliError, CliResult};

pub use config::ClientConfig;

pub use media::{guess_media_type, read_image, stat_image, ImageHeader};

pub use client::HttpPredictClient;

pub use commands::{analyze_images, preview_image, render_notice, render_report, AnalyzeOptions, ImageReport};
