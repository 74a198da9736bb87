//! Browser services.
//!
//! # Services
//!
//! - [`predict`] - Multipart upload to the inference endpoint (gloo-net)
//! - [`preview`] - Data URL preview through `FileReader`

pub mod predict;
pub mod preview;

pub use predict::*;
pub use preview::*;
