//! Flow configuration.
//!
//! Constants shared by every host of the flow. Hosts may override the
//! endpoint and opt into a size limit at startup.

/// Default inference endpoint.
///
/// The defect classifier listens here in a local setup.
pub const DEFAULT_PREDICT_URL: &str = "http://localhost:8000/predict";

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

/// Media type prefix a selected file must carry.
pub const ACCEPTED_MEDIA_PREFIX: &str = "image/";

/// Status literal the endpoint returns for a defective pipe.
pub const DEFECT_STATUS: &str = "defect detected";

/// Longest slice of an error body kept for diagnostics.
pub const MAX_ERROR_BODY_CHARS: usize = 512;
