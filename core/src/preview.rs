//! Data URL encoding for the preview pane.
//!
//! The browser gets this for free from `FileReader::readAsDataURL`; native
//! hosts encode the bytes themselves.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encode `bytes` as a `data:` URL of the given media type.
pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}
