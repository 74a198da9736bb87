//! Loading images from disk.
//!
//! The browser declares a media type for every picked file; on the command
//! line it is guessed from the extension so the flow can validate it the
//! same way.

use std::path::Path;

use pipescan_core::SelectedFile;

use crate::error::{CliError, CliResult};

/// Media type for unknown extensions; the flow rejects it.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Guess a media type from the file extension.
pub fn guess_media_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => UNKNOWN_MEDIA_TYPE,
    }
}

/// What is known about an image before its content is read.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageHeader {
    pub name: String,
    pub media_type: String,
    pub size: u64,
}

/// Name, media type and size of `path`, from its metadata only.
pub async fn stat_image(path: &Path, media_type: Option<&str>) -> CliResult<ImageHeader> {
    let metadata = tokio::fs::metadata(path).await.map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type.unwrap_or_else(|| guess_media_type(path)).to_string();

    Ok(ImageHeader { name, media_type, size: metadata.len() })
}

/// Read the content of an image that passed the selection checks.
pub async fn read_image(path: &Path, header: ImageHeader) -> CliResult<SelectedFile<Vec<u8>>> {
    let content = tokio::fs::read(path).await.map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(SelectedFile::from_bytes(header.name, header.media_type, content))
}
