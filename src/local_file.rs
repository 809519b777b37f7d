//! Loading local images as `data:` URIs.

use crate::error::{Result, SirayError};
use base64::Engine;
use std::path::Path;

/// Returns the MIME type for a lowercase file extension.
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Reads `path` and encodes it as `data:<mime>;base64,<payload>`.
///
/// The MIME type is chosen from the file extension; unknown extensions are
/// rejected before the file is read.
pub async fn load_from_local(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SirayError::InvalidRequest(
            "file path must be a non-empty string".into(),
        ));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let mime_type = mime_type_for_extension(&ext).ok_or_else(|| {
        SirayError::UnsupportedFileType(if ext.is_empty() { "unknown".into() } else { ext })
    })?;

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), size = bytes.len(), mime_type, "loaded local file");

    Ok(to_data_uri(mime_type, &bytes))
}

fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{payload}")
}
