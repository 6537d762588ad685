//! Turning a path on disk into an [`UploadCandidate`].
//!
//! The MIME type is declared from the file extension (or an explicit
//! override), never sniffed from the content.

use std::path::Path;

use ecosnap_core::UploadCandidate;

use crate::errors::{ClientError, Result};

const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
];

pub fn mime_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .and_then(|ext| {
            EXTENSION_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or("application/octet-stream")
}

pub async fn candidate(path: &Path, mime_override: Option<&str>) -> Result<UploadCandidate> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is not a file", path.display()),
        )));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(UploadCandidate {
        file_name,
        mime_type: mime_override
            .map(str::to_string)
            .unwrap_or_else(|| mime_for(path).to_string()),
        size_bytes: metadata.len(),
        path: path.to_path_buf(),
    })
}
