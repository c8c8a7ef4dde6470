//! Content type resolution
//!
//! Maps a file extension to a MIME type. Extensions are given with their
//! leading dot and matched case-insensitively.

use mime_guess::Mime;

/// Fallback for file-backed resources with an unknown extension
pub const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

/// Fallback for text registered without an extension
pub const DEFAULT_TEXT_TYPE: &str = "text/plain";

/// Resolve the content type for `extension`, or `fallback` when the extension
/// is missing or unknown.
pub fn content_type_for(extension: &str, fallback: &str) -> Mime {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    if ext.is_empty() {
        return parse_or_octet(fallback);
    }

    mime_guess::from_ext(&ext)
        .first()
        .unwrap_or_else(|| parse_or_octet(fallback))
}

/// Resolve the content type of a file on disk from its real extension
pub fn content_type_for_path(path: &std::path::Path) -> Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    content_type_for(ext, DEFAULT_FILE_TYPE)
}

/// Normalize a user-supplied extension to the `.ext` form.
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('.') {
        trimmed.to_ascii_lowercase()
    } else {
        format!(".{}", trimmed.to_ascii_lowercase())
    }
}

fn parse_or_octet(mime: &str) -> Mime {
    mime.parse()
        .unwrap_or(mime_guess::mime::APPLICATION_OCTET_STREAM)
}
