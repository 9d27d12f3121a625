//! Input validation for analysis requests.
//!
//! Pure decision functions over metadata; nothing here touches the
//! filesystem or network. Cleanup of a spooled file that fails the size
//! check belongs to the spool guard, not to these checks.

use crate::error::ValidationError;

/// File extensions accepted for analysis, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".webp", ".bmp", ".gif"];

/// Upload size limit in megabytes.
pub const MAX_FILE_SIZE_MB: u64 = 10;

/// Upload size limit in bytes. The boundary is inclusive: a file of exactly
/// this many bytes is still accepted.
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

/// Maximum length, in characters, of a source name derived from a URL.
pub const MAX_SOURCE_NAME_LEN: usize = 60;

/// Extract the lowercased extension of a filename, including the dot.
///
/// A name without a dot yields the empty string, which the allow-set check
/// then rejects.
pub fn file_extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => filename[idx..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Check a declared filename against the extension allow-set.
pub fn validate_extension(filename: &str) -> Result<(), ValidationError> {
    let ext = file_extension(filename);
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedType { extension: ext })
    }
}

/// Check a spooled file's byte size against the upload limit.
pub fn validate_size(size_bytes: u64) -> Result<(), ValidationError> {
    if size_bytes > MAX_FILE_SIZE_BYTES {
        Err(ValidationError::FileTooLarge {
            size_mb: size_bytes as f64 / (1024.0 * 1024.0),
            max_mb: MAX_FILE_SIZE_MB,
        })
    } else {
        Ok(())
    }
}

/// Check that a URL is non-empty and uses an http(s) scheme.
pub fn validate_url(raw: &str) -> Result<url::Url, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    let parsed = url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrlScheme)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ValidationError::InvalidUrlScheme),
    }
}

/// Derive a short display name from a URL: the last path segment with any
/// query stripped, truncated to [`MAX_SOURCE_NAME_LEN`] characters. Falls
/// back to the (truncated) URL itself when the segment is empty.
pub fn source_name_from_url(raw: &str) -> String {
    let segment = raw
        .split('/')
        .next_back()
        .unwrap_or("")
        .split('?')
        .next()
        .unwrap_or("");
    let name = truncate_chars(segment, MAX_SOURCE_NAME_LEN);
    if name.is_empty() {
        truncate_chars(raw, MAX_SOURCE_NAME_LEN)
    } else {
        name
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
