//! File naming and writing exported images.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::data_url;
use crate::error::GraphicsError;
use crate::ports::Graphics;

/// What gets written to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The decoded image bytes.
    Binary,
    /// The data URL text exactly as `get_bytes` returns it.
    DataUrl,
}

/// File extension for an export format and output mode.
#[must_use]
pub fn format_extension(format: &str, mode: OutputMode) -> &str {
    if mode == OutputMode::DataUrl {
        return "txt";
    }
    match format {
        "jpeg" | "jpg" | "image/jpeg" => "jpg",
        "png" | "image/png" => "png",
        "webp" | "image/webp" => "webp",
        other => other.rsplit('/').next().unwrap_or(other),
    }
}

/// Generate an output filename from the encoded text.
///
/// Sanitizes the first 50 characters of the text to kebab-case, appends a
/// unix timestamp, and adds the appropriate file extension.
#[must_use]
pub fn auto_filename(text: &str, format: &str, mode: OutputMode) -> String {
    let sanitized = sanitize_for_filename(text, 50);
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let ext = format_extension(format, mode);
    format!("{sanitized}-{timestamp}.{ext}")
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars().take(max_len * 2) {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "qrcode".to_string()
    } else {
        result
    }
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(
    explicit: Option<&str>,
    text: &str,
    format: &str,
    mode: OutputMode,
) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(auto_filename(text, format, mode)),
    }
}

/// An exported image ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOutput {
    /// MIME type the host actually produced, which may differ from the
    /// requested format when the host fell back to PNG.
    pub mime_type: String,
    /// Bytes to write: decoded image data or data URL text.
    pub payload: Vec<u8>,
}

/// Encode `surface` as `format` for the given output mode.
///
/// # Errors
///
/// Returns an error if encoding fails or the data URL cannot be decoded.
pub fn encode_output<G: Graphics>(
    surface: &G,
    format: &str,
    mode: OutputMode,
) -> Result<EncodedOutput, GraphicsError> {
    let bytes = surface.get_bytes_as(format)?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|e| GraphicsError::DataUrl(format!("not UTF-8 text: {e}")))?;
    let decoded = data_url::decode(text)?;
    log::debug!("decoded {} bytes of {}", decoded.data.len(), decoded.mime_type);

    let payload = match mode {
        OutputMode::DataUrl => bytes,
        OutputMode::Binary => decoded.data,
    };
    Ok(EncodedOutput { mime_type: decoded.mime_type, payload })
}

/// Write an encoded export to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_output(encoded: &EncodedOutput, path: &Path) -> Result<(), GraphicsError> {
    std::fs::write(path, &encoded.payload)?;
    Ok(())
}
