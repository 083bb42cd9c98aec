//! Data URL encoding and decoding, plus format-to-MIME mapping.

use base64::Engine;

use crate::error::GraphicsError;

/// Map an export format identifier to a MIME type.
///
/// Identifiers are passed through unvalidated: `"png"` becomes `"image/png"`
/// and anything already containing a `/` is used verbatim.
#[must_use]
pub fn mime_type_for(format: &str) -> String {
    if format.contains('/') {
        format.to_string()
    } else {
        format!("image/{}", format.to_ascii_lowercase())
    }
}

/// Build a base64 data URL for the given payload.
#[must_use]
pub fn encode(mime_type: &str, data: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:{mime_type};base64,{payload}")
}

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Declared MIME type (e.g., `"image/png"`).
    pub mime_type: String,
    /// Decoded payload bytes.
    pub data: Vec<u8>,
}

/// Strip the `data:` prefix and base64-decode the payload.
///
/// # Errors
///
/// Returns [`GraphicsError::DataUrl`] if the text is not a base64 data URL.
pub fn decode(text: &str) -> Result<DataUrl, GraphicsError> {
    let rest = text
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| GraphicsError::DataUrl("missing 'data:' prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| GraphicsError::DataUrl("missing ',' separator".into()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| GraphicsError::DataUrl("only base64 payloads are supported".into()))?;

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| GraphicsError::DataUrl(format!("Failed to decode base64: {e}")))?;

    Ok(DataUrl { mime_type: mime_type.to_string(), data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_passthrough() {
        assert_eq!(mime_type_for("png"), "image/png");
        assert_eq!(mime_type_for("JPEG"), "image/jpeg");
        assert_eq!(mime_type_for("image/webp"), "image/webp");
        assert_eq!(mime_type_for("bogus"), "image/bogus");
    }

    #[test]
    fn encode_shape() {
        assert_eq!(encode("image/png", &[1, 2, 3]), "data:image/png;base64,AQID");
    }

    #[test]
    fn decode_payload() {
        let url = decode("data:image/png;base64,AQID").unwrap();
        assert_eq!(url.mime_type, "image/png");
        assert_eq!(url.data, vec![1, 2, 3]);
    }

    #[test]
    fn decode_rejects_malformed() {
        assert!(decode("image/png;base64,AQID").is_err());
        assert!(decode("data:image/png;base64").is_err());
        assert!(decode("data:text/plain,hello").is_err());
        assert!(decode("data:image/png;base64,@@@").is_err());
    }
}
