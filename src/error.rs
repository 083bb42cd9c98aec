//! Unified error type for qrcanvas.

use thiserror::Error;

/// Result type alias using [`GraphicsError`].
pub type GraphicsResult<T> = Result<T, GraphicsError>;

/// Errors that can occur while drawing, encoding, or exporting images.
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// The host could not supply a drawing surface or its 2D context.
    #[error("Canvas seems to not be supported")]
    Unsupported(#[source] SurfaceError),

    /// Encoding or decoding pixel data failed.
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    /// A data URL could not be parsed.
    #[error("Invalid data URL: {0}")]
    DataUrl(String),

    /// A color string could not be parsed.
    #[error("Invalid color '{0}'. Expected #AARRGGBB, #RRGGBB or 0xAARRGGBB")]
    InvalidColor(String),

    /// The QR encoder rejected the input.
    #[error("QR encode error: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    /// A draw script could not be read, written, or replayed.
    #[error("Script error: {0}")]
    Script(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why the host failed to hand out a drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The requested surface is empty or too large to allocate.
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The host environment reported an error.
    #[error("Host error: {0}")]
    Host(String),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn unsupported_keeps_cause() {
        let err = GraphicsError::Unsupported(SurfaceError::InvalidDimensions { width: 0, height: 4 });
        assert_eq!(err.to_string(), "Canvas seems to not be supported");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Invalid dimensions: width=0, height=4");
    }

    #[test]
    fn invalid_color_message() {
        let err = GraphicsError::InvalidColor("#zz".into());
        assert!(err.to_string().starts_with("Invalid color '#zz'"));
    }
}
