//! Host-provided 2D drawing context.
//!
//! Models the subset of the HTML canvas 2D API that [`Canvas`] needs, so the
//! same adapter can drive a browser canvas or an in-memory pixmap.
//!
//! [`Canvas`]: crate::adapters::canvas::Canvas

use crate::color::Rgba;
use crate::error::{GraphicsError, SurfaceError};

/// A stateful handle for issuing drawing commands against one surface.
///
/// Line width is fixed at one pixel.
pub trait DrawingContext: Sized {
    /// The drawing surface this context paints on.
    type Surface;
    /// Result of an asynchronous blob export.
    type Blob;

    /// Acquire a surface of the given size together with its 2D context.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] if the host cannot supply either.
    fn acquire(width: u32, height: u32) -> Result<Self, SurfaceError>;

    /// The surface being drawn on.
    fn surface(&self) -> &Self::Surface;

    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Set the color used by [`stroke`](Self::stroke) and [`stroke_rect`](Self::stroke_rect).
    fn set_stroke_style(&mut self, color: Rgba);

    /// Set the color used by [`fill_rect`](Self::fill_rect).
    fn set_fill_style(&mut self, color: Rgba);

    /// Discard the current path.
    fn begin_path(&mut self);

    /// Start a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the current subpath to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Stroke the current path. The path is kept.
    fn stroke(&mut self);

    /// Stroke a rectangle outline without touching the current path.
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill a rectangle without touching the current path.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Composite another context's surface at `(dx, dy)`.
    fn draw_image(&mut self, source: &Self, dx: f64, dy: f64);

    /// Encode the surface as a data URL of the requested MIME type.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to encode the surface.
    fn to_data_url(&self, mime_type: &str) -> Result<String, GraphicsError>;

    /// Encode the surface off the current call and hand the result to `callback`.
    ///
    /// The callback receives `None` if encoding failed.
    fn to_blob<F>(&self, mime_type: &str, callback: F)
    where
        F: FnOnce(Option<Self::Blob>) + Send + 'static;
}
