//! Canvas adapter: implements [`Graphics`] on top of a host [`DrawingContext`].

use crate::color::Argb;
use crate::data_url::mime_type_for;
use crate::error::GraphicsError;
use crate::ports::{DrawingContext, Graphics};

/// Formats reported by [`Canvas::available_formats`].
///
/// Only PNG is guaranteed by every host. Others may work but are not probed.
const AVAILABLE_FORMATS: &[&str] = &["png"];

/// Drawing adapter that translates [`Graphics`] calls into 2D context calls.
#[derive(Debug)]
pub struct Canvas<C: DrawingContext> {
    context: C,
}

impl<C: DrawingContext> Canvas<C> {
    /// Acquire a surface of the given size and its 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::Unsupported`] wrapping the host failure if
    /// either the surface or the context is unavailable.
    pub fn new(width: u32, height: u32) -> Result<Self, GraphicsError> {
        let context = C::acquire(width, height).map_err(|e| {
            log::warn!("failed to acquire {width}x{height} surface: {e}");
            GraphicsError::Unsupported(e)
        })?;
        log::debug!("acquired {width}x{height} canvas");
        Ok(Self { context })
    }

    pub(crate) fn from_context(context: C) -> Self {
        Self { context }
    }

    pub(crate) fn context(&self) -> &C {
        &self.context
    }

    /// Encode the surface as a data URL (e.g., `data:image/png;base64,...`).
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to encode the surface.
    pub fn to_data_url(&self, format: &str) -> Result<String, GraphicsError> {
        self.context.to_data_url(&mime_type_for(format))
    }

    /// Encode the surface as PNG asynchronously and pass the result to `callback`.
    pub fn to_blob<F>(&self, callback: F)
    where
        F: FnOnce(Option<C::Blob>) + Send + 'static,
    {
        self.context.to_blob(&mime_type_for("png"), callback);
    }
}

impl<C: DrawingContext> Graphics for Canvas<C> {
    type Native = C::Surface;

    fn create(width: u32, height: u32) -> Result<Self, GraphicsError> {
        Self::new(width, height)
    }

    fn width(&self) -> u32 {
        self.context.width()
    }

    fn height(&self) -> u32 {
        self.context.height()
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Argb) {
        self.context.set_stroke_style(color.to_rgba());
        self.context.begin_path();
        self.context.move_to(f64::from(x1), f64::from(y1));
        self.context.line_to(f64::from(x2), f64::from(y2));
        self.context.stroke();
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Argb) {
        self.context.set_stroke_style(color.to_rgba());
        self.context.stroke_rect(f64::from(x), f64::from(y), f64::from(width), f64::from(height));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Argb) {
        self.context.set_fill_style(color.to_rgba());
        self.context.fill_rect(f64::from(x), f64::from(y), f64::from(width), f64::from(height));
    }

    // Corner rounding is not implemented on this backend; the radius is ignored.
    fn draw_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        _border_radius: i32,
        color: Argb,
    ) {
        self.draw_rect(x, y, width, height, color);
    }

    fn fill_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        _border_radius: i32,
        color: Argb,
    ) {
        self.fill_rect(x, y, width, height, color);
    }

    fn draw_image(&mut self, other: &Self, x: i32, y: i32) {
        self.context.draw_image(&other.context, f64::from(x), f64::from(y));
    }

    /// Returns the UTF-8 text of the data URL, not the decoded image bytes.
    /// Use [`crate::data_url::decode`] to get the raw encoded image.
    fn get_bytes_as(&self, format: &str) -> Result<Vec<u8>, GraphicsError> {
        self.to_data_url(format).map(String::into_bytes)
    }

    fn available_formats(&self) -> Vec<&'static str> {
        AVAILABLE_FORMATS.to_vec()
    }

    fn native_image(&self) -> &Self::Native {
        self.context.surface()
    }
}
