//! The backend-neutral drawing interface used to rasterize QR modules.

use crate::color::Argb;
use crate::error::GraphicsError;

/// A drawing surface that accepts primitive drawing commands and can be
/// encoded into an image.
///
/// Coordinates and extents are in pixels. Colors are packed `0xAARRGGBB`.
pub trait Graphics {
    /// Handle to the backend's underlying surface.
    type Native;

    /// Acquire a new surface of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::Unsupported`] if the backend cannot supply
    /// a surface.
    fn create(width: u32, height: u32) -> Result<Self, GraphicsError>
    where
        Self: Sized;

    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Stroke a straight segment from `(x1, y1)` to `(x2, y2)`.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Argb);

    /// Stroke the outline of an axis-aligned rectangle.
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Argb);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Argb);

    /// Fill the entire surface.
    #[allow(clippy::cast_possible_wrap)]
    fn fill(&mut self, color: Argb) {
        let (width, height) = (self.width() as i32, self.height() as i32);
        self.fill_rect(0, 0, width, height, color);
    }

    /// Stroke the outline of a rectangle with rounded corners.
    ///
    /// Backends may ignore `border_radius`.
    #[allow(clippy::too_many_arguments)]
    fn draw_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        border_radius: i32,
        color: Argb,
    );

    /// Fill a rectangle with rounded corners.
    ///
    /// Backends may ignore `border_radius`.
    #[allow(clippy::too_many_arguments)]
    fn fill_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        border_radius: i32,
        color: Argb,
    );

    /// Composite `other` onto this surface with its top-left corner at `(x, y)`.
    fn draw_image(&mut self, other: &Self, x: i32, y: i32);

    /// Encode the surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to encode the surface.
    fn get_bytes(&self) -> Result<Vec<u8>, GraphicsError> {
        self.get_bytes_as("png")
    }

    /// Encode the surface in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to encode the surface.
    fn get_bytes_as(&self, format: &str) -> Result<Vec<u8>, GraphicsError>;

    /// Formats this backend reports as supported.
    fn available_formats(&self) -> Vec<&'static str>;

    /// The backend's underlying surface.
    fn native_image(&self) -> &Self::Native;
}
