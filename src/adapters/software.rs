//! In-memory 2D context backed by a tiny-skia pixmap.

use std::io::Cursor;
use std::thread;

use image::{DynamicImage, ImageFormat, RgbaImage};
use tiny_skia::{Color, ColorU8, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};

use super::canvas::Canvas;
use crate::color::{Argb, Rgba};
use crate::data_url;
use crate::error::{GraphicsError, SurfaceError};
use crate::ports::DrawingContext;

/// A [`Canvas`] drawing into memory.
pub type SoftwareCanvas = Canvas<SoftwareContext>;

/// Encoded image produced by [`SoftwareContext::to_blob`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded image bytes.
    pub data: Vec<u8>,
    /// MIME type of `data` (e.g., `"image/png"`).
    pub mime_type: String,
}

/// Software implementation of the host 2D context.
#[derive(Debug)]
pub struct SoftwareContext {
    pixmap: Pixmap,
    fill: Color,
    stroke: Color,
    path: PathBuilder,
}

impl SoftwareContext {
    fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap, fill: Color::BLACK, stroke: Color::BLACK, path: PathBuilder::new() }
    }

    fn stroke_path(&mut self, path: &tiny_skia::Path) {
        let paint = paint_for(self.stroke);
        self.pixmap.stroke_path(path, &paint, &Stroke::default(), Transform::identity(), None);
    }
}

#[allow(clippy::cast_possible_truncation)]
impl DrawingContext for SoftwareContext {
    type Surface = Pixmap;
    type Blob = EncodedImage;

    fn acquire(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Self::from_pixmap(pixmap))
    }

    fn surface(&self) -> &Pixmap {
        &self.pixmap
    }

    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.stroke = skia_color(color);
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.fill = skia_color(color);
    }

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x as f32, y as f32);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x as f32, y as f32);
    }

    fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        if let Some(path) = self.path.clone().finish() {
            self.stroke_path(&path);
        }
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        log::debug!(target: "canvas", "stroke_rect {x} {y} {width} {height}");
        let (left, top) = (x as f32, y as f32);
        let (right, bottom) = ((x + width) as f32, (y + height) as f32);

        let mut pb = PathBuilder::new();
        pb.move_to(left, top);
        pb.line_to(right, top);
        pb.line_to(right, bottom);
        pb.line_to(left, bottom);
        pb.close();
        if let Some(path) = pb.finish() {
            self.stroke_path(&path);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        log::debug!(target: "canvas", "fill_rect {x} {y} {width} {height}");
        if width == 0.0 || height == 0.0 {
            return;
        }
        let (x0, x1) = (x.min(x + width) as f32, x.max(x + width) as f32);
        let (y0, y1) = (y.min(y + height) as f32, y.max(y + height) as f32);
        if let Some(rect) = Rect::from_ltrb(x0, y0, x1, y1) {
            let paint = paint_for(self.fill);
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn draw_image(&mut self, source: &Self, dx: f64, dy: f64) {
        log::debug!(
            target: "canvas",
            "drawImage {}x{} at {dx} {dy}",
            source.pixmap.width(),
            source.pixmap.height()
        );
        self.pixmap.draw_pixmap(
            dx.round() as i32,
            dy.round() as i32,
            source.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn to_data_url(&self, mime_type: &str) -> Result<String, GraphicsError> {
        let encoded = encode_pixmap(&self.pixmap, mime_type)?;
        Ok(data_url::encode(&encoded.mime_type, &encoded.data))
    }

    fn to_blob<F>(&self, mime_type: &str, callback: F)
    where
        F: FnOnce(Option<Self::Blob>) + Send + 'static,
    {
        let pixmap = self.pixmap.clone();
        let mime_type = mime_type.to_string();
        thread::spawn(move || {
            let encoded = encode_pixmap(&pixmap, &mime_type)
                .map_err(|e| log::warn!("blob encoding failed: {e}"))
                .ok();
            callback(encoded);
        });
    }
}

impl Canvas<SoftwareContext> {
    /// Create a canvas holding a copy of `image`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::Unsupported`] if the image is empty.
    pub fn from_image(image: &DynamicImage) -> Result<Self, GraphicsError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(GraphicsError::Unsupported(SurfaceError::InvalidDimensions { width, height }))?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(Self::from_context(SoftwareContext::from_pixmap(pixmap)))
    }

    /// Create a canvas from a data URL such as one produced by
    /// [`Canvas::to_data_url`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or its payload is not a
    /// decodable image.
    pub fn from_data_url(text: &str) -> Result<Self, GraphicsError> {
        let decoded = data_url::decode(text)?;
        let image = image::load_from_memory(&decoded.data)?;
        Self::from_image(&image)
    }

    /// Read back the color at `(x, y)`, or `None` if out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        self.context().pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Argb::from_channels(c.alpha(), c.red(), c.green(), c.blue())
        })
    }

    /// Copy the surface into an unpremultiplied RGBA image.
    #[must_use]
    pub fn to_image(&self) -> RgbaImage {
        pixmap_to_image(&self.context().pixmap)
    }
}

fn skia_color(color: Rgba) -> Color {
    Color::from_rgba8(color.red, color.green, color.blue, color.alpha_u8())
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        pixmap.pixel(x, y).map_or(image::Rgba([0, 0, 0, 0]), |p| {
            let c = p.demultiply();
            image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    })
}

/// Encode `pixmap` as `mime_type`, falling back to PNG when no encoder
/// handles the requested type.
fn encode_pixmap(pixmap: &Pixmap, mime_type: &str) -> Result<EncodedImage, GraphicsError> {
    let image = DynamicImage::ImageRgba8(pixmap_to_image(pixmap));

    match ImageFormat::from_mime_type(mime_type).filter(ImageFormat::writing_enabled) {
        Some(format) => match write_image(&image, format) {
            Ok(data) => return Ok(EncodedImage { data, mime_type: mime_type.to_string() }),
            Err(image::ImageError::Unsupported(e)) => {
                log::debug!("{mime_type} encoder rejected surface ({e}), using PNG");
            }
            Err(e) => return Err(e.into()),
        },
        None => log::debug!("no encoder for {mime_type}, using PNG"),
    }

    let data = write_image(&image, ImageFormat::Png)?;
    Ok(EncodedImage { data, mime_type: "image/png".to_string() })
}

fn write_image(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut cursor = Cursor::new(Vec::new());
    if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut cursor, format)?;
    } else {
        image.write_to(&mut cursor, format)?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::ports::Graphics;

    const RED: Argb = Argb(0xFFFF_0000);
    const BLUE: Argb = Argb(0xFF00_00FF);

    #[test]
    fn acquire_rejects_zero_dimensions() {
        assert!(matches!(
            SoftwareContext::acquire(0, 10),
            Err(SurfaceError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = SoftwareCanvas::new(4, 4).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(Argb::TRANSPARENT));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn fill_rect_covers_exact_bounds() {
        let mut canvas = SoftwareCanvas::new(10, 10).unwrap();
        canvas.fill_rect(2, 3, 4, 5, RED);
        assert_eq!(canvas.pixel(2, 3), Some(RED));
        assert_eq!(canvas.pixel(5, 7), Some(RED));
        assert_eq!(canvas.pixel(1, 3), Some(Argb::TRANSPARENT));
        assert_eq!(canvas.pixel(6, 3), Some(Argb::TRANSPARENT));
        assert_eq!(canvas.pixel(2, 8), Some(Argb::TRANSPARENT));
    }

    #[test]
    fn fill_rect_normalizes_negative_extent() {
        let mut a = SoftwareCanvas::new(10, 10).unwrap();
        let mut b = SoftwareCanvas::new(10, 10).unwrap();
        a.fill_rect(2, 2, 4, 4, RED);
        b.fill_rect(6, 6, -4, -4, RED);
        assert_eq!(a.to_image(), b.to_image());
    }

    #[test]
    fn empty_fill_draws_nothing() {
        let mut canvas = SoftwareCanvas::new(4, 4).unwrap();
        canvas.fill_rect(1, 1, 0, 3, RED);
        assert!(canvas.to_image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn horizontal_line_touches_its_row() {
        let mut canvas = SoftwareCanvas::new(10, 10).unwrap();
        canvas.draw_line(0, 5, 10, 5, BLUE);
        // A one-pixel line on an integer coordinate straddles rows 4 and 5.
        assert!(canvas.pixel(5, 4).unwrap().alpha() > 0);
        assert!(canvas.pixel(5, 5).unwrap().alpha() > 0);
        assert_eq!(canvas.pixel(5, 0), Some(Argb::TRANSPARENT));
        assert_eq!(canvas.pixel(5, 9), Some(Argb::TRANSPARENT));
    }

    #[test]
    fn draw_rect_leaves_interior_untouched() {
        let mut canvas = SoftwareCanvas::new(20, 20).unwrap();
        canvas.draw_rect(2, 2, 15, 15, BLUE);
        assert!(canvas.pixel(2, 10).unwrap().alpha() > 0);
        assert_eq!(canvas.pixel(10, 10), Some(Argb::TRANSPARENT));
    }

    #[test]
    fn data_url_is_png() {
        let canvas = SoftwareCanvas::new(2, 2).unwrap();
        let url = canvas.to_data_url("png").unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let decoded = data_url::decode(&url).unwrap();
        assert_eq!(&decoded.data[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn unknown_format_falls_back_to_png() {
        let canvas = SoftwareCanvas::new(2, 2).unwrap();
        let url = canvas.to_data_url("x-nonexistent").unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn jpeg_export_drops_alpha() {
        let mut canvas = SoftwareCanvas::new(8, 8).unwrap();
        canvas.fill(Argb(0x80FF_0000));
        let url = canvas.to_data_url("jpeg").unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn data_url_round_trip_preserves_pixels() {
        let mut canvas = SoftwareCanvas::new(6, 6).unwrap();
        canvas.fill(Argb::WHITE);
        canvas.fill_rect(1, 1, 2, 2, RED);
        let url = canvas.to_data_url("png").unwrap();
        let copy = SoftwareCanvas::from_data_url(&url).unwrap();
        assert_eq!(copy.to_image(), canvas.to_image());
    }

    #[test]
    fn to_blob_delivers_png() {
        let mut canvas = SoftwareCanvas::new(3, 3).unwrap();
        canvas.fill(RED);
        let (tx, rx) = mpsc::channel();
        canvas.to_blob(move |blob| {
            tx.send(blob).unwrap();
        });
        let blob = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
        assert_eq!(blob.mime_type, "image/png");
        let image = image::load_from_memory(&blob.data).unwrap().to_rgba8();
        assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn native_image_is_the_pixmap() {
        let canvas = SoftwareCanvas::new(7, 3).unwrap();
        let pixmap: &Pixmap = canvas.native_image();
        assert_eq!((pixmap.width(), pixmap.height()), (7, 3));
    }
}
