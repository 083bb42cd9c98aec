//! Browser 2D context backed by an HTML `<canvas>` element.
//!
//! Only compiled for `wasm32` targets.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, CanvasRenderingContext2d, HtmlCanvasElement};

use super::callback::CallbackSlot;
use super::canvas::Canvas;
use crate::color::Rgba;
use crate::error::{GraphicsError, SurfaceError};
use crate::ports::DrawingContext;

/// A [`Canvas`] drawing onto a detached `<canvas>` element.
pub type WebCanvas = Canvas<WebContext>;

/// Canvas element plus its `CanvasRenderingContext2d`.
pub struct WebContext {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

fn host_error(call: &str, value: &JsValue) -> SurfaceError {
    SurfaceError::Host(format!("{call} failed: {value:?}"))
}

impl DrawingContext for WebContext {
    type Surface = HtmlCanvasElement;
    type Blob = Blob;

    fn acquire(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SurfaceError::Host("no document available".into()))?;

        let canvas = document
            .create_element("canvas")
            .map_err(|e| host_error("createElement", &e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::Host("created element is not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| host_error("getContext", &e))?
            .ok_or_else(|| SurfaceError::Host("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Host("context is not a CanvasRenderingContext2d".into()))?;

        Ok(Self { canvas, ctx })
    }

    fn surface(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_string());
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn draw_image(&mut self, source: &Self, dx: f64, dy: f64) {
        if let Err(e) = self.ctx.draw_image_with_html_canvas_element(&source.canvas, dx, dy) {
            log::warn!("drawImage failed: {e:?}");
        }
    }

    fn to_data_url(&self, mime_type: &str) -> Result<String, GraphicsError> {
        self.canvas
            .to_data_url_with_type(mime_type)
            .map_err(|e| GraphicsError::DataUrl(format!("toDataURL failed: {e:?}")))
    }

    fn to_blob<F>(&self, mime_type: &str, callback: F)
    where
        F: FnOnce(Option<Self::Blob>) + Send + 'static,
    {
        let slot = CallbackSlot::new(callback);
        let pending = slot.clone();
        let handler = Closure::once_into_js(move |value: JsValue| {
            pending.complete(value.dyn_into::<Blob>().ok());
        });
        if let Err(e) = self.canvas.to_blob_with_type(handler.unchecked_ref(), mime_type) {
            log::warn!("toBlob failed: {e:?}");
            slot.complete::<Blob>(None);
        }
    }
}
