//! Recording wrapper for the `Graphics` port.

use chrono::Utc;

use super::format::{DrawCommand, DrawScript};
use crate::color::Argb;
use crate::error::GraphicsError;
use crate::ports::Graphics;

/// Records drawing calls while delegating them to an inner backend.
pub struct RecordingGraphics<G> {
    inner: G,
    commands: Vec<DrawCommand>,
}

impl<G: Graphics> RecordingGraphics<G> {
    /// Wrap an existing surface. Content already on it is not recorded.
    pub fn new(inner: G) -> Self {
        Self { inner, commands: Vec::new() }
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Stop recording and return the wrapped backend.
    pub fn into_inner(self) -> G {
        self.inner
    }

    /// Snapshot the recording as a named script.
    #[must_use]
    pub fn to_script(&self, name: impl Into<String>) -> DrawScript {
        DrawScript {
            name: name.into(),
            recorded_at: Utc::now(),
            width: self.inner.width(),
            height: self.inner.height(),
            commands: self.commands.clone(),
        }
    }
}

impl<G: Graphics> Graphics for RecordingGraphics<G> {
    type Native = G::Native;

    fn create(width: u32, height: u32) -> Result<Self, GraphicsError> {
        G::create(width, height).map(Self::new)
    }

    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Argb) {
        self.inner.draw_line(x1, y1, x2, y2, color);
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2, color });
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Argb) {
        self.inner.draw_rect(x, y, width, height, color);
        self.commands.push(DrawCommand::Rect { x, y, width, height, color });
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Argb) {
        self.inner.fill_rect(x, y, width, height, color);
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color });
    }

    fn fill(&mut self, color: Argb) {
        self.inner.fill(color);
        self.commands.push(DrawCommand::Fill { color });
    }

    fn draw_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        border_radius: i32,
        color: Argb,
    ) {
        self.inner.draw_round_rect(x, y, width, height, border_radius, color);
        self.commands.push(DrawCommand::RoundRect { x, y, width, height, border_radius, color });
    }

    fn fill_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        border_radius: i32,
        color: Argb,
    ) {
        self.inner.fill_round_rect(x, y, width, height, border_radius, color);
        self.commands.push(DrawCommand::FillRoundRect {
            x,
            y,
            width,
            height,
            border_radius,
            color,
        });
    }

    // The composited surface is captured through its own get_bytes(), which
    // yields data URL text for every backend in this crate.
    fn draw_image(&mut self, other: &Self, x: i32, y: i32) {
        self.inner.draw_image(&other.inner, x, y);
        let captured = other
            .inner
            .get_bytes()
            .and_then(|bytes| {
                String::from_utf8(bytes)
                    .map_err(|e| GraphicsError::Script(format!("image is not a data URL: {e}")))
            });
        match captured {
            Ok(data_url) => self.commands.push(DrawCommand::Image { x, y, data_url }),
            Err(e) => log::warn!("draw_image at {x},{y} not recorded: {e}"),
        }
    }

    fn get_bytes_as(&self, format: &str) -> Result<Vec<u8>, GraphicsError> {
        self.inner.get_bytes_as(format)
    }

    fn available_formats(&self) -> Vec<&'static str> {
        self.inner.available_formats()
    }

    fn native_image(&self) -> &Self::Native {
        self.inner.native_image()
    }
}
