//! qrcanvas - a small canvas-style drawing interface for rasterizing QR codes.
//!
//! [`Graphics`](ports::Graphics) is the backend-neutral drawing interface.
//! [`Canvas`](adapters::Canvas) implements it over any host 2D context:
//! an in-memory tiny-skia pixmap everywhere, or an HTML `<canvas>` on wasm32.

pub mod adapters;
pub mod color;
pub mod config;
pub mod data_url;
pub mod error;
pub mod output;
pub mod ports;
pub mod render;
pub mod script;

pub use adapters::{Canvas, SoftwareCanvas};
pub use color::{Argb, Rgba};
pub use error::{GraphicsError, GraphicsResult, SurfaceError};
pub use ports::{DrawingContext, Graphics};
