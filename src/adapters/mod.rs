//! Adapter implementations for port traits.
//!
//! - `callback` — one-shot completion shared with host handlers
//! - `canvas` — `Graphics` on top of any `DrawingContext`
//! - `software` — tiny-skia pixmap host
//! - `web` — browser `<canvas>` host (wasm32 only)

mod callback;
pub mod canvas;
pub mod software;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use canvas::Canvas;
pub use software::{EncodedImage, SoftwareCanvas, SoftwareContext};
#[cfg(target_arch = "wasm32")]
pub use web::{WebCanvas, WebContext};
