//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the drawing core and an
//! external system. Implementations live in `src/adapters/`.

pub mod drawing_context;
pub mod graphics;

pub use drawing_context::DrawingContext;
pub use graphics::Graphics;
