//! Draw-command recording and replay.
//!
//! A [`RecordingGraphics`] wraps any backend and captures every drawing call
//! as a [`DrawCommand`]. The resulting [`DrawScript`] is stored as YAML and
//! can be replayed onto a fresh software canvas.

pub mod file;
pub mod format;
pub mod recorder;
pub mod replayer;

pub use file::{load_script, save_script};
pub use format::{DrawCommand, DrawScript};
pub use recorder::RecordingGraphics;
pub use replayer::replay;
