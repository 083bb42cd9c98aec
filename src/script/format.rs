//! Serialized form of a draw script.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::Argb;

/// A recorded sequence of drawing calls against one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawScript {
    /// Human-readable script name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Drawing calls in the order they were issued.
    pub commands: Vec<DrawCommand>,
}

/// One drawing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DrawCommand {
    Line { x1: i32, y1: i32, x2: i32, y2: i32, color: Argb },
    Rect { x: i32, y: i32, width: i32, height: i32, color: Argb },
    FillRect { x: i32, y: i32, width: i32, height: i32, color: Argb },
    Fill { color: Argb },
    RoundRect { x: i32, y: i32, width: i32, height: i32, border_radius: i32, color: Argb },
    FillRoundRect { x: i32, y: i32, width: i32, height: i32, border_radius: i32, color: Argb },
    /// Composite of another surface, captured as its data URL.
    Image { x: i32, y: i32, data_url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_tagged() {
        let yaml = serde_yaml::to_string(&DrawCommand::Fill { color: Argb::WHITE }).unwrap();
        assert!(yaml.contains("op: fill"));
        assert!(yaml.contains("#FFFFFFFF"));
    }

    #[test]
    fn parse_hand_written_script() {
        let yaml = r##"
name: hand-written
recorded_at: 2026-01-02T03:04:05Z
width: 4
height: 4
commands:
  - op: fill
    color: "#FFFFFFFF"
  - op: fill_round_rect
    x: 1
    y: 1
    width: 2
    height: 2
    border_radius: 1
    color: "#336699"
"##;
        let script: DrawScript = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(script.commands.len(), 2);
        assert_eq!(
            script.commands[1],
            DrawCommand::FillRoundRect {
                x: 1,
                y: 1,
                width: 2,
                height: 2,
                border_radius: 1,
                color: Argb(0xFF33_6699),
            }
        );
    }

    #[test]
    fn bad_color_is_rejected() {
        let yaml = "op: fill\ncolor: red\n";
        assert!(serde_yaml::from_str::<DrawCommand>(yaml).is_err());
    }
}
