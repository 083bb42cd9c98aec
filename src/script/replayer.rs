//! Replays draw scripts onto a software canvas.

use super::format::{DrawCommand, DrawScript};
use crate::adapters::SoftwareCanvas;
use crate::error::GraphicsError;
use crate::ports::Graphics;

/// Execute every command of `script` on a new canvas of the recorded size.
///
/// # Errors
///
/// Returns an error if the canvas cannot be created or an `image` command
/// carries an undecodable data URL.
pub fn replay(script: &DrawScript) -> Result<SoftwareCanvas, GraphicsError> {
    let mut canvas = SoftwareCanvas::new(script.width, script.height)?;
    for (seq, command) in script.commands.iter().enumerate() {
        apply(&mut canvas, command)
            .map_err(|e| GraphicsError::Script(format!("command {seq} of '{}': {e}", script.name)))?;
    }
    log::debug!("replayed {} commands from '{}'", script.commands.len(), script.name);
    Ok(canvas)
}

/// Execute a single command.
///
/// # Errors
///
/// Returns an error only for `image` commands whose payload cannot be decoded.
pub fn apply(canvas: &mut SoftwareCanvas, command: &DrawCommand) -> Result<(), GraphicsError> {
    match *command {
        DrawCommand::Line { x1, y1, x2, y2, color } => canvas.draw_line(x1, y1, x2, y2, color),
        DrawCommand::Rect { x, y, width, height, color } => {
            canvas.draw_rect(x, y, width, height, color);
        }
        DrawCommand::FillRect { x, y, width, height, color } => {
            canvas.fill_rect(x, y, width, height, color);
        }
        DrawCommand::Fill { color } => canvas.fill(color),
        DrawCommand::RoundRect { x, y, width, height, border_radius, color } => {
            canvas.draw_round_rect(x, y, width, height, border_radius, color);
        }
        DrawCommand::FillRoundRect { x, y, width, height, border_radius, color } => {
            canvas.fill_round_rect(x, y, width, height, border_radius, color);
        }
        DrawCommand::Image { x, y, ref data_url } => {
            let image = SoftwareCanvas::from_data_url(data_url)?;
            canvas.draw_image(&image, x, y);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::color::Argb;
    use crate::render::{overlay_logo, render_matrix, ModuleMatrix, QrStyle};
    use crate::script::RecordingGraphics;

    #[test]
    fn replay_reproduces_recorded_pixels() {
        let matrix = ModuleMatrix::from_rows(&["#..", ".#.", "..#"]).unwrap();
        let style = QrStyle { module_size: 4, margin: 1, ..QrStyle::default() };
        let mut recorded: RecordingGraphics<SoftwareCanvas> = render_matrix(&matrix, &style).unwrap();

        let mut logo = SoftwareCanvas::new(3, 3).unwrap();
        logo.fill(Argb(0xFF00_FF00));
        overlay_logo(&mut recorded, &RecordingGraphics::new(logo), Argb::WHITE, 1);
        recorded.draw_line(0, 0, 19, 19, Argb(0x80FF_0000));

        let script = recorded.to_script("round-trip");
        let replayed = replay(&script).unwrap();
        assert_eq!(replayed.to_image(), recorded.inner().to_image());
    }

    #[test]
    fn bad_image_payload_names_the_command() {
        let script = DrawScript {
            name: "broken".into(),
            recorded_at: Utc::now(),
            width: 4,
            height: 4,
            commands: vec![
                DrawCommand::Fill { color: Argb::WHITE },
                DrawCommand::Image { x: 0, y: 0, data_url: "data:image/png;base64,AAAA".into() },
            ],
        };
        let err = replay(&script).unwrap_err().to_string();
        assert!(err.contains("command 1 of 'broken'"), "{err}");
    }

    #[test]
    fn zero_sized_script_is_unsupported() {
        let script = DrawScript {
            name: "empty".into(),
            recorded_at: Utc::now(),
            width: 0,
            height: 0,
            commands: vec![],
        };
        assert!(matches!(replay(&script), Err(GraphicsError::Unsupported(_))));
    }
}
