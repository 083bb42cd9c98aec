//! qrcanvas - rasterize QR codes through a canvas-style drawing interface.

mod cli;

use std::path::Path;
use std::process;

use clap::Parser;

use qrcanvas::adapters::SoftwareCanvas;
use qrcanvas::config::{self, Config};
use qrcanvas::error::GraphicsError;
use qrcanvas::output::{
    encode_output, resolve_output_path, sanitize_for_filename, write_output, OutputMode,
};
use qrcanvas::ports::Graphics;
use qrcanvas::render::{load_logo, overlay_logo, parse_ec_level, render_matrix, ModuleMatrix};
use qrcanvas::script::{load_script, replay, save_script, RecordingGraphics};

use crate::cli::Cli;

/// Largest logo side, as a fraction of the code's side.
const LOGO_FRACTION: u32 = 5;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    // Context calls log under the `canvas` target, outside the crate path.
    let default_filter = if verbose { "qrcanvas=debug,canvas=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: &Cli) -> Result<(), GraphicsError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(GraphicsError::Config)?;

    let format = cli.format.clone().unwrap_or_else(|| config.render.format.clone());
    let mode = if cli.data_url { OutputMode::DataUrl } else { OutputMode::Binary };

    let (surface, label) = if let Some(ref script_path) = cli.replay {
        let script = load_script(Path::new(script_path))?;
        log::info!("replaying '{}' ({} commands)", script.name, script.commands.len());
        (replay(&script)?, script.name)
    } else {
        let text = cli.resolve_text()?;
        (draw_code(cli, &config, &text)?, text)
    };

    if !surface.available_formats().contains(&format.as_str()) {
        log::warn!("format '{format}' is not reported as available; the encoder may fall back to png");
    }

    let encoded = encode_output(&surface, &format, mode)?;
    let output_path = resolve_output_path(cli.output.as_deref(), &label, &encoded.mime_type, mode);
    write_output(&encoded, &output_path)?;
    eprintln!("Saved: {}", output_path.display());

    Ok(())
}

/// Encode `text`, paint it with the configured style and optional logo, and
/// save the draw script if requested.
fn draw_code(cli: &Cli, config: &Config, text: &str) -> Result<SoftwareCanvas, GraphicsError> {
    let style = cli.style(&config.render);
    let level = parse_ec_level(
        cli.error_correction.as_deref().unwrap_or(&config.render.error_correction),
    )?;

    let matrix = ModuleMatrix::encode_text(text, level)?;
    log::debug!("encoded {} bytes into {} modules per side", text.len(), matrix.size());

    let mut surface: RecordingGraphics<SoftwareCanvas> = render_matrix(&matrix, &style)?;

    if let Some(ref logo_path) = cli.logo {
        let logo = load_logo(Path::new(logo_path), surface.width() / LOGO_FRACTION)?;
        overlay_logo(&mut surface, &RecordingGraphics::new(logo), style.background, style.module_size);
    }

    if let Some(ref record_path) = cli.record {
        let script = surface.to_script(sanitize_for_filename(text, 50));
        save_script(Path::new(record_path), &script)?;
        eprintln!("Script saved: {record_path}");
    }

    Ok(surface.into_inner())
}
