//! CLI argument parsing with clap.

use clap::Parser;

use qrcanvas::color::Argb;
use qrcanvas::config::RenderConfig;
use qrcanvas::render::QrStyle;

/// Rasterize text as a QR code image.
#[derive(Parser, Debug)]
#[command(name = "qrcanvas", version, about)]
pub struct Cli {
    /// Text to encode.
    #[arg(conflicts_with = "replay")]
    pub text: Option<String>,

    /// Export format (png is always available).
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pixels per module.
    #[arg(short = 's', long)]
    pub module_size: Option<u32>,

    /// Quiet zone width in modules.
    #[arg(short, long)]
    pub margin: Option<u32>,

    /// Error correction level: L, M, Q, H.
    #[arg(short, long)]
    pub error_correction: Option<String>,

    /// Dark module color (#AARRGGBB, #RRGGBB or 0xAARRGGBB).
    #[arg(long)]
    pub foreground: Option<Argb>,

    /// Background color (#AARRGGBB, #RRGGBB or 0xAARRGGBB).
    #[arg(long)]
    pub background: Option<Argb>,

    /// Corner radius for modules.
    #[arg(short = 'r', long)]
    pub corner_radius: Option<i32>,

    /// Image to composite at the center of the code.
    #[arg(long)]
    pub logo: Option<String>,

    /// Write the data URL text instead of decoded image bytes.
    #[arg(long)]
    pub data_url: bool,

    /// Record the drawing calls to a YAML script.
    #[arg(long, conflicts_with = "replay")]
    pub record: Option<String>,

    /// Replay a recorded YAML script instead of encoding text.
    #[arg(long)]
    pub replay: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The text to encode.
    ///
    /// # Errors
    ///
    /// Returns an error if no text was given.
    pub fn resolve_text(&self) -> Result<String, std::io::Error> {
        self.text.clone().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide text to encode or use --replay",
            )
        })
    }

    /// Module style from the config file, overridden by any flags given.
    #[must_use]
    pub fn style(&self, config: &RenderConfig) -> QrStyle {
        let base = config.style();
        QrStyle {
            module_size: self.module_size.unwrap_or(base.module_size),
            margin: self.margin.unwrap_or(base.margin),
            foreground: self.foreground.unwrap_or(base.foreground),
            background: self.background.unwrap_or(base.background),
            corner_radius: self.corner_radius.unwrap_or(base.corner_radius),
        }
    }
}
