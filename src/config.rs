//! Configuration file loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::color::Argb;
use crate::render::QrStyle;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default rendering parameters (used when CLI flags are absent).
    #[serde(default)]
    pub render: RenderConfig,
}

/// Default rendering parameters from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per module side.
    pub module_size: u32,
    /// Quiet zone width, in modules.
    pub margin: u32,
    /// Dark module color.
    pub foreground: Argb,
    /// Background color.
    pub background: Argb,
    /// Export format.
    pub format: String,
    /// QR error correction level (`L`, `M`, `Q`, `H`).
    pub error_correction: String,
    /// Corner radius requested for modules.
    pub corner_radius: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let style = QrStyle::default();
        Self {
            module_size: style.module_size,
            margin: style.margin,
            foreground: style.foreground,
            background: style.background,
            format: "png".to_string(),
            error_correction: "M".to_string(),
            corner_radius: style.corner_radius,
        }
    }
}

impl RenderConfig {
    /// The configured module style.
    #[must_use]
    pub fn style(&self) -> QrStyle {
        QrStyle {
            module_size: self.module_size,
            margin: self.margin,
            foreground: self.foreground,
            background: self.background,
            corner_radius: self.corner_radius,
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `QRCANVAS_CONFIG` environment variable
/// 3. `~/.config/qrcanvas/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("QRCANVAS_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/qrcanvas/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/qrcanvas/config.toml")
    } else {
        PathBuf::from("qrcanvas.toml")
    }
}
