//! QR module rasterization on top of any [`Graphics`] backend.

use std::path::Path;

use image::imageops::FilterType;
use qrcode::{EcLevel, QrCode};

use crate::adapters::SoftwareCanvas;
use crate::color::Argb;
use crate::error::GraphicsError;
use crate::ports::Graphics;

/// Square grid of dark/light QR modules, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    dark: Vec<bool>,
}

impl ModuleMatrix {
    /// Encode `text` as a QR symbol.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::QrEncode`] if the text does not fit any symbol version.
    pub fn encode_text(text: &str, level: EcLevel) -> Result<Self, GraphicsError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), level)?;
        let dark = code.to_colors().into_iter().map(|c| c == qrcode::Color::Dark).collect();
        Ok(Self { size: code.width(), dark })
    }

    /// Build a matrix from rows of `#`/`1` (dark) and `.`/`0`/space (light).
    ///
    /// # Errors
    ///
    /// Returns an error if the rows do not form a non-empty square or contain
    /// other characters.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GraphicsError> {
        let size = rows.len();
        if size == 0 {
            return Err(GraphicsError::InvalidArgument("module matrix is empty".into()));
        }

        let mut dark = Vec::with_capacity(size * size);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != size {
                return Err(GraphicsError::InvalidArgument(format!(
                    "row {y} has {} modules, expected {size}",
                    row.chars().count()
                )));
            }
            for ch in row.chars() {
                match ch {
                    '#' | '1' => dark.push(true),
                    '.' | '0' | ' ' => dark.push(false),
                    other => {
                        return Err(GraphicsError::InvalidArgument(format!(
                            "unexpected module character '{other}' in row {y}"
                        )));
                    }
                }
            }
        }
        Ok(Self { size, dark })
    }

    /// Modules per side.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the module at column `x`, row `y` is dark. Out of range is light.
    #[must_use]
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.dark[y * self.size + x]
    }
}

/// Parse an error correction level name (`L`, `M`, `Q`, `H`).
///
/// # Errors
///
/// Returns [`GraphicsError::InvalidArgument`] for anything else.
pub fn parse_ec_level(name: &str) -> Result<EcLevel, GraphicsError> {
    match name.to_ascii_uppercase().as_str() {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        _ => Err(GraphicsError::InvalidArgument(format!(
            "Unsupported error correction level '{name}'. Valid: L, M, Q, H"
        ))),
    }
}

/// How modules are laid out and painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrStyle {
    /// Pixels per module side.
    pub module_size: u32,
    /// Quiet zone width, in modules.
    pub margin: u32,
    /// Dark module color.
    pub foreground: Argb,
    /// Light module and quiet zone color.
    pub background: Argb,
    /// Corner radius requested for dark modules. Zero paints plain squares.
    pub corner_radius: i32,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            module_size: 8,
            margin: 4,
            foreground: Argb::BLACK,
            background: Argb::WHITE,
            corner_radius: 0,
        }
    }
}

impl QrStyle {
    /// Side length in pixels of an image holding `modules` modules plus margins.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidArgument`] if the module size is zero
    /// or the image would be too large to address.
    pub fn image_size(&self, modules: usize) -> Result<u32, GraphicsError> {
        if self.module_size == 0 {
            return Err(GraphicsError::InvalidArgument("module size must be positive".into()));
        }
        u32::try_from(modules)
            .ok()
            .and_then(|m| m.checked_add(self.margin.checked_mul(2)?))
            .and_then(|m| m.checked_mul(self.module_size))
            .filter(|&px| i32::try_from(px).is_ok())
            .ok_or_else(|| GraphicsError::InvalidArgument("QR image would be too large".into()))
    }
}

/// Paint `matrix` onto a freshly created surface.
///
/// # Errors
///
/// Returns an error if the style is invalid or the backend cannot create a
/// surface of the required size.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn render_matrix<G: Graphics>(matrix: &ModuleMatrix, style: &QrStyle) -> Result<G, GraphicsError> {
    let pixels = style.image_size(matrix.size())?;
    log::debug!("rendering {0}x{0} modules into {pixels}x{pixels} px", matrix.size());

    let mut surface = G::create(pixels, pixels)?;
    surface.fill(style.background);

    // image_size() guarantees every offset below fits in i32.
    let module = style.module_size as i32;
    let margin = style.margin as i32;
    for y in 0..matrix.size() {
        for x in 0..matrix.size() {
            if !matrix.is_dark(x, y) {
                continue;
            }
            let px = (x as i32 + margin) * module;
            let py = (y as i32 + margin) * module;
            if style.corner_radius > 0 {
                surface.fill_round_rect(px, py, module, module, style.corner_radius, style.foreground);
            } else {
                surface.fill_rect(px, py, module, module, style.foreground);
            }
        }
    }
    Ok(surface)
}

/// Composite `logo` at the center of `target` on a padded background patch.
#[allow(clippy::cast_possible_wrap)]
pub fn overlay_logo<G: Graphics>(target: &mut G, logo: &G, background: Argb, padding: u32) {
    let (width, height) = (logo.width() as i32, logo.height() as i32);
    let pad = padding as i32;
    let x = (target.width() as i32 - width) / 2;
    let y = (target.height() as i32 - height) / 2;

    target.fill_rect(x - pad, y - pad, width + 2 * pad, height + 2 * pad, background);
    target.draw_image(logo, x, y);
}

/// Load an image file as a canvas no larger than `max_size` on either side.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_logo(path: &Path, max_size: u32) -> Result<SoftwareCanvas, GraphicsError> {
    let mut image = image::open(path)?;
    if image.width() > max_size || image.height() > max_size {
        image = image.resize(max_size.max(1), max_size.max(1), FilterType::Lanczos3);
    }
    log::debug!("loaded logo {} ({}x{})", path.display(), image.width(), image.height());
    SoftwareCanvas::from_image(&image)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Argb = Argb(0xFFFF_0000);

    fn checker() -> ModuleMatrix {
        ModuleMatrix::from_rows(&["#.", ".#"]).unwrap()
    }

    #[test]
    fn from_rows_reads_modules() {
        let m = checker();
        assert_eq!(m.size(), 2);
        assert!(m.is_dark(0, 0));
        assert!(!m.is_dark(1, 0));
        assert!(m.is_dark(1, 1));
        assert!(!m.is_dark(5, 5));
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        assert!(ModuleMatrix::from_rows(&[]).is_err());
        assert!(ModuleMatrix::from_rows(&["#.", "#"]).is_err());
        assert!(ModuleMatrix::from_rows(&["#x", ".."]).is_err());
    }

    #[test]
    fn encode_text_version_one() {
        let m = ModuleMatrix::encode_text("hello", EcLevel::M).unwrap();
        assert_eq!(m.size(), 21);
        // Finder pattern corners are dark.
        assert!(m.is_dark(0, 0));
        assert!(m.is_dark(20, 0));
        assert!(m.is_dark(0, 20));
    }

    #[test]
    fn ec_levels() {
        assert_eq!(parse_ec_level("l").unwrap(), EcLevel::L);
        assert_eq!(parse_ec_level("H").unwrap(), EcLevel::H);
        assert!(parse_ec_level("X").is_err());
    }

    #[test]
    fn image_size_includes_margin() {
        let style = QrStyle { module_size: 3, margin: 2, ..QrStyle::default() };
        assert_eq!(style.image_size(21).unwrap(), (21 + 4) * 3);
    }

    #[test]
    fn image_size_rejects_zero_module() {
        let style = QrStyle { module_size: 0, ..QrStyle::default() };
        assert!(style.image_size(21).is_err());
    }

    #[test]
    fn render_paints_modules_and_quiet_zone() {
        let style = QrStyle { module_size: 4, margin: 1, foreground: RED, ..QrStyle::default() };
        let canvas: SoftwareCanvas = render_matrix(&checker(), &style).unwrap();
        assert_eq!(canvas.width(), 16);
        assert_eq!(canvas.pixel(0, 0), Some(Argb::WHITE));
        assert_eq!(canvas.pixel(5, 5), Some(RED));
        assert_eq!(canvas.pixel(9, 5), Some(Argb::WHITE));
        assert_eq!(canvas.pixel(10, 10), Some(RED));
    }

    #[test]
    fn rounded_modules_match_square_modules() {
        let square = QrStyle { module_size: 5, margin: 1, ..QrStyle::default() };
        let rounded = QrStyle { corner_radius: 2, ..square };
        let a: SoftwareCanvas = render_matrix(&checker(), &square).unwrap();
        let b: SoftwareCanvas = render_matrix(&checker(), &rounded).unwrap();
        assert_eq!(a.to_image(), b.to_image());
    }

    #[test]
    fn overlay_centers_logo() {
        let mut target = SoftwareCanvas::new(20, 20).unwrap();
        target.fill(Argb::BLACK);
        let mut logo = SoftwareCanvas::new(4, 4).unwrap();
        logo.fill(RED);

        overlay_logo(&mut target, &logo, Argb::WHITE, 1);
        assert_eq!(target.pixel(8, 8), Some(RED));
        assert_eq!(target.pixel(11, 11), Some(RED));
        assert_eq!(target.pixel(7, 7), Some(Argb::WHITE));
        assert_eq!(target.pixel(12, 12), Some(Argb::WHITE));
        assert_eq!(target.pixel(6, 6), Some(Argb::BLACK));
    }
}
