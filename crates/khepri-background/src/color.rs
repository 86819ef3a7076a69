//! Color utilities for painting LED cells.

use std::fmt;

use khepri_core::{Palette, Rgb};

/// Cells at or below this intensity are left as background.
pub const VISIBILITY_THRESHOLD: f32 = 0.02;

/// An RGB color with an alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn new(rgb: Rgb, alpha: f32) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// CSS `rgba(r, g, b, a)` form.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

/// Pick the palette band for an intensity: `< 0.3`, `< 0.6`, `< 0.8`, else.
pub fn band_for(intensity: f32, palette: Palette) -> Rgb {
    let bands = palette.bands();
    if intensity < 0.3 {
        bands[0]
    } else if intensity < 0.6 {
        bands[1]
    } else if intensity < 0.8 {
        bands[2]
    } else {
        bands[3]
    }
}

/// Map a cell intensity to its paint color, or `None` if the cell stays dark.
pub fn intensity_to_color(intensity: f32, palette: Palette) -> Option<Rgba> {
    if intensity <= VISIBILITY_THRESHOLD {
        return None;
    }
    Some(Rgba::new(band_for(intensity, palette), intensity.min(1.0)))
}
