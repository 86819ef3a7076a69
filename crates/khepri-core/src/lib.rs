//! Core types shared by the khepri crates.

use serde::{Deserialize, Serialize};

/// Side length of one drawn LED square, in surface pixels.
pub const PIXEL_SIZE: u32 = 5;

/// Gap between neighbouring LED squares, in surface pixels.
pub const PIXEL_GAP: u32 = 1;

/// Center-to-center spacing of the LED grid.
pub const GRID_STEP: u32 = PIXEL_SIZE + PIXEL_GAP;

/// Default horizontal world-scroll advanced per frame.
pub const DEFAULT_SCROLL_SPEED: f32 = 0.5;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color painted behind every LED.
pub const BACKGROUND: Rgb = Rgb::new(0x00, 0x11, 0x22);

/// Which procedural scene drives the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneMode {
    /// Endless side-scrolling desert with rotating set-pieces.
    #[default]
    SideScroller,
    /// Static pyramids and sphinx.
    Pyramids,
    /// Static pharaoh mask surrounded by hieroglyphs.
    Pharaoh,
}

impl SceneMode {
    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        match self {
            SceneMode::SideScroller => SceneMode::Pyramids,
            SceneMode::Pyramids => SceneMode::Pharaoh,
            SceneMode::Pharaoh => SceneMode::SideScroller,
        }
    }

    /// Fraction of each cell's base intensity kept as the ambient floor.
    pub fn ambient_factor(self) -> f32 {
        match self {
            SceneMode::SideScroller => 0.1,
            SceneMode::Pyramids => 0.3,
            SceneMode::Pharaoh => 0.2,
        }
    }

    /// Multiplier applied to elapsed seconds before shapes see it.
    pub fn time_scale(self) -> f32 {
        match self {
            SceneMode::SideScroller | SceneMode::Pyramids => 1.0,
            SceneMode::Pharaoh => 1.5,
        }
    }

    /// Whether this scene advances the world scroll offset.
    pub fn scrolls(self) -> bool {
        matches!(self, SceneMode::SideScroller)
    }

    /// Human readable name for status lines.
    pub fn label(self) -> &'static str {
        match self {
            SceneMode::SideScroller => "desert",
            SceneMode::Pyramids => "pyramids",
            SceneMode::Pharaoh => "pharaoh",
        }
    }
}

/// Color bands used to paint lit cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    Cyan,
    Gold,
    Emerald,
}

impl Palette {
    /// Cycle to the next palette.
    pub fn next(self) -> Self {
        match self {
            Palette::Cyan => Palette::Gold,
            Palette::Gold => Palette::Emerald,
            Palette::Emerald => Palette::Cyan,
        }
    }

    /// Band colors from dimmest to brightest.
    pub fn bands(self) -> [Rgb; 4] {
        match self {
            Palette::Cyan => [
                Rgb::new(0, 77, 77),
                Rgb::new(0, 139, 139),
                Rgb::new(0, 191, 191),
                Rgb::new(0, 255, 255),
            ],
            Palette::Gold => [
                Rgb::new(92, 64, 0),
                Rgb::new(160, 112, 0),
                Rgb::new(214, 160, 20),
                Rgb::new(255, 215, 0),
            ],
            Palette::Emerald => [
                Rgb::new(0, 77, 38),
                Rgb::new(0, 139, 69),
                Rgb::new(0, 191, 96),
                Rgb::new(80, 255, 150),
            ],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Palette::Cyan => "cyan",
            Palette::Gold => "gold",
            Palette::Emerald => "emerald",
        }
    }
}
