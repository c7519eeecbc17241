//! # Glyph rasterization
//!
//! Each glyph goes through three steps:
//!
//! ```text
//!   FontFile + char ──► GlyphRasterizer ──► GlyphMask (ink bbox, coverage)
//!                                               │
//!                                               ▼
//!                          GlyphCanvas (64x64, centered on the ink bbox)
//!                                               │
//!                                               ▼
//!                                 is_blank ──► skip or save as JPEG
//! ```
//!
//! [`GlyphRasterizer`] is the seam between the pipeline and the outline
//! scaler; [`SwashRasterizer`] is the production implementation.

mod blank;
mod canvas;
mod outline;
mod renderer;

use crate::errors::Result;
use crate::font::FontFile;

pub use blank::is_blank;
pub use canvas::{centered_origin, GlyphCanvas};
pub use outline::SwashRasterizer;
pub use renderer::GlyphRenderer;

/// Canvas width in pixels
pub const CANVAS_WIDTH: u32 = 64;
/// Canvas height in pixels
pub const CANVAS_HEIGHT: u32 = 64;
/// Pixel value of the empty canvas
pub const BACKGROUND: u8 = 0;
/// Pixel value of fully covered glyph ink
pub const FOREGROUND: u8 = 255;

/// Coverage bitmap of one glyph, cropped to its ink bounding box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    /// Row-major coverage, always `width * height` bytes
    coverage: Vec<u8>,
}

impl GlyphMask {
    /// A glyph without ink, such as a space
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a mask, rejecting a coverage buffer of the wrong size
    pub fn new(width: u32, height: u32, coverage: Vec<u8>) -> Option<Self> {
        (coverage.len() == (width * height) as usize).then_some(Self {
            width,
            height,
            coverage,
        })
    }

    /// Ink bounding-box width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Ink bounding-box height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at `(x, y)`, background outside the bounding box
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return BACKGROUND;
        }
        self.coverage
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(BACKGROUND)
    }
}

/// Trait for turning one character of a font into a coverage mask
pub trait GlyphRasterizer {
    /// Rasterize `ch` at `size` pixels per em
    ///
    /// A character the font does not map, or whose glyph has no outline,
    /// yields [`GlyphMask::empty`].
    fn rasterize(&mut self, font: &FontFile, size: f32, ch: char) -> Result<GlyphMask>;

    /// Name of this rasterizer
    fn name(&self) -> &'static str;
}
