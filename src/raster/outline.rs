//! Outline rasterization with Swash

use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::FontRef;
use tracing::trace;

use super::{GlyphMask, GlyphRasterizer};
use crate::errors::{Font2ImgError, Result};
use crate::font::FontFile;

/// Rasterizer backed by a reusable Swash scale context
pub struct SwashRasterizer {
    context: ScaleContext,
    hint: bool,
}

impl std::fmt::Debug for SwashRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwashRasterizer")
            .field("hint", &self.hint)
            .finish_non_exhaustive()
    }
}

impl Default for SwashRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SwashRasterizer {
    pub fn new() -> Self {
        Self {
            context: ScaleContext::new(),
            hint: true,
        }
    }

    /// Toggle TrueType hinting (on by default)
    pub fn with_hinting(mut self, hint: bool) -> Self {
        self.hint = hint;
        self
    }
}

impl GlyphRasterizer for SwashRasterizer {
    fn rasterize(&mut self, font: &FontFile, size: f32, ch: char) -> Result<GlyphMask> {
        // Resolve through the same Unicode subtables the scanner used
        let Some(glyph_id) = font.charmap()?.glyph_id(u32::from(ch)) else {
            return Ok(GlyphMask::empty());
        };
        let Ok(glyph_id) = u16::try_from(glyph_id.to_u32()) else {
            return Ok(GlyphMask::empty());
        };

        let font_ref =
            FontRef::from_index(font.data(), 0).ok_or_else(|| Font2ImgError::FontLoad {
                path: font.path().to_path_buf(),
                message: "Swash could not parse the font".to_string(),
            })?;

        let mut scaler = self
            .context
            .builder(font_ref)
            .size(size)
            .hint(self.hint)
            .build();

        let rendered = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ])
        .format(Format::Alpha)
        .render(&mut scaler, glyph_id);

        let Some(image) = rendered else {
            trace!("No image for {:?} (glyph {})", ch, glyph_id);
            return Ok(GlyphMask::empty());
        };

        Ok(to_mask(&image))
    }

    fn name(&self) -> &'static str {
        "swash"
    }
}

/// Reduce a Swash image to single-channel coverage
fn to_mask(image: &Image) -> GlyphMask {
    let width = image.placement.width;
    let height = image.placement.height;
    let coverage = match image.content {
        Content::Mask => image.data.clone(),
        Content::SubpixelMask | Content::Color => {
            image.data.chunks_exact(4).map(|px| px[3]).collect()
        }
    };
    GlyphMask::new(width, height, coverage).unwrap_or_default()
}
