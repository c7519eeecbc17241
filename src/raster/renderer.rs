use tracing::trace;

use super::{GlyphCanvas, GlyphRasterizer};
use crate::errors::Result;
use crate::font::FontFile;

/// Renders single characters onto fresh, centered canvases
#[derive(Debug)]
pub struct GlyphRenderer<R> {
    rasterizer: R,
    font_size: f32,
}

impl<R: GlyphRasterizer> GlyphRenderer<R> {
    pub fn new(rasterizer: R, font_size: f32) -> Self {
        Self {
            rasterizer,
            font_size,
        }
    }

    /// Render `ch` centered on its ink bounding box
    pub fn render(&mut self, font: &FontFile, ch: char) -> Result<GlyphCanvas> {
        let mask = self.rasterizer.rasterize(font, self.font_size, ch)?;
        let mut canvas = GlyphCanvas::new();
        let origin = canvas.draw_centered(&mask);
        trace!(
            "{} drew {:?} ({}x{}) at {:?}",
            self.rasterizer.name(),
            ch,
            mask.width(),
            mask.height(),
            origin
        );
        Ok(canvas)
    }
}
