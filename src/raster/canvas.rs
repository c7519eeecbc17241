//! Fixed-size grayscale canvas a single glyph is drawn into

use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};

use super::{GlyphMask, BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH, FOREGROUND};
use crate::errors::{Font2ImgError, Result};

/// Top-left corner that centers a `width` x `height` box on the canvas.
///
/// Uses floor division, so boxes larger than the canvas get a negative
/// origin and are clipped evenly on both sides (the extra pixel goes left/up).
pub fn centered_origin(width: u32, height: u32) -> (i32, i32) {
    let x = (CANVAS_WIDTH as i32 - width as i32).div_euclid(2);
    let y = (CANVAS_HEIGHT as i32 - height as i32).div_euclid(2);
    (x, y)
}

/// A 64x64 single-channel canvas with a black background
#[derive(Debug, Clone)]
pub struct GlyphCanvas {
    image: GrayImage,
}

impl Default for GlyphCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphCanvas {
    pub fn new() -> Self {
        Self {
            image: GrayImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Luma([BACKGROUND])),
        }
    }

    /// Draw a glyph mask centered on its bounding box, clipping what falls outside
    pub fn draw_centered(&mut self, mask: &GlyphMask) -> (i32, i32) {
        let origin = centered_origin(mask.width(), mask.height());
        if mask.is_empty() {
            return origin;
        }

        let (origin_x, origin_y) = origin;
        for off_y in 0..mask.height() {
            for off_x in 0..mask.width() {
                let x = origin_x + off_x as i32;
                let y = origin_y + off_y as i32;
                if x < 0 || y < 0 || x >= CANVAS_WIDTH as i32 || y >= CANVAS_HEIGHT as i32 {
                    continue;
                }
                let pixel = self.image.get_pixel_mut(x as u32, y as u32);
                pixel.0[0] = pixel.0[0].max(mask.get(off_x, off_y));
            }
        }
        origin
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    /// Raw pixel data, row-major
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Whether any pixel is at full foreground intensity
    pub fn has_foreground(&self) -> bool {
        self.pixels().contains(&FOREGROUND)
    }

    /// Encode the canvas as a JPEG file
    pub fn save_jpeg(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, ImageFormat::Jpeg)
            .map_err(|e| Font2ImgError::ImageEncode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}
