use super::GlyphCanvas;

/// Whether a render came out blank and should be skipped.
///
/// A space legitimately draws nothing, so it is never blank. Any other
/// character is blank when no pixel reached full foreground intensity; this
/// catches codepoints a font's cmap claims but whose glyph has no ink.
pub fn is_blank(canvas: &GlyphCanvas, ch: char) -> bool {
    ch != ' ' && !canvas.has_foreground()
}
