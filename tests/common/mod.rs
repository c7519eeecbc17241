//! Shared helpers: in-memory fonts (cmap-only ones for scanning, and a small
//! TrueType font with a square outline for real rasterization) and a
//! deterministic rasterizer standing in for Swash.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use font2img::font::FontFile;
use font2img::raster::{GlyphMask, GlyphRasterizer};
use font2img::Result;

pub const PLATFORM_UNICODE: u16 = 0;
pub const PLATFORM_MAC: u16 = 1;
pub const PLATFORM_WINDOWS: u16 = 3;

/// One cmap subtable
#[derive(Debug, Clone)]
pub enum Subtable {
    /// Byte encoding table: `(code, glyph)` pairs
    Format0(Vec<(u8, u8)>),
    /// One BMP segment `start..=end` mapped to consecutive glyphs
    Format4 { start: u16, end: u16, first_glyph: u16 },
    /// Trimmed array: `glyphs[i]` is the glyph of `start + i`
    Format10 { start: u32, glyphs: Vec<u16> },
    /// One group `start..=end` mapped to consecutive glyphs
    Format12 { start: u32, end: u32, first_glyph: u32 },
}

impl Subtable {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Subtable::Format0(pairs) => {
                let mut glyphs = [0u8; 256];
                for &(code, glyph) in pairs {
                    glyphs[code as usize] = glyph;
                }
                push_u16(&mut out, 0);
                push_u16(&mut out, 262);
                push_u16(&mut out, 0);
                out.extend_from_slice(&glyphs);
            }
            Subtable::Format4 {
                start,
                end,
                first_glyph,
            } => {
                // The final 0xFFFF segment is mandatory and maps to .notdef
                let seg_count: u16 = 2;
                push_u16(&mut out, 4);
                push_u16(&mut out, 16 + 8 * seg_count);
                push_u16(&mut out, 0);
                push_u16(&mut out, seg_count * 2);
                push_u16(&mut out, 4);
                push_u16(&mut out, 1);
                push_u16(&mut out, 0);
                push_u16(&mut out, *end);
                push_u16(&mut out, 0xFFFF);
                push_u16(&mut out, 0);
                push_u16(&mut out, *start);
                push_u16(&mut out, 0xFFFF);
                push_u16(&mut out, first_glyph.wrapping_sub(*start));
                push_u16(&mut out, 1);
                push_u16(&mut out, 0);
                push_u16(&mut out, 0);
            }
            Subtable::Format10 { start, glyphs } => {
                push_u16(&mut out, 10);
                push_u16(&mut out, 0);
                push_u32(&mut out, 20 + 2 * glyphs.len() as u32);
                push_u32(&mut out, 0);
                push_u32(&mut out, *start);
                push_u32(&mut out, glyphs.len() as u32);
                for &glyph in glyphs {
                    push_u16(&mut out, glyph);
                }
            }
            Subtable::Format12 {
                start,
                end,
                first_glyph,
            } => {
                push_u16(&mut out, 12);
                push_u16(&mut out, 0);
                push_u32(&mut out, 16 + 12);
                push_u32(&mut out, 0);
                push_u32(&mut out, 1);
                push_u32(&mut out, *start);
                push_u32(&mut out, *end);
                push_u32(&mut out, *first_glyph);
            }
        }
        out
    }
}

/// Builds a minimal sfnt whose only table is `cmap`
#[derive(Debug, Default)]
pub struct CmapFontBuilder {
    subtables: Vec<(u16, u16, Subtable)>,
}

impl CmapFontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subtable(mut self, platform: u16, encoding: u16, subtable: Subtable) -> Self {
        self.subtables.push((platform, encoding, subtable));
        self
    }

    /// Windows BMP subtable mapping `start..=end`
    pub fn bmp(self, start: u16, end: u16) -> Self {
        self.subtable(
            PLATFORM_WINDOWS,
            1,
            Subtable::Format4 {
                start,
                end,
                first_glyph: 1,
            },
        )
    }

    pub fn build(&self) -> Vec<u8> {
        sfnt(&[(*b"cmap", self.cmap_table())])
    }

    fn cmap_table(&self) -> Vec<u8> {
        let mut cmap = Vec::new();
        push_u16(&mut cmap, 0);
        push_u16(&mut cmap, self.subtables.len() as u16);

        let mut offset = 4 + 8 * self.subtables.len() as u32;
        let mut bodies = Vec::new();
        for (platform, encoding, subtable) in &self.subtables {
            let body = subtable.encode();
            push_u16(&mut cmap, *platform);
            push_u16(&mut cmap, *encoding);
            push_u32(&mut cmap, offset);
            offset += body.len() as u32;
            bodies.push(body);
        }
        for body in bodies {
            cmap.extend_from_slice(&body);
        }
        cmap
    }

    pub fn font_file(&self, name: &str) -> FontFile {
        FontFile::from_bytes(name, self.build()).expect("test font should parse")
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.build()).expect("failed to write test font");
        path
    }
}

/// Units per em of [`square_font`]
pub const SQUARE_UNITS_PER_EM: u16 = 2048;
/// Glyph of 'A' in [`square_font`]: a filled square
pub const SQUARE_GLYPH: u16 = 1;
/// Glyph of ' ' in [`square_font`]: no contours
pub const SPACE_GLYPH: u16 = 2;

/// Square outline corners in font units, clockwise from the bottom left.
/// At 48 ppem every corner lands on a whole pixel: a 24x24 px square.
const SQUARE_POINTS: [(i16, i16); 4] = [(128, 0), (128, 1024), (1152, 1024), (1152, 0)];

/// A TrueType font mapping 'A' to a solid square and ' ' to an empty glyph
pub fn square_font() -> Vec<u8> {
    let cmap = CmapFontBuilder::new()
        .subtable(
            PLATFORM_WINDOWS,
            1,
            Subtable::Format4 {
                start: 0x41,
                end: 0x41,
                first_glyph: SQUARE_GLYPH,
            },
        )
        .subtable(
            PLATFORM_UNICODE,
            3,
            Subtable::Format4 {
                start: 0x20,
                end: 0x20,
                first_glyph: SPACE_GLYPH,
            },
        )
        .cmap_table();

    let square = square_glyph();
    let square_len = square.len() as u16;

    // Short loca: offsets / 2. Glyphs 0 (.notdef) and 2 (space) are empty.
    let mut loca = Vec::new();
    for offset in [0, 0, square_len / 2, square_len / 2] {
        push_u16(&mut loca, offset);
    }

    let mut hmtx = Vec::new();
    for (advance, lsb) in [(1280u16, 0i16), (1280, 128), (512, 0)] {
        push_u16(&mut hmtx, advance);
        push_i16(&mut hmtx, lsb);
    }

    sfnt(&[
        (*b"cmap", cmap),
        (*b"glyf", square),
        (*b"head", head_table()),
        (*b"hhea", hhea_table(3)),
        (*b"hmtx", hmtx),
        (*b"loca", loca),
        (*b"maxp", maxp_table(3)),
    ])
}

/// [`square_font`] as a loaded font
pub fn square_font_file(name: &str) -> FontFile {
    FontFile::from_bytes(name, square_font()).expect("square font should parse")
}

fn square_glyph() -> Vec<u8> {
    let mut glyph = Vec::new();
    push_i16(&mut glyph, 1);
    push_i16(&mut glyph, SQUARE_POINTS[0].0);
    push_i16(&mut glyph, SQUARE_POINTS[0].1);
    push_i16(&mut glyph, SQUARE_POINTS[2].0);
    push_i16(&mut glyph, SQUARE_POINTS[2].1);
    push_u16(&mut glyph, SQUARE_POINTS.len() as u16 - 1);
    push_u16(&mut glyph, 0);
    // On-curve points with plain 16-bit deltas
    glyph.extend_from_slice(&[0x01; SQUARE_POINTS.len()]);
    let mut previous = (0, 0);
    let mut ys = Vec::new();
    for &(x, y) in &SQUARE_POINTS {
        push_i16(&mut glyph, x - previous.0);
        push_i16(&mut ys, y - previous.1);
        previous = (x, y);
    }
    glyph.extend_from_slice(&ys);
    glyph
}

fn head_table() -> Vec<u8> {
    let mut head = Vec::new();
    push_u32(&mut head, 0x0001_0000);
    push_u32(&mut head, 0x0001_0000);
    push_u32(&mut head, 0);
    push_u32(&mut head, 0x5F0F_3CF5);
    push_u16(&mut head, 0x0003);
    push_u16(&mut head, SQUARE_UNITS_PER_EM);
    head.extend_from_slice(&[0; 16]);
    push_i16(&mut head, SQUARE_POINTS[0].0);
    push_i16(&mut head, SQUARE_POINTS[0].1);
    push_i16(&mut head, SQUARE_POINTS[2].0);
    push_i16(&mut head, SQUARE_POINTS[2].1);
    push_u16(&mut head, 0);
    push_u16(&mut head, 8);
    push_i16(&mut head, 2);
    // indexToLocFormat: short offsets
    push_i16(&mut head, 0);
    push_i16(&mut head, 0);
    head
}

fn hhea_table(metrics: u16) -> Vec<u8> {
    let mut hhea = Vec::new();
    push_u32(&mut hhea, 0x0001_0000);
    push_i16(&mut hhea, 1638);
    push_i16(&mut hhea, -410);
    push_i16(&mut hhea, 0);
    push_u16(&mut hhea, 1280);
    push_i16(&mut hhea, 0);
    push_i16(&mut hhea, 0);
    push_i16(&mut hhea, SQUARE_POINTS[2].0);
    push_i16(&mut hhea, 1);
    push_i16(&mut hhea, 0);
    push_i16(&mut hhea, 0);
    hhea.extend_from_slice(&[0; 8]);
    push_i16(&mut hhea, 0);
    push_u16(&mut hhea, metrics);
    hhea
}

fn maxp_table(num_glyphs: u16) -> Vec<u8> {
    let mut maxp = Vec::new();
    push_u32(&mut maxp, 0x0001_0000);
    push_u16(&mut maxp, num_glyphs);
    push_u16(&mut maxp, SQUARE_POINTS.len() as u16);
    push_u16(&mut maxp, 1);
    push_u16(&mut maxp, 0);
    push_u16(&mut maxp, 0);
    push_u16(&mut maxp, 2);
    maxp.extend_from_slice(&[0; 16]);
    maxp
}

/// Assemble an sfnt from tables given in tag order
fn sfnt(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = 16 << entry_selector;

    let mut font = Vec::new();
    push_u32(&mut font, 0x0001_0000);
    push_u16(&mut font, num_tables);
    push_u16(&mut font, search_range);
    push_u16(&mut font, entry_selector);
    push_u16(&mut font, num_tables * 16 - search_range);

    let directory_len = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in tables {
        font.extend_from_slice(tag);
        push_u32(&mut font, 0);
        push_u32(&mut font, (directory_len + body.len()) as u32);
        push_u32(&mut font, data.len() as u32);
        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
    }
    font.extend_from_slice(&body);
    font
}

fn push_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Rasterizer producing fixed boxes: solid ink for ordinary characters,
/// faint ink for characters listed as blank, nothing for a space
#[derive(Debug, Default)]
pub struct StubRasterizer {
    pub blank: Vec<char>,
    pub calls: Vec<char>,
}

impl StubRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blank(blank: &[char]) -> Self {
        Self {
            blank: blank.to_vec(),
            calls: Vec::new(),
        }
    }
}

impl GlyphRasterizer for StubRasterizer {
    fn rasterize(&mut self, _font: &FontFile, _size: f32, ch: char) -> Result<GlyphMask> {
        self.calls.push(ch);
        if ch == ' ' {
            return Ok(GlyphMask::empty());
        }
        let ink = if self.blank.contains(&ch) { 120 } else { 255 };
        Ok(GlyphMask::new(20, 30, vec![ink; 600]).expect("mask size"))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Manifest lines of a finished run
pub fn manifest_lines(output_dir: &Path) -> Vec<String> {
    fs::read_to_string(output_dir.join("test-labels-map.csv"))
        .expect("manifest should exist")
        .lines()
        .map(str::to_string)
        .collect()
}
