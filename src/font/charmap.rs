//! Codepoint presence across every Unicode `cmap` subtable of a font.

use read_fonts::{
    tables::cmap::{CmapSubtable, EncodingRecord, PlatformId},
    types::GlyphId,
    FontRef, ReadError, TableProvider,
};

/// Windows encodings that carry Unicode: symbol, BMP and full repertoire
const WINDOWS_UNICODE_ENCODINGS: [u16; 3] = [0, 1, 10];

/// Whether an encoding record describes a Unicode character map
pub fn is_unicode_encoding(platform: PlatformId, encoding: u16) -> bool {
    match platform {
        PlatformId::Unicode => true,
        PlatformId::Windows => WINDOWS_UNICODE_ENCODINGS.contains(&encoding),
        _ => false,
    }
}

/// The Unicode-flagged subtables of a font's `cmap`, queried as one map.
///
/// Unlike a "best subtable" lookup, a codepoint is present when any of the
/// subtables maps it to a real glyph.
pub struct UnicodeCharmap<'a> {
    subtables: Vec<CmapSubtable<'a>>,
}

impl<'a> UnicodeCharmap<'a> {
    pub fn new(font: &FontRef<'a>) -> Result<Self, ReadError> {
        let cmap = font.cmap()?;
        let data = cmap.offset_data();
        let subtables = cmap
            .encoding_records()
            .iter()
            .filter(|rec| is_unicode_record(rec))
            .map(|rec| rec.subtable(data))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { subtables })
    }

    /// Number of Unicode subtables consulted by [`Self::contains`]
    pub fn subtable_count(&self) -> usize {
        self.subtables.len()
    }

    /// Whether any Unicode subtable maps `codepoint` to a glyph other than `.notdef`
    pub fn contains(&self, codepoint: u32) -> bool {
        self.glyph_id(codepoint).is_some()
    }

    /// First non-`.notdef` glyph any Unicode subtable maps `codepoint` to
    pub fn glyph_id(&self, codepoint: u32) -> Option<GlyphId> {
        self.subtables
            .iter()
            .filter_map(|subtable| map_codepoint(subtable, codepoint))
            .find(|gid| gid.to_u32() != 0)
    }
}

impl std::fmt::Debug for UnicodeCharmap<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnicodeCharmap")
            .field("subtables", &self.subtables.len())
            .finish()
    }
}

fn is_unicode_record(rec: &EncodingRecord) -> bool {
    is_unicode_encoding(rec.platform_id(), rec.encoding_id())
}

fn map_codepoint(subtable: &CmapSubtable<'_>, c: u32) -> Option<GlyphId> {
    match subtable {
        CmapSubtable::Format0(table) => table.map_codepoint(c),
        CmapSubtable::Format4(table) => table.map_codepoint(c),
        CmapSubtable::Format6(table) => table.map_codepoint(c),
        CmapSubtable::Format10(table) => {
            let index = c.checked_sub(table.start_char_code())?;
            table
                .glyph_id_array()
                .get(index as usize)
                .map(|gid| GlyphId::from(gid.get()))
        }
        CmapSubtable::Format12(table) => table.map_codepoint(c),
        CmapSubtable::Format13(table) => table.map_codepoint(c),
        // Format 2 is a CJK multi-byte encoding and format 14 only holds
        // variation sequences
        _ => None,
    }
}
