//! Lists the codepoints a font claims to support within a range.

use tracing::{debug, info, instrument};

use super::FontFile;
use crate::errors::Result;
use crate::ranges::CodepointRange;

/// Scans a font's Unicode character maps over a codepoint interval
#[derive(Debug)]
pub struct FontCodepointScanner<'a> {
    font: &'a FontFile,
}

impl<'a> FontCodepointScanner<'a> {
    pub fn new(font: &'a FontFile) -> Self {
        Self { font }
    }

    /// Codepoints in `range` present in at least one Unicode subtable, ascending
    #[instrument(level = "debug", skip(self), fields(font = %self.font.path().display()))]
    pub fn scan(&self, range: CodepointRange) -> Result<Vec<u32>> {
        let charmap = self.font.charmap()?;
        let supported: Vec<u32> = range.iter().filter(|&c| charmap.contains(c)).collect();

        info!(
            "{}: {} supported codepoints in {}",
            self.font.path().display(),
            supported.len(),
            range
        );
        debug!("Supported codepoints: {:X?}", supported);

        Ok(supported)
    }
}
