//! Per-language Unicode range table
//!
//! The table is a JSON object mapping a language code to an ordered list of
//! `[start_hex, end_hex]` pairs, e.g. `{"kr": [["AC00", "D7A4"]]}`. Bounds are
//! half-open: `end` itself is never scanned.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Font2ImgError, Result};

/// One past the highest Unicode scalar value
pub const CODEPOINT_LIMIT: u32 = 0x11_0000;

/// Half-open interval of codepoints `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

impl CodepointRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Every codepoint the plain `render` pipeline scans
    pub fn full() -> Self {
        Self::new(0, 0x10_FFFF)
    }

    /// The interval with `end` clamped to the Unicode codespace
    pub fn iter(&self) -> std::ops::Range<u32> {
        self.start..self.end.min(CODEPOINT_LIMIT)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().is_empty()
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}..U+{:04X}", self.start, self.end)
    }
}

/// Language code to hexadecimal range pairs, as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTable {
    languages: BTreeMap<String, Vec<(String, String)>>,
}

impl RangeTable {
    /// Load the table from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| Font2ImgError::file_access(path, &e))?;
        let table = Self::from_json(&content)?;
        debug!(
            "Loaded {} languages from {}",
            table.languages.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse the table from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Language codes in the table, sorted
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Resolve a language to its ranges, in stored order
    ///
    /// Fails with [`Font2ImgError::UnknownLanguage`] when the language is not
    /// in the table; no fallback range is substituted.
    pub fn resolve(&self, language: &str) -> Result<Vec<CodepointRange>> {
        let pairs = self
            .languages
            .get(language)
            .ok_or_else(|| Font2ImgError::UnknownLanguage {
                language: language.to_string(),
                available: self.languages().collect::<Vec<_>>().join(", "),
            })?;

        pairs
            .iter()
            .map(|(start, end)| {
                Ok(CodepointRange::new(
                    parse_hex(language, start)?,
                    parse_hex(language, end)?,
                ))
            })
            .collect()
    }
}

fn parse_hex(language: &str, value: &str) -> Result<u32> {
    let digits = value
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|_| Font2ImgError::InvalidCodepoint {
        language: language.to_string(),
        value: value.to_string(),
    })
}
