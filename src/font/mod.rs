//! Font discovery, loading and codepoint coverage

pub mod charmap;
pub mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use read_fonts::{FontRef, TableProvider};
use tracing::{debug, warn};

use crate::errors::{Font2ImgError, Result};

pub use charmap::UnicodeCharmap;
pub use scanner::FontCodepointScanner;

/// A font file held in memory for the duration of one font's processing loop
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
    data: Vec<u8>,
}

impl FontFile {
    /// Read and validate a font file
    ///
    /// The file must parse as a single sfnt font carrying a `cmap` table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| Font2ImgError::FontLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_bytes(path, data)
    }

    /// Wrap font bytes that did not come from disk
    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self> {
        let font = Self {
            path: path.into(),
            data,
        };
        font.font_ref()?.cmap().map_err(|e| font.load_error(e))?;
        debug!("Loaded font {} ({} bytes)", font.path.display(), font.data.len());
        Ok(font)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Parsed view over the font tables
    pub fn font_ref(&self) -> Result<FontRef<'_>> {
        FontRef::new(&self.data).map_err(|e| self.load_error(e))
    }

    /// Union of the font's Unicode character maps
    pub fn charmap(&self) -> Result<UnicodeCharmap<'_>> {
        UnicodeCharmap::new(&self.font_ref()?).map_err(|e| self.load_error(e))
    }

    fn load_error(&self, error: impl std::fmt::Display) -> Font2ImgError {
        Font2ImgError::FontLoad {
            path: self.path.clone(),
            message: error.to_string(),
        }
    }
}

/// List the `*.ttf` files directly inside `dir`, sorted by path
pub fn discover_fonts(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Font2ImgError::FileAccess {
            path: dir.to_path_buf(),
            message: "Font directory does not exist".to_string(),
        });
    }

    let pattern = format!("{}/*.ttf", Pattern::escape(&dir.to_string_lossy()));
    let matches = glob(&pattern).map_err(|e| {
        Font2ImgError::Configuration(format!("Invalid font glob '{pattern}': {e}"))
    })?;

    let mut fonts = Vec::new();
    for entry in matches {
        match entry {
            Ok(path) if path.is_file() => fonts.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable font entry: {}", e),
        }
    }
    fonts.sort();

    debug!("Found {} fonts in {}", fonts.len(), dir.display());
    Ok(fonts)
}
