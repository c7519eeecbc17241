//! Image-to-label CSV manifest
//!
//! One `path,character` line per accepted glyph. Lines are written verbatim,
//! so a label that is itself a comma produces `path,,`; downstream readers
//! split on the first comma only.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Font2ImgError, Result};

/// Manifest stream owned by one pipeline run
#[derive(Debug)]
pub struct ManifestWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    records: usize,
}

impl ManifestWriter {
    /// Create the manifest, truncating any manifest left by an earlier run
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|e| Font2ImgError::file_access(&path, &e))?;
        debug!("Writing manifest to {}", path.display());
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            records: 0,
        })
    }

    /// Append one record
    pub fn append(&mut self, image_path: &Path, label: char) -> Result<()> {
        writeln!(self.writer, "{},{}", image_path.display(), label)
            .map_err(|e| Font2ImgError::file_access(&self.path, &e))?;
        self.records += 1;
        Ok(())
    }

    /// Flush and close the stream
    pub fn finish(mut self) -> Result<usize> {
        self.writer
            .flush()
            .map_err(|e| Font2ImgError::file_access(&self.path, &e))?;
        Ok(self.records)
    }
}
