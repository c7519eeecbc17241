//! Configuration for the render and crawl pipelines
//!
//! Values come from built-in defaults, then `FONT2IMG_*` environment
//! variables, then command line flags (applied by the binary).

use std::env;
use std::path::PathBuf;

use crate::errors::{Font2ImgError, Result};

/// Default directory scanned for `*.ttf` files
pub const DEFAULT_FONT_DIR: &str = "fonts";
/// Default directory receiving `test-images/` and the manifest
pub const DEFAULT_OUTPUT_DIR: &str = "image-data";
/// Default language key for `render-lang`
pub const DEFAULT_LANGUAGE: &str = "kr";
/// Default path of the language range table
pub const DEFAULT_UNICODE_TABLE: &str = "UnicodeTable.json";
/// Default glyph size in pixels
pub const DEFAULT_FONT_SIZE: f32 = 48.0;

/// Name of the image directory created under the output directory
pub const IMAGE_DIR_NAME: &str = "test-images";
/// Name of the manifest written in the output directory
pub const MANIFEST_FILE_NAME: &str = "test-labels-map.csv";

/// Korean Wikipedia page listing every Unicode block
pub const DEFAULT_BLOCK_TABLE_URL: &str =
    "https://ko.wikipedia.org/wiki/%EC%9C%A0%EB%8B%88%EC%BD%94%EB%93%9C_%EC%98%81%EC%97%AD";

/// Configuration for the font rasterizer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Directory of ttf fonts to use
    pub font_dir: PathBuf,
    /// Directory for generated images and the label CSV
    pub output_dir: PathBuf,
    /// Glyph size in pixels
    pub font_size: f32,
    /// JSON table of per-language codepoint ranges
    pub unicode_table: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from(DEFAULT_FONT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            font_size: DEFAULT_FONT_SIZE,
            unicode_table: PathBuf::from(DEFAULT_UNICODE_TABLE),
        }
    }
}

impl RenderConfig {
    /// Defaults overridden by `FONT2IMG_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("FONT2IMG_FONT_DIR") {
            config.font_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("FONT2IMG_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Ok(size) = env::var("FONT2IMG_FONT_SIZE") {
            config.font_size = size.parse().map_err(|_| {
                Font2ImgError::Configuration(format!(
                    "FONT2IMG_FONT_SIZE is not a number: {size}"
                ))
            })?;
        }

        if let Ok(table) = env::var("FONT2IMG_UNICODE_TABLE") {
            config.unicode_table = PathBuf::from(table);
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Font2ImgError::Configuration(format!(
                "Font size must be a positive number, got {}",
                self.font_size
            )));
        }

        if self.font_dir.as_os_str().is_empty() {
            return Err(Font2ImgError::Configuration(
                "Font directory cannot be empty".to_string(),
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(Font2ImgError::Configuration(
                "Output directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Directory receiving the rendered JPEG files
    pub fn image_dir(&self) -> PathBuf {
        self.output_dir.join(IMAGE_DIR_NAME)
    }

    /// Path of the label manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE_NAME)
    }
}

/// Configuration for the block table crawler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerConfig {
    /// Page to fetch
    pub url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BLOCK_TABLE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl CrawlerConfig {
    /// Defaults overridden by `FONT2IMG_CRAWL_TIMEOUT_SECONDS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(timeout) = env::var("FONT2IMG_CRAWL_TIMEOUT_SECONDS") {
            config.timeout_seconds = timeout.parse().unwrap_or(config.timeout_seconds);
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Font2ImgError::Configuration(
                "URL cannot be empty".to_string(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(Font2ImgError::Configuration(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
