//! Font-to-image batch pipeline
//!
//! For every font and every codepoint the font claims, render the glyph,
//! drop blank renders, save the rest as `<prefix>_<n>.jpeg` and record them
//! in the manifest. `n` counts accepted images across the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::config::RenderConfig;
use crate::errors::{Font2ImgError, Result};
use crate::font::{discover_fonts, FontCodepointScanner, FontFile};
use crate::manifest::ManifestWriter;
use crate::raster::{is_blank, GlyphRasterizer, GlyphRenderer};
use crate::ranges::{CodepointRange, RangeTable};

/// File-name prefix of the plain `render` pipeline
pub const PLAIN_PREFIX: &str = "hangul";

/// Accepted images between two progress reports
const PROGRESS_INTERVAL: usize = 5000;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Font passes (a font scanned for several ranges counts once per range)
    pub fonts: usize,
    /// Codepoints the fonts' cmaps claimed
    pub scanned: usize,
    /// Images written and recorded in the manifest
    pub rendered: usize,
    /// Claimed codepoints dropped because their render was blank
    pub skipped_blank: usize,
    /// Claimed codepoints dropped because they are surrogates, with no `char`
    pub skipped_invalid: usize,
}

/// Progress cadence: a report is due once more than `interval` images were
/// accepted since the previous one
#[derive(Debug, Clone, Copy)]
struct ProgressTracker {
    interval: usize,
    last_report: usize,
}

impl ProgressTracker {
    fn new(interval: usize) -> Self {
        Self {
            interval,
            last_report: 0,
        }
    }

    /// The total to report, if a report is due at `total`
    fn observe(&mut self, total: usize) -> Option<usize> {
        if total.saturating_sub(self.last_report) > self.interval {
            self.last_report = total;
            Some(total)
        } else {
            None
        }
    }
}

/// Run context: output locations, manifest stream and the image counter
#[derive(Debug)]
pub struct RenderPipeline<R> {
    renderer: GlyphRenderer<R>,
    manifest: ManifestWriter,
    image_dir: PathBuf,
    prefix: String,
    progress: ProgressTracker,
    summary: RenderSummary,
}

impl<R: GlyphRasterizer> RenderPipeline<R> {
    /// Create the image directory and (re)create the manifest
    pub fn create(config: &RenderConfig, prefix: impl Into<String>, rasterizer: R) -> Result<Self> {
        config.validate()?;

        let image_dir = config.image_dir();
        fs::create_dir_all(&image_dir).map_err(|e| Font2ImgError::file_access(&image_dir, &e))?;
        let manifest = ManifestWriter::create(config.manifest_path())?;

        Ok(Self {
            renderer: GlyphRenderer::new(rasterizer, config.font_size),
            manifest,
            image_dir,
            prefix: prefix.into(),
            progress: ProgressTracker::new(PROGRESS_INTERVAL),
            summary: RenderSummary::default(),
        })
    }

    /// Images accepted so far in this run
    pub fn total(&self) -> usize {
        self.summary.rendered
    }

    /// Render every codepoint `font` supports within `range`
    ///
    /// Returns the number of images accepted for this font.
    #[instrument(level = "debug", skip(self, font), fields(path = %font.path().display()))]
    pub fn render_font(&mut self, font: &FontFile, range: CodepointRange) -> Result<usize> {
        let supported = FontCodepointScanner::new(font).scan(range)?;
        self.summary.fonts += 1;
        self.summary.scanned += supported.len();

        let mut accepted = 0;
        for codepoint in supported {
            self.report_progress();

            let Some(ch) = char::from_u32(codepoint) else {
                debug!("U+{:04X} is not a scalar value, skipping", codepoint);
                self.summary.skipped_invalid += 1;
                continue;
            };

            if self.render_char(font, ch)? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    fn render_char(&mut self, font: &FontFile, ch: char) -> Result<bool> {
        let canvas = self.renderer.render(font, ch)?;
        if is_blank(&canvas, ch) {
            debug!("U+{:04X} renders blank, skipping", u32::from(ch));
            self.summary.skipped_blank += 1;
            return Ok(false);
        }

        self.summary.rendered += 1;
        let file_path = self.image_path(self.summary.rendered);
        canvas.save_jpeg(&file_path)?;
        self.manifest.append(&file_path, ch)?;
        Ok(true)
    }

    fn image_path(&self, n: usize) -> PathBuf {
        self.image_dir.join(format!("{}_{}.jpeg", self.prefix, n))
    }

    fn report_progress(&mut self) {
        if let Some(total) = self.progress.observe(self.total()) {
            info!("{} images generated...", total);
        }
    }

    /// Close the manifest and report the run's counts
    pub fn finish(self) -> Result<RenderSummary> {
        let records = self.manifest.finish()?;
        debug_assert_eq!(records, self.summary.rendered);
        debug_assert_eq!(
            self.summary.scanned,
            self.summary.rendered + self.summary.skipped_blank + self.summary.skipped_invalid
        );
        info!("Finished generating {} images.", self.summary.rendered);
        Ok(self.summary)
    }
}

/// Render every supported codepoint of every font in the font directory
pub fn render_all<R: GlyphRasterizer>(config: &RenderConfig, rasterizer: R) -> Result<RenderSummary> {
    let fonts = discover_fonts(&config.font_dir)?;
    let mut pipeline = RenderPipeline::create(config, PLAIN_PREFIX, rasterizer)?;

    for path in &fonts {
        let font = FontFile::open(path)?;
        let count = pipeline.render_font(&font, CodepointRange::full())?;
        info!("Now generating {} images from {}.", count, display_name(path));
    }

    pipeline.finish()
}

/// Render the codepoints of one language's ranges with every font
///
/// Ranges are processed in table order, each one across all fonts, and
/// overlapping ranges are rendered again.
pub fn render_language<R: GlyphRasterizer>(
    config: &RenderConfig,
    table: &RangeTable,
    language: &str,
    rasterizer: R,
) -> Result<RenderSummary> {
    let ranges = table.resolve(language)?;
    let fonts = discover_fonts(&config.font_dir)?;
    let mut pipeline = RenderPipeline::create(config, language, rasterizer)?;

    for range in ranges {
        info!(
            "Range {} ({} .. {})",
            range,
            printable(range.start),
            printable(range.end)
        );
        for path in &fonts {
            let font = FontFile::open(path)?;
            pipeline.render_font(&font, range)?;
        }
    }

    pipeline.finish()
}

fn printable(codepoint: u32) -> char {
    char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}
