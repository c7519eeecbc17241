use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use font2img::config::{CrawlerConfig, RenderConfig, DEFAULT_LANGUAGE};
use font2img::crawler::{self, CrawlOutcome};
use font2img::ranges::RangeTable;
use font2img::raster::SwashRasterizer;
use font2img::{render_all, render_language, RenderSummary};

#[derive(Debug, Parser)]
#[command(name = "font2img", version, about = "Render font glyphs into labelled training images")]
struct Cli {
    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render every codepoint each font supports as hangul_<n>.jpeg
    Render(RenderArgs),

    /// Render the codepoint ranges of one language as <lang>_<n>.jpeg
    RenderLang {
        #[command(flatten)]
        render: RenderArgs,

        /// Language to create font character images for
        #[arg(long = "lang", default_value = DEFAULT_LANGUAGE)]
        language: String,

        /// JSON table of per-language codepoint ranges
        #[arg(long)]
        unicode_table: Option<PathBuf>,
    },

    /// Count the entries of the Unicode block table on Wikipedia
    CountBlocks {
        /// Page to fetch instead of the default wiki page
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Directory of ttf fonts to use
    #[arg(long = "font-dir")]
    font_dir: Option<PathBuf>,

    /// Output directory to store generated images and label CSV file
    #[arg(long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Glyph size in pixels
    #[arg(long)]
    font_size: Option<f32>,
}

impl RenderArgs {
    fn apply(self, config: &mut RenderConfig) {
        if let Some(dir) = self.font_dir {
            config.font_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set log level based on flags
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!("font2img version {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Render(args) => {
            let mut config = RenderConfig::from_env()?;
            args.apply(&mut config);
            let summary = render_all(&config, SwashRasterizer::new())?;
            report(&summary);
        }
        Command::RenderLang {
            render,
            language,
            unicode_table,
        } => {
            let mut config = RenderConfig::from_env()?;
            render.apply(&mut config);
            if let Some(path) = unicode_table {
                config.unicode_table = path;
            }
            let table = RangeTable::load(&config.unicode_table)?;
            let summary = render_language(&config, &table, &language, SwashRasterizer::new())?;
            report(&summary);
        }
        Command::CountBlocks { url } => {
            let mut config = CrawlerConfig::from_env();
            if let Some(url) = url {
                config.url = url;
            }
            count_blocks(&config).await?;
        }
    }

    Ok(())
}

#[allow(clippy::print_stderr)]
fn report(summary: &RenderSummary) {
    eprintln!(
        "Finished generating {} images ({} claimed codepoints, {} blank, {} surrogates) from {} font passes.",
        summary.rendered,
        summary.scanned,
        summary.skipped_blank,
        summary.skipped_invalid,
        summary.fonts
    );
}

#[allow(clippy::print_stdout, clippy::print_stderr)]
async fn count_blocks(config: &CrawlerConfig) -> anyhow::Result<()> {
    match crawler::crawl(config).await? {
        CrawlOutcome::Counted(counts) => {
            println!("{}", counts.sortkey_spans);
            println!("{}", counts.table_rows);
        }
        CrawlOutcome::Unreachable { url, status } => {
            eprintln!("Site {url} connection failed ({status})");
        }
    }
    Ok(())
}
