//! Unicode block table counter
//!
//! Fetches the wiki page listing Unicode blocks and counts its entries two
//! ways, so the counts can be compared by hand: `<span>` elements whose class
//! matches `sortkey`, and `tbody > tr` rows. The row count is the closer of
//! the two, but includes the reference tables at the bottom of the page.

use std::time::Duration;

use regex::Regex;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

use crate::config::CrawlerConfig;
use crate::errors::{Font2ImgError, Result};

/// Class pattern of the per-block sort key spans
pub const SORTKEY_CLASS_PATTERN: &str = "sortkey";
/// Selector for table body rows
pub const TABLE_ROW_SELECTOR: &str = "tbody > tr";

/// Both counts taken from one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCounts {
    /// `<span>` elements whose class matches [`SORTKEY_CLASS_PATTERN`]
    pub sortkey_spans: usize,
    /// Elements matching [`TABLE_ROW_SELECTOR`]
    pub table_rows: usize,
}

/// Result of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The page was fetched and counted
    Counted(BlockCounts),
    /// The server answered with a non-success status
    Unreachable { url: String, status: StatusCode },
}

/// Count `<span>` elements whose `class` attribute matches `pattern`
pub fn count_spans_with_class(html: &Html, pattern: &str) -> Result<usize> {
    let class = Regex::new(pattern).map_err(|e| Font2ImgError::Selector {
        selector: pattern.to_string(),
        message: e.to_string(),
    })?;
    let spans = parse_selector("span")?;

    Ok(html
        .select(&spans)
        .filter(|el| el.value().attr("class").is_some_and(|c| class.is_match(c)))
        .count())
}

/// Count elements matching a CSS selector
pub fn count_selector(html: &Html, selector: &str) -> Result<usize> {
    let selector = parse_selector(selector)?;
    Ok(html.select(&selector).count())
}

/// Take both counts from a page body
pub fn count_blocks(body: &str) -> Result<BlockCounts> {
    let html = Html::parse_document(body);
    Ok(BlockCounts {
        sortkey_spans: count_spans_with_class(&html, SORTKEY_CLASS_PATTERN)?,
        table_rows: count_selector(&html, TABLE_ROW_SELECTOR)?,
    })
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Font2ImgError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Fetch the configured page and count its blocks
#[instrument(level = "debug", skip(config), fields(url = %config.url))]
pub async fn crawl(config: &CrawlerConfig) -> Result<CrawlOutcome> {
    config.validate()?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(format!("font2img/{}", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client.get(&config.url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Ok(CrawlOutcome::Unreachable {
            url: config.url.clone(),
            status,
        });
    }

    let body = response.text().await?;
    debug!("Fetched {} bytes", body.len());

    let counts = count_blocks(&body)?;
    info!(
        "{} sortkey spans, {} table rows",
        counts.sortkey_spans, counts.table_rows
    );
    Ok(CrawlOutcome::Counted(counts))
}
