//! # font2img
//!
//! Builds labelled glyph datasets: every character a set of TrueType fonts
//! supports is rendered to a centered 64x64 grayscale JPEG, and a CSV manifest
//! maps each image to its character. Codepoints come from the whole Unicode
//! codespace or from per-language ranges in a JSON table.
//!
//! Also bundles a small crawler that counts the entries of the Unicode block
//! table on Wikipedia.

pub mod config;
pub mod crawler;
pub mod errors;
pub mod font;
pub mod manifest;
pub mod pipeline;
pub mod ranges;
pub mod raster;

pub use errors::{Font2ImgError, Result};
pub use pipeline::{render_all, render_language, RenderPipeline, RenderSummary};
