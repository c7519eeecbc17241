use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while crawling or rendering
#[derive(Error, Debug)]
pub enum Font2ImgError {
    /// Error when a font file cannot be read or parsed
    #[error("Failed to load font {path}: {message}")]
    FontLoad { path: PathBuf, message: String },

    /// Error when the requested language has no entry in the range table
    #[error("Unknown language '{language}' (available: {available})")]
    UnknownLanguage { language: String, available: String },

    /// Error when a range bound is not a valid hexadecimal codepoint
    #[error("Invalid codepoint '{value}' for language '{language}'")]
    InvalidCodepoint { language: String, value: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error when encoding a canvas to disk
    #[error("Failed to encode image {path}: {message}")]
    ImageEncode { path: PathBuf, message: String },

    /// Error when trying to access a file or directory
    #[error("File access error for {path}: {message}")]
    FileAccess { path: PathBuf, message: String },

    /// Network error for HTTP requests
    #[error("Network error: {0}")]
    Network(String),

    /// Error when a CSS selector or class pattern does not compile
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with Font2ImgError
pub type Result<T> = std::result::Result<T, Font2ImgError>;

impl From<reqwest::Error> for Font2ImgError {
    fn from(error: reqwest::Error) -> Self {
        Font2ImgError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for Font2ImgError {
    fn from(error: serde_json::Error) -> Self {
        Font2ImgError::Configuration(format!("Invalid JSON: {error}"))
    }
}

impl Font2ImgError {
    /// Build a `FileAccess` error from an IO error on a known path
    pub fn file_access(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Font2ImgError::FileAccess {
            path: path.into(),
            message: error.to_string(),
        }
    }
}
