//! Error types for pagecell operations

use std::ffi::NulError;
use thiserror::Error;

/// Result type for pagecell operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the parser layer.
///
/// Each variant carries a message so callers get both a kind and a
/// human-readable description from a single value.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Not a PDF document: {0}")]
    InvalidPdf(String),

    #[error("Failed to parse document: {0}")]
    ParseFailed(String),

    #[error("Invalid page number: {0}")]
    InvalidPage(i32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Failed to create C string: {0}")]
    NulByteInString(#[from] NulError),
}
