//! Error types for unpdf-layout.
//!
//! The analysis engine itself is total: every page, line and glyph pair has a
//! defined result. These errors only come from the I/O surface around it
//! (loading page dumps, serializing results).

use std::io;
use thiserror::Error;

/// Result type alias for unpdf-layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading input or rendering output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page dump is not valid JSON or does not match the expected shape.
    #[error("Invalid page data: {0}")]
    Json(#[from] serde_json::Error),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}
