//! Error types for sosidiff library.

use std::io;
use thiserror::Error;

/// Result type alias for sosidiff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading, comparing or writing SOSI data.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not look like a SOSI file.
    #[error("Unknown file format: not a SOSI file")]
    UnknownFormat,

    /// The input bytes could not be decoded with the requested encoding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The header declares a character set we cannot decode.
    #[error("Unsupported character set: {0}")]
    UnsupportedCharset(String),

    /// A coordinate line could not be read as two integers (strict mode only).
    #[error("Malformed coordinate on line {line}: {content:?}")]
    MalformedCoordinate { line: usize, content: String },

    /// Buffer distance must be finite and non-negative.
    #[error("Invalid buffer distance: {0}")]
    InvalidBufferDistance(f64),

    /// An operation needed an extent but the dataset holds no coordinates.
    #[error("Dataset has no coordinates to compute an extent from")]
    EmptyExtent,

    /// Error during rendering (SOSI, SVG, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}
