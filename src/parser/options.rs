//! Parsing options and configuration.

use super::TextEncoding;

/// Options for parsing SOSI files.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode for malformed coordinate lines
    pub error_mode: ErrorMode,

    /// Text encoding of the input
    pub encoding: TextEncoding,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on the first malformed coordinate line.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set text encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Log malformed coordinate lines and continue
    #[default]
    Lenient,
    /// Fail on any malformed coordinate line
    Strict,
}
