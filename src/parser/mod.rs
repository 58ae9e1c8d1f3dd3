//! SOSI parsing module.

mod encoding;
mod options;
mod sosi_parser;

pub use encoding::TextEncoding;
pub use options::{ErrorMode, ParseOptions};
pub use sosi_parser::SosiParser;
pub(crate) use sosi_parser::END_MARKER;
