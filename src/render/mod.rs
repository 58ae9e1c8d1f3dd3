//! Rendering module for writing records to SOSI, SVG and JSON.

mod json;
mod options;
mod sosi;
mod svg;

pub use json::{to_json, JsonFormat};
pub use options::{SosiHeader, SvgOptions};
pub use sosi::{to_sosi, write_sosi, write_sosi_file};
pub use svg::to_svg;
