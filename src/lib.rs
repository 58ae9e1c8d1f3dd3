//! # sosidiff
//!
//! Read SOSI geometry files, compare two datasets with buffered
//! intersection tests, and write what is left back out as SOSI.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sosidiff::SosiDiff;
//!
//! fn main() -> sosidiff::Result<()> {
//!     let result = SosiDiff::new()
//!         .with_buffer_distance(10.0)
//!         .run("Liten_FKB.SOS", "Liten_Everk.SOS")?;
//!
//!     println!("Found {} non-overlapping geometries.", result.kept().len());
//!     result.write_sosi("non-overlapping_geometries.sos")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **parser**: one pass over the lines, producing records and an extent
//! - **compare**: index one side, then test the other side by buffered distance
//! - **render**: SOSI writer, SVG visualizer and JSON summary

pub mod compare;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use compare::{
    find_non_overlapping, find_unique, CompareOptions, CompareStats, FilterMode,
    DEFAULT_BUFFER_DISTANCE,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_sosi, SosiFormat};
pub use error::{Error, Result};
pub use model::{Coord, Dataset, Extent, Geometry, GeometryKind, ParseStats, Record};
pub use parser::{ErrorMode, ParseOptions, SosiParser, TextEncoding};
pub use render::{JsonFormat, SosiHeader, SvgOptions};

use std::io::Read;
use std::path::Path;

/// Parse a SOSI file.
///
/// # Example
///
/// ```no_run
/// use sosidiff::parse_file;
///
/// let dataset = parse_file("Liten_FKB.SOS").unwrap();
/// println!("Records: {}", dataset.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    SosiParser::open(path)?.parse()
}

/// Parse a SOSI file with custom options.
///
/// # Example
///
/// ```no_run
/// use sosidiff::{parse_file_with_options, ParseOptions, TextEncoding};
///
/// let options = ParseOptions::new().with_encoding(TextEncoding::Declared);
/// let dataset = parse_file_with_options("Liten_Everk.SOS", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Dataset> {
    SosiParser::open_with_options(path, options)?.parse()
}

/// Parse SOSI from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Dataset> {
    SosiParser::from_bytes(data)?.parse()
}

/// Parse SOSI from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Dataset> {
    SosiParser::from_reader(reader)?.parse()
}

/// Parse SOSI from decoded text.
///
/// # Example
///
/// ```
/// let dataset = sosidiff::parse_str(".PUNKT 1:\n..NØH\n100 200\n.SLUTT\n").unwrap();
/// assert_eq!(dataset.len(), 1);
/// ```
pub fn parse_str(text: &str) -> Result<Dataset> {
    SosiParser::from_text(text, ParseOptions::default()).parse()
}

/// Builder for the read, compare and write pipeline.
///
/// # Example
///
/// ```no_run
/// use sosidiff::{SosiDiff, TextEncoding};
///
/// let result = SosiDiff::new()
///     .unique()
///     .with_encoding(TextEncoding::Latin1)
///     .with_buffer_distance(2.5)
///     .run("Liten_FKB.SOS", "Liten_Everk.SOS")?;
/// result.write_sosi("unique.sos")?;
/// # Ok::<(), sosidiff::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SosiDiff {
    parse_options: ParseOptions,
    compare_options: CompareOptions,
    mode: FilterMode,
    header: SosiHeader,
}

impl SosiDiff {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text encoding for both inputs.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.parse_options = self.parse_options.with_encoding(encoding);
        self
    }

    /// Fail on malformed coordinate lines instead of skipping them.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Set buffer distance.
    pub fn with_buffer_distance(mut self, distance: f64) -> Self {
        self.compare_options = self.compare_options.with_buffer_distance(distance);
        self
    }

    /// Enable or disable parallel buffering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.compare_options = self.compare_options.with_parallel(parallel);
        self
    }

    /// Set filter mode.
    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Keep primary records whose buffer misses the other side's buffers.
    pub fn non_overlapping(self) -> Self {
        self.with_mode(FilterMode::NonOverlapping)
    }

    /// Keep primary records that miss the other side's buffers.
    pub fn unique(self) -> Self {
        self.with_mode(FilterMode::Unique)
    }

    /// Set the header written with the SOSI output.
    pub fn with_header(mut self, header: SosiHeader) -> Self {
        self.header = header;
        self
    }

    /// Parse both files and run the comparison.
    ///
    /// `primary` is the side results are drawn from; `other` is buffered.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(self, primary: P, other: Q) -> Result<DiffResult> {
        let primary = parse_file_with_options(primary, self.parse_options.clone())?;
        let other = parse_file_with_options(other, self.parse_options.clone())?;
        self.run_datasets(primary, other)
    }

    /// Run the comparison on datasets that are already parsed.
    pub fn run_datasets(self, primary: Dataset, other: Dataset) -> Result<DiffResult> {
        let comparison = compare::compare(
            self.mode,
            &primary.records,
            &other.records,
            &self.compare_options,
        )?;
        let kept = comparison.kept.into_iter().cloned().collect();
        let extent = Extent::combine(primary.extent, other.extent);
        Ok(DiffResult {
            kept,
            extent,
            stats: comparison.stats,
            header: self.header,
            buffer_distance: self.compare_options.buffer_distance,
        })
    }
}

/// What happened when writing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was written with this many records
    Written { records: usize },
    /// Nothing passed the filter, so no file was written
    SkippedEmpty,
}

/// Result of a [`SosiDiff`] run.
#[derive(Debug, Clone)]
pub struct DiffResult {
    kept: Vec<Record>,
    extent: Option<Extent>,
    /// Comparison counts
    pub stats: CompareStats,
    header: SosiHeader,
    buffer_distance: f64,
}

impl DiffResult {
    /// Records that passed the filter.
    pub fn kept(&self) -> &[Record] {
        &self.kept
    }

    /// Whether nothing passed the filter.
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    /// Extent of both inputs combined; used in the output header.
    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    /// Render the kept records as SOSI.
    pub fn to_sosi(&self) -> Result<String> {
        let extent = self.extent.ok_or(Error::EmptyExtent)?;
        Ok(render::to_sosi(&self.kept, &extent, &self.header))
    }

    /// Write the kept records as SOSI.
    ///
    /// An empty result is not written; the outcome says so.
    pub fn write_sosi<P: AsRef<Path>>(&self, path: P) -> Result<WriteOutcome> {
        let path = path.as_ref();
        if self.kept.is_empty() {
            log::warn!(
                "No geometries passed the filter; not writing {}",
                path.display()
            );
            return Ok(WriteOutcome::SkippedEmpty);
        }
        let extent = self.extent.ok_or(Error::EmptyExtent)?;
        render::write_sosi_file(path, &self.kept, &extent, &self.header)?;
        log::info!("Wrote {} records to {}", self.kept.len(), path.display());
        Ok(WriteOutcome::Written {
            records: self.kept.len(),
        })
    }

    /// Render the kept records and their buffers as SVG.
    pub fn to_svg(&self) -> String {
        let options = SvgOptions::new().with_buffer_distance(self.buffer_distance);
        render::to_svg(&self.kept, &options)
    }

    /// Render the kept records as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.kept, self.extent, format)
    }
}
