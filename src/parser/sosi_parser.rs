//! Line-oriented SOSI parser.

use std::io::Read;
use std::path::Path;

use crate::detect::is_group_line;
use crate::error::{Error, Result};
use crate::model::{Coord, Dataset, Extent, Geometry, GeometryKind, Record};

use super::options::{ErrorMode, ParseOptions};

/// Coordinate section markers. `..NØ` is the short form used by some
/// producers for single points.
const COORDINATE_MARKERS: [&str; 2] = ["..NØH", "..NØ"];
/// Terminator line.
pub(crate) const END_MARKER: &str = ".SLUTT";

/// SOSI file parser.
///
/// The input is decoded once up front; [`SosiParser::parse`] then walks
/// the lines in a single pass.
pub struct SosiParser {
    text: String,
    options: ParseOptions,
}

impl SosiParser {
    /// Open a SOSI file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a SOSI file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse SOSI from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse SOSI from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let text = options.encoding.decode(data)?;
        Ok(Self { text, options })
    }

    /// Parse SOSI from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse SOSI from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse already decoded text. The encoding option is not used.
    pub fn from_text(text: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    /// Parse the input into a dataset.
    pub fn parse(&self) -> Result<Dataset> {
        let mut dataset = Dataset::new();
        let mut section = Section::Preamble;
        let mut pending: Option<Pending> = None;

        for (idx, raw) in self.text.lines().enumerate() {
            let line_no = idx + 1;
            dataset.stats.line_count = line_no;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if is_group_line(line) {
                if let Some(done) = pending.take() {
                    done.finish(&mut dataset);
                }
                let token = line.split_whitespace().next().unwrap_or(line);
                if token == END_MARKER {
                    section = Section::Ended;
                    break;
                }
                match GeometryKind::from_marker(token) {
                    Some(kind) => {
                        pending = Some(Pending::new(kind, line, line_no));
                        section = Section::Attributes;
                    }
                    None => {
                        if token != ".HODE" {
                            log::debug!("Skipping {} group on line {}", token, line_no);
                            dataset.stats.ignored_groups += 1;
                        }
                        section = Section::Ignored;
                    }
                }
                continue;
            }

            if COORDINATE_MARKERS.contains(&line) {
                if matches!(section, Section::Attributes | Section::Coordinates) {
                    section = Section::Coordinates;
                }
                continue;
            }

            match (section, pending.as_mut()) {
                (Section::Coordinates, Some(current)) => match parse_coordinate(line) {
                    Some(coord) => current.coords.push(coord),
                    None => {
                        if self.options.error_mode == ErrorMode::Strict {
                            return Err(Error::MalformedCoordinate {
                                line: line_no,
                                content: line.to_string(),
                            });
                        }
                        log::warn!("Error parsing coordinates on line {}: {}", line_no, line);
                        dataset.stats.malformed_coordinates += 1;
                    }
                },
                (Section::Attributes, Some(current)) => current.attributes.push(line.to_string()),
                _ => {}
            }
        }

        if let Some(done) = pending.take() {
            done.finish(&mut dataset);
        }
        if section != Section::Ended {
            log::debug!("Input ended without {}", END_MARKER);
        }

        log::info!(
            "Parsed {} records ({} dropped, {} malformed coordinate lines)",
            dataset.len(),
            dataset.stats.dropped_records,
            dataset.stats.malformed_coordinates
        );
        Ok(dataset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before the first geometry group (header)
    Preamble,
    /// Inside a geometry group, before its coordinate marker
    Attributes,
    /// Inside a geometry group, after its coordinate marker
    Coordinates,
    /// Inside a group we do not turn into geometry
    Ignored,
    /// After the terminator
    Ended,
}

/// Record under construction.
struct Pending {
    kind: GeometryKind,
    coords: Vec<Coord>,
    attributes: Vec<String>,
    line: usize,
}

impl Pending {
    fn new(kind: GeometryKind, group_line: &str, line: usize) -> Self {
        Self {
            kind,
            coords: Vec::new(),
            attributes: vec![group_line.to_string()],
            line,
        }
    }

    fn finish(self, dataset: &mut Dataset) {
        let count = self.coords.len();
        // Every coordinate read counts toward the extent, even those a
        // point does not keep.
        let extent = Extent::from_coords(self.coords.iter().copied());
        match Geometry::from_parts(self.kind, self.coords) {
            Some(geometry) => {
                dataset.push_covering(Record::new(geometry, self.attributes), extent)
            }
            None => {
                log::debug!(
                    "Dropping {} on line {}: {} coordinate(s), needs {}",
                    self.kind,
                    self.line,
                    count,
                    self.kind.min_coords()
                );
                dataset.stats.dropped_records += 1;
            }
        }
    }
}

/// Read the first two whitespace-separated tokens as integers. Anything
/// after them (height, `...KP` node markers) is ignored.
fn parse_coordinate(line: &str) -> Option<Coord> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    Some(Coord::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TextEncoding;

    fn parse(text: &str) -> Dataset {
        SosiParser::from_text(text, ParseOptions::default())
            .parse()
            .unwrap()
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("100 200"), Some(Coord::new(100, 200)));
        assert_eq!(parse_coordinate("  -5\t7 ...KP 1"), Some(Coord::new(-5, 7)));
        assert_eq!(parse_coordinate("100"), None);
        assert_eq!(parse_coordinate("abc 200"), None);
        assert_eq!(parse_coordinate("100.5 200"), None);
    }

    #[test]
    fn test_parse_single_curve() {
        let dataset = parse(".KURVE 1:\n..OBJTYPE Ledning\n..NØH\n0 0\n10 0\n10 10\n.SLUTT\n");
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records[0];
        assert_eq!(record.attributes, vec![".KURVE 1:", "..OBJTYPE Ledning"]);
        assert_eq!(record.geometry.coords().len(), 3);
        assert_eq!(record.kind(), GeometryKind::LineString);
    }

    #[test]
    fn test_header_lines_not_attributes() {
        let dataset = parse(".HODE\n..TEGNSETT UTF-8\n...MIN-NØ 0 0\n.PUNKT 1:\n..NØH\n5 5\n.SLUTT\n");
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].attributes, vec![".PUNKT 1:"]);
        assert_eq!(dataset.stats.ignored_groups, 0);
    }

    #[test]
    fn test_polygon_minimum_points() {
        let three = ".FLATE 1:\n..NØH\n0 0\n10 0\n0 0\n";
        let four = ".FLATE 2:\n..NØH\n0 0\n10 0\n10 10\n0 0\n";
        assert!(parse(three).is_empty());
        assert_eq!(parse(three).stats.dropped_records, 1);
        assert_eq!(parse(four).len(), 1);
    }

    #[test]
    fn test_malformed_line_skipped() {
        let dataset = parse(".KURVE 1:\n..NØH\n0 0\nfoo bar\n20 20\n30 30\n");
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.records[0].geometry.coords(),
            &[Coord::new(0, 0), Coord::new(20, 20), Coord::new(30, 30)]
        );
        assert_eq!(dataset.stats.malformed_coordinates, 1);
    }

    #[test]
    fn test_strict_mode_fails_on_malformed() {
        let parser = SosiParser::from_text(
            ".KURVE 1:\n..NØH\n0 0\nfoo bar\n",
            ParseOptions::new().strict(),
        );
        match parser.parse() {
            Err(Error::MalformedCoordinate { line, content }) => {
                assert_eq!(line, 4);
                assert_eq!(content, "foo bar");
            }
            other => panic!("expected malformed coordinate error, got {:?}", other),
        }
    }

    #[test]
    fn test_point_without_coords_dropped() {
        let dataset = parse(".PUNKT 1:\n..OBJTYPE Kum\n.PUNKT 2:\n..NØH\n1 2\n");
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].object_id(), Some(2));
        assert_eq!(dataset.stats.dropped_records, 1);
    }

    #[test]
    fn test_foreign_group_does_not_leak() {
        let text = ".KURVE 1:\n..NØH\n0 0\n10 10\n.TEKST 2:\n..STRENG \"x\"\n..NØH\n99 99\n.PUNKT 3:\n..NØH\n5 5\n";
        let dataset = parse(text);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].geometry.coords().len(), 2);
        assert_eq!(dataset.stats.ignored_groups, 1);
        assert_eq!(dataset.stats.malformed_coordinates, 0);
    }

    #[test]
    fn test_extent_ignores_dropped_records() {
        let text = ".FLATE 1:\n..NØH\n-1000 -1000\n1000 1000\n.PUNKT 2:\n..NØH\n5 6\n.PUNKT 3:\n..NØH\n7 9\n";
        let dataset = parse(text);
        let extent = dataset.extent.unwrap();
        assert_eq!((extent.min_x, extent.min_y, extent.max_x, extent.max_y), (5, 6, 7, 9));
    }

    #[test]
    fn test_point_extent_covers_extra_coordinates() {
        let dataset = parse(".PUNKT 1:\n..NØH\n0 0\n1000 1000\n");
        assert_eq!(dataset.records[0].geometry, Geometry::Point(Coord::new(0, 0)));
        assert_eq!(dataset.extent, Some(Extent::new(0, 0, 1000, 1000)));
    }

    #[test]
    fn test_stops_at_end_marker() {
        let dataset = parse(".PUNKT 1:\n..NØH\n1 1\n.SLUTT\n.PUNKT 2:\n..NØH\n2 2\n");
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_short_coordinate_marker() {
        let dataset = parse(".PUNKT 1:\n..NØ\n100 200\n");
        assert_eq!(dataset.records[0].geometry, Geometry::Point(Coord::new(100, 200)));
    }

    #[test]
    fn test_crlf_and_indentation() {
        let dataset = parse(".KURVE 1:\r\n  ..OBJTYPE VL\r\n..NØH\r\n 1 2 \r\n3 4\r\n");
        assert_eq!(dataset.records[0].attributes[1], "..OBJTYPE VL");
        assert_eq!(dataset.records[0].geometry.coords().len(), 2);
    }

    #[test]
    fn test_from_bytes_latin1() {
        let data = b".PUNKT 1:\n..NAVN \xc5s\n..N\xd8H\n1 2\n";
        let options = ParseOptions::new().with_encoding(TextEncoding::Latin1);
        let dataset = SosiParser::from_bytes_with_options(data, options)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(dataset.records[0].attributes[1], "..NAVN Ås");
    }

    #[test]
    fn test_from_bytes_utf8_rejects_latin1() {
        let data = b".PUNKT 1:\n..N\xd8H\n1 2\n";
        assert!(SosiParser::from_bytes(data).is_err());
    }
}
