//! SOSI format detection and header inspection.
//!
//! Only the declared header values are read. The character set comes from
//! `..TEGNSETT`; no byte-frequency guessing is done.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header information declared in a SOSI file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SosiFormat {
    /// `..SOSI-VERSJON` value (e.g., "4.5", "5.0")
    pub version: Option<String>,
    /// `..TEGNSETT` value (e.g., "UTF-8", "ISO8859-10")
    pub charset: Option<String>,
    /// `..SOSI-NIVÅ` value
    pub level: Option<String>,
}

impl std::fmt::Display for SosiFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SOSI {}", self.version.as_deref().unwrap_or("?"))?;
        if let Some(ref charset) = self.charset {
            write!(f, " ({})", charset)?;
        }
        Ok(())
    }
}

const HEAD_MARKER: &str = ".HODE";
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
/// Headers are short; this is plenty to cover one.
const HEADER_PROBE_LEN: u64 = 64 * 1024;

/// Detect SOSI format from a file path.
///
/// # Example
/// ```no_run
/// use sosidiff::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("Liten_FKB.SOS").unwrap();
/// println!("Charset: {:?}", format.charset);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SosiFormat> {
    let file = File::open(path)?;
    let mut header = Vec::new();
    file.take(HEADER_PROBE_LEN).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect SOSI format from bytes.
///
/// # Returns
/// * `Ok(SosiFormat)` if the data starts with a `.HODE` group
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SosiFormat> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut lines = data
        .split(|&b| b == b'\n')
        .map(|raw| String::from_utf8_lossy(raw).trim().to_string())
        .filter(|line| !line.is_empty());

    match lines.next() {
        Some(first) if first.starts_with(HEAD_MARKER) => {}
        _ => return Err(Error::UnknownFormat),
    }

    let mut format = SosiFormat::default();
    for line in lines {
        if is_group_line(&line) {
            break;
        }
        let mut parts = line.splitn(2, char::is_whitespace);
        let key = parts.next().unwrap_or_default();
        let value = parts.next().map(|v| v.trim().trim_matches('"').to_string());
        match key {
            "..TEGNSETT" => format.charset = value,
            "..SOSI-VERSJON" => format.version = value,
            // The level key contains a non-ASCII letter that may not have
            // survived lossy decoding.
            k if k.starts_with("..SOSI-NIV") => format.level = value,
            _ => {}
        }
    }

    Ok(format)
}

/// The character set declared in the header, if any.
pub fn declared_charset(data: &[u8]) -> Option<String> {
    detect_format_from_bytes(data).ok()?.charset
}

/// A top-level group line starts with exactly one dot.
pub(crate) fn is_group_line(line: &str) -> bool {
    line.starts_with('.') && !line.starts_with("..")
}

/// Check if a file starts with a SOSI header.
pub fn is_sosi<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a SOSI header.
pub fn is_sosi_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
