//! Text decoding for SOSI input.
//!
//! `..TEGNSETT` labels are resolved to `encoding_rs` encodings. ISO 8859-1
//! is the one case decoded outside the label table, since the web labels
//! map it to windows-1252.

use encoding_rs::{Encoding, ISO_8859_10, UTF_8, WINDOWS_1252};

use crate::detect::declared_charset;
use crate::error::{Error, Result};

/// Text encoding used to decode an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8; a leading byte-order mark is dropped
    #[default]
    Utf8,
    /// ISO 8859-1, one character per byte
    Latin1,
    /// Any other single-byte character set, e.g. ISO 8859-10 or ANSI
    Charset(&'static Encoding),
    /// Whatever `..TEGNSETT` in the header says, UTF-8 if absent
    Declared,
}

impl TextEncoding {
    /// ISO 8859-10 (Nordic), the usual `..TEGNSETT ISO8859-10`.
    pub fn nordic() -> Self {
        TextEncoding::Charset(ISO_8859_10)
    }

    /// Windows-1252, written `..TEGNSETT ANSI` in SOSI headers.
    pub fn ansi() -> Self {
        TextEncoding::Charset(WINDOWS_1252)
    }

    /// Map a SOSI `..TEGNSETT` value to an encoding.
    pub fn from_charset(name: &str) -> Result<Self> {
        let label = name.trim().trim_matches('"');
        match label.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(TextEncoding::Utf8),
            "ISO8859-1" | "ISO-8859-1" | "LATIN1" => Ok(TextEncoding::Latin1),
            "ISO8859-10" | "ISO-8859-10" => Ok(Self::nordic()),
            "ANSI" => Ok(Self::ansi()),
            _ => match Encoding::for_label(label.as_bytes()) {
                Some(encoding) if encoding == UTF_8 => Ok(TextEncoding::Utf8),
                Some(encoding) => Ok(TextEncoding::Charset(encoding)),
                None => Err(Error::UnsupportedCharset(name.to_string())),
            },
        }
    }

    /// Decode raw file bytes to text.
    ///
    /// Byte sequences the encoding cannot map are an error, not replaced.
    pub fn decode(&self, data: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => {
                let (text, had_errors) = UTF_8.decode_with_bom_removal(data);
                if had_errors {
                    return Err(Error::Encoding("input is not valid UTF-8".to_string()));
                }
                Ok(text.into_owned())
            }
            TextEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(data).into_owned()),
            TextEncoding::Charset(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(data);
                if had_errors {
                    return Err(Error::Encoding(format!(
                        "input is not valid {}",
                        encoding.name()
                    )));
                }
                Ok(text.into_owned())
            }
            TextEncoding::Declared => {
                let resolved = match declared_charset(data) {
                    Some(charset) => Self::from_charset(&charset)?,
                    None => TextEncoding::Utf8,
                };
                log::debug!("Declared charset resolved to {:?}", resolved);
                resolved.decode(data)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_strips_bom() {
        let text = TextEncoding::Utf8.decode("\u{feff}..NØH\n".as_bytes()).unwrap();
        assert_eq!(text, "..NØH\n");
    }

    #[test]
    fn test_utf8_rejects_latin1_bytes() {
        let result = TextEncoding::Utf8.decode(b"..N\xd8H\n");
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_latin1_decodes_norwegian_letters() {
        let text = TextEncoding::Latin1.decode(b"..N\xd8H \xc6\xe5").unwrap();
        assert_eq!(text, "..NØH Æå");
    }

    #[test]
    fn test_declared_charset() {
        let data = b".HODE\n..TEGNSETT ISO8859-10\n.PUNKT 1:\n..N\xd8H\n";
        let text = TextEncoding::Declared.decode(data).unwrap();
        assert!(text.contains("..NØH"));

        let data = ".HODE\n..TEGNSETT UTF-8\n..NØH\n".as_bytes();
        let text = TextEncoding::Declared.decode(data).unwrap();
        assert!(text.contains("..NØH"));
    }

    #[test]
    fn test_declared_unsupported() {
        let result = TextEncoding::Declared.decode(b".HODE\n..TEGNSETT DOSN8\n");
        assert!(matches!(result, Err(Error::UnsupportedCharset(_))));
    }

    #[test]
    fn test_from_charset() {
        assert_eq!(TextEncoding::from_charset("utf-8").unwrap(), TextEncoding::Utf8);
        assert_eq!(TextEncoding::from_charset("ISO8859-1").unwrap(), TextEncoding::Latin1);
        assert_eq!(TextEncoding::from_charset("ISO8859-10").unwrap(), TextEncoding::nordic());
        assert_eq!(TextEncoding::from_charset("ANSI").unwrap(), TextEncoding::ansi());
        assert_eq!(
            TextEncoding::from_charset("windows-1252").unwrap(),
            TextEncoding::ansi()
        );
        assert!(TextEncoding::from_charset("ND7").is_err());
    }

    #[test]
    fn test_nordic_differs_from_latin1() {
        let data = b".HODE\n..TEGNSETT ISO8859-10\n.PUNKT 1:\n..NAVN \xa1\xbd\n";
        let text = TextEncoding::Declared.decode(data).unwrap();
        assert!(text.ends_with("..NAVN \u{104}\u{2015}\n"));

        let text = TextEncoding::Latin1.decode(b"\xa1\xbd").unwrap();
        assert_eq!(text, "\u{a1}\u{bd}");
    }

    #[test]
    fn test_ansi_euro_sign() {
        let data = b".HODE\n..TEGNSETT ANSI\n.PUNKT 1:\n..NAVN \x80\xe6\n";
        let text = TextEncoding::Declared.decode(data).unwrap();
        assert!(text.ends_with("..NAVN \u{20ac}\u{e6}\n"));
    }
}
