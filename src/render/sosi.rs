//! SOSI writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::{Extent, Record};
use crate::parser::END_MARKER;

use super::SosiHeader;

/// Coordinate marker written before every coordinate block.
const COORDINATE_MARKER: &str = "..NØH";

/// Render records to SOSI text.
///
/// Attribute lines are written verbatim, followed by the coordinate marker
/// and one `x y` pair per line. The output is always UTF-8 and the header
/// says so.
pub fn to_sosi<'a, I>(records: I, extent: &Extent, header: &SosiHeader) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut output = String::new();
    push_header(&mut output, extent, header);

    for record in records {
        for attr in &record.attributes {
            output.push_str(attr);
            output.push('\n');
        }
        output.push_str(COORDINATE_MARKER);
        output.push('\n');
        for c in record.geometry.coords() {
            output.push_str(&format!("{} {}\n", c.x, c.y));
        }
    }

    output.push_str(END_MARKER);
    output.push('\n');
    output
}

/// Write records as SOSI to any writer.
pub fn write_sosi<'a, W, I>(mut writer: W, records: I, extent: &Extent, header: &SosiHeader) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    writer.write_all(to_sosi(records, extent, header).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write records as SOSI to a file, replacing it if it exists.
pub fn write_sosi_file<'a, P, I>(path: P, records: I, extent: &Extent, header: &SosiHeader) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Record>,
{
    let file = File::create(path.as_ref())?;
    write_sosi(BufWriter::new(file), records, extent, header)?;
    log::debug!("Wrote SOSI to {}", path.as_ref().display());
    Ok(())
}

fn push_header(output: &mut String, extent: &Extent, header: &SosiHeader) {
    output.push_str(".HODE\n..TEGNSETT UTF-8\n..OMRÅDE\n");
    output.push_str(&format!("...MIN-NØ  {}  {}\n", extent.min_x, extent.min_y));
    output.push_str(&format!("...MAX-NØ  {}  {}\n", extent.max_x, extent.max_y));
    output.push_str(&format!("..SOSI-VERSJON {}\n", header.sosi_version));
    output.push_str(&format!("..SOSI-NIVÅ {}\n", header.sosi_level));
    output.push_str("..TRANSPAR\n");
    output.push_str(&format!("...KOORDSYS {}\n", header.coordinate_system));
    output.push_str(&format!(
        "...ORIGO-NØ {}  {}\n",
        header.origin.0, header.origin.1
    ));
    output.push_str(&format!("...ENHET {}\n", header.unit));
    output.push_str(&format!("...VERT-DATUM {}\n", header.vertical_datum));
    if let Some(ref archive) = header.archive {
        output.push_str(&format!("..NGIS-ARKIV \"{}\"\n", archive));
    }
    if let Some(ref catalog) = header.object_catalog {
        output.push_str(&format!("..OBJEKTKATALOG {}\n", catalog));
    }
    if let Some(ref history) = header.process_history {
        output.push_str(&format!("..PROSESS_HISTORIE \"{}\"\n", history));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coord, Geometry};

    fn sample() -> Vec<Record> {
        vec![
            Record::new(
                Geometry::LineString(vec![Coord::new(100, 200), Coord::new(110, 210)]),
                vec![".KURVE 1:".to_string(), "..OBJTYPE VL_Ledning".to_string()],
            ),
            Record::new(
                Geometry::Point(Coord::new(5, 6)),
                vec![".PUNKT 2:".to_string()],
            ),
        ]
    }

    #[test]
    fn test_header_block() {
        let output = to_sosi(&[], &Extent::new(1, 2, 3, 4), &SosiHeader::default());
        let expected = ".HODE\n..TEGNSETT UTF-8\n..OMRÅDE\n...MIN-NØ  1  2\n...MAX-NØ  3  4\n\
..SOSI-VERSJON 5.0\n..SOSI-NIVÅ 3\n..TRANSPAR\n...KOORDSYS 22\n...ORIGO-NØ 0  0\n\
...ENHET 0.000001\n...VERT-DATUM NN2000\n..NGIS-ARKIV \"Ledning_Norge\"\n\
..OBJEKTKATALOG FKBLedning 5.0\n\
..PROSESS_HISTORIE \"202402012 - Trans (Skt2lan1.dll 1.46): fra 23 til 22\"\n.SLUTT\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_record_blocks() {
        let records = sample();
        let output = to_sosi(&records, &Extent::new(5, 6, 110, 210), &SosiHeader::default());
        assert!(output.contains(
            ".KURVE 1:\n..OBJTYPE VL_Ledning\n..NØH\n100 200\n110 210\n.PUNKT 2:\n..NØH\n5 6\n.SLUTT\n"
        ));
        assert!(output.ends_with(".SLUTT\n"));
        assert_eq!(output.matches(".SLUTT").count(), 1);
    }

    #[test]
    fn test_optional_header_fields_omitted() {
        let header = SosiHeader::new()
            .with_archive(None)
            .with_object_catalog(None)
            .with_process_history(None);
        let output = to_sosi(&[], &Extent::new(0, 0, 0, 0), &header);
        assert!(!output.contains("NGIS-ARKIV"));
        assert!(!output.contains("OBJEKTKATALOG"));
        assert!(!output.contains("PROSESS_HISTORIE"));
    }

    #[test]
    fn test_write_sosi_to_buffer() {
        let records = sample();
        let mut buf = Vec::new();
        write_sosi(&mut buf, &records, &Extent::new(0, 0, 1, 1), &SosiHeader::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(".HODE\n"));
        assert!(text.contains("..NØH\n5 6\n"));
    }
}
