//! A geometry together with its attribute lines.

use serde::{Deserialize, Serialize};

use super::{Geometry, GeometryKind};

/// One SOSI object: its geometry and the raw lines that described it.
///
/// `attributes` holds the group line (e.g. `.KURVE 12:`) followed by every
/// attribute line up to the coordinate marker. The lines are kept verbatim
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub geometry: Geometry,
    pub attributes: Vec<String>,
}

impl Record {
    pub fn new(geometry: Geometry, attributes: Vec<String>) -> Self {
        Self {
            geometry,
            attributes,
        }
    }

    /// Build a record with a synthetic group line, e.g. `.PUNKT 3:`.
    pub fn with_id(geometry: Geometry, id: u64) -> Self {
        let header = format!("{} {}:", geometry.kind().marker(), id);
        Self::new(geometry, vec![header])
    }

    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }

    /// The group line that opened the record, if any.
    pub fn group_line(&self) -> Option<&str> {
        self.attributes.first().map(String::as_str)
    }

    /// Object serial number from the group line (`.KURVE 12:` gives 12).
    pub fn object_id(&self) -> Option<u64> {
        let line = self.group_line()?;
        let number = line.split_whitespace().nth(1)?;
        number.trim_end_matches(':').parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coord;

    #[test]
    fn test_object_id() {
        let record = Record::new(
            Geometry::Point(Coord::new(1, 2)),
            vec![".PUNKT 42:".to_string(), "..OBJTYPE Kum".to_string()],
        );
        assert_eq!(record.object_id(), Some(42));
        assert_eq!(record.group_line(), Some(".PUNKT 42:"));
    }

    #[test]
    fn test_object_id_missing() {
        let record = Record::new(Geometry::Point(Coord::new(1, 2)), vec![".PUNKT".to_string()]);
        assert_eq!(record.object_id(), None);

        let record = Record::new(Geometry::Point(Coord::new(1, 2)), Vec::new());
        assert_eq!(record.object_id(), None);
    }

    #[test]
    fn test_with_id() {
        let record = Record::with_id(Geometry::LineString(vec![Coord::new(0, 0)]), 7);
        assert_eq!(record.attributes, vec![".KURVE 7:".to_string()]);
        assert_eq!(record.object_id(), Some(7));
        assert_eq!(record.kind(), GeometryKind::LineString);
    }
}
