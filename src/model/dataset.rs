//! Dataset-level types.

use serde::{Deserialize, Serialize};

use super::{Extent, GeometryKind, Record};

/// All records read from one SOSI file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Accepted records in file order
    pub records: Vec<Record>,

    /// Extent over the coordinates of accepted records
    pub extent: Option<Extent>,

    /// Counters collected while parsing
    pub stats: ParseStats,
}

impl Dataset {
    /// Create a new empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from records, computing the extent.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut dataset = Self::new();
        for record in records {
            dataset.push(record);
        }
        dataset
    }

    /// Append a record and widen the extent to cover it.
    ///
    /// A geometry without coordinates leaves the extent as it was.
    pub fn push(&mut self, record: Record) {
        let extent = record.geometry.extent();
        self.push_covering(record, extent);
    }

    /// Append a record and widen the extent by `extent` instead of the
    /// record's own geometry. Used when the record was read from more
    /// coordinates than its geometry keeps.
    pub(crate) fn push_covering(&mut self, record: Record, extent: Option<Extent>) {
        self.extent = Extent::combine(self.extent, extent);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records of the given kind.
    pub fn count_kind(&self, kind: GeometryKind) -> usize {
        self.records.iter().filter(|r| r.kind() == kind).count()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Counters collected while parsing a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines read
    pub line_count: usize,

    /// Coordinate lines skipped because they did not hold two integers
    pub malformed_coordinates: usize,

    /// Records dropped for failing their kind's minimum shape
    pub dropped_records: usize,

    /// Groups other than the geometry kinds (e.g. `.TEKST`) that were skipped
    pub ignored_groups: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coord, Geometry};

    #[test]
    fn test_push_updates_extent() {
        let mut dataset = Dataset::new();
        assert!(dataset.extent.is_none());

        dataset.push(Record::with_id(Geometry::Point(Coord::new(10, 10)), 1));
        assert_eq!(dataset.extent, Some(Extent::new(10, 10, 10, 10)));

        dataset.push(Record::with_id(
            Geometry::LineString(vec![Coord::new(-5, 0), Coord::new(3, 40)]),
            2,
        ));
        assert_eq!(dataset.extent, Some(Extent::new(-5, 0, 10, 40)));
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_push_empty_geometry() {
        let mut dataset = Dataset::new();
        dataset.push(Record::new(
            Geometry::LineString(Vec::new()),
            vec![".KURVE 1:".to_string()],
        ));
        assert_eq!(dataset.len(), 1);
        assert!(dataset.extent.is_none());

        dataset.push(Record::with_id(Geometry::Point(Coord::new(4, 2)), 2));
        assert_eq!(dataset.extent, Some(Extent::new(4, 2, 4, 2)));
    }

    #[test]
    fn test_count_kind() {
        let dataset = Dataset::from_records(vec![
            Record::with_id(Geometry::Point(Coord::new(0, 0)), 1),
            Record::with_id(Geometry::Point(Coord::new(1, 1)), 2),
            Record::with_id(Geometry::LineString(vec![Coord::new(0, 0)]), 3),
        ]);
        assert_eq!(dataset.count_kind(GeometryKind::Point), 2);
        assert_eq!(dataset.count_kind(GeometryKind::LineString), 1);
        assert_eq!(dataset.count_kind(GeometryKind::Polygon), 0);
    }
}
