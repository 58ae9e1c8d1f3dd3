//! Buffered set-difference filters.
//!
//! One side is indexed once as a [`Footprint`]; each record of the other
//! side is then tested against it. Buffers that touch count as
//! intersecting.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::model::Record;

use super::footprint::Footprint;
use super::options::{CompareOptions, FilterMode};

/// Reference records whose buffer does not intersect the union of the
/// candidates' buffers.
///
/// Both sides are buffered by `d`, so a reference record is dropped when any
/// candidate lies within `2 * d` of it.
pub fn find_non_overlapping<'a>(
    reference: &'a [Record],
    candidates: &[Record],
    options: &CompareOptions,
) -> Result<Vec<&'a Record>> {
    options.validate()?;
    let footprint = Footprint::new(candidates, options.parallel);
    let reach = 2.0 * options.buffer_distance;

    let misses = |record: &Record| !footprint.reaches(record, reach);
    Ok(keep_where(reference, options.parallel, misses))
}

/// Test records whose geometry does not intersect the union of the base
/// records' buffers. Only the base side is buffered.
pub fn find_unique<'a>(
    base: &[Record],
    test: &'a [Record],
    options: &CompareOptions,
) -> Result<Vec<&'a Record>> {
    options.validate()?;
    if test.is_empty() {
        return Ok(Vec::new());
    }
    let footprint = Footprint::new(base, options.parallel);
    let reach = options.buffer_distance;

    let misses = |record: &Record| !footprint.reaches(record, reach);
    Ok(keep_where(test, options.parallel, misses))
}

/// Run the filter for `mode`.
///
/// `kept` is always drawn from `primary`: it is the reference set for
/// [`FilterMode::NonOverlapping`] and the test set for [`FilterMode::Unique`].
/// `other` is the set that gets buffered and indexed.
pub fn compare<'a>(
    mode: FilterMode,
    primary: &'a [Record],
    other: &'a [Record],
    options: &CompareOptions,
) -> Result<Comparison<'a>> {
    let kept = match mode {
        FilterMode::NonOverlapping => find_non_overlapping(primary, other, options)?,
        FilterMode::Unique => find_unique(other, primary, options)?,
    };
    let stats = CompareStats {
        mode: mode.to_string(),
        buffer_distance: options.buffer_distance,
        examined: primary.len(),
        compared_against: other.len(),
        kept: kept.len(),
    };
    log::info!(
        "Found {} {} records out of {} (buffer {})",
        stats.kept,
        stats.mode,
        stats.examined,
        stats.buffer_distance
    );
    Ok(Comparison { kept, stats })
}

fn keep_where<'a, F>(records: &'a [Record], parallel: bool, keep: F) -> Vec<&'a Record>
where
    F: Fn(&Record) -> bool + Sync,
{
    if parallel {
        records.par_iter().filter(|r| keep(r)).collect()
    } else {
        records.iter().filter(|r| keep(r)).collect()
    }
}

/// Filter result.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    /// Records that passed the filter, in input order
    pub kept: Vec<&'a Record>,
    /// Counts for reporting
    pub stats: CompareStats,
}

/// Statistics collected by a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompareStats {
    /// Filter that was applied
    pub mode: String,
    /// Buffer distance used
    pub buffer_distance: f64,
    /// Records examined (the side the result is drawn from)
    pub examined: usize,
    /// Records on the buffered side
    pub compared_against: usize,
    /// Records kept
    pub kept: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Coord, Geometry};

    fn point(id: u64, x: i64, y: i64) -> Record {
        Record::with_id(Geometry::Point(Coord::new(x, y)), id)
    }

    fn options(distance: f64) -> CompareOptions {
        CompareOptions::new().with_buffer_distance(distance)
    }

    #[test]
    fn test_points_far_apart_kept() {
        let a = vec![point(1, 0, 0)];
        let b = vec![point(2, 50, 0)];
        let kept = find_non_overlapping(&a, &b, &options(10.0)).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_points_with_overlapping_buffers_dropped() {
        let a = vec![point(1, 0, 0)];
        let b = vec![point(2, 50, 0)];
        let kept = find_non_overlapping(&a, &b, &options(30.0)).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_empty_candidates_keep_everything() {
        let a = vec![point(1, 0, 0), point(2, 100, 100)];
        let kept = find_non_overlapping(&a, &[], &options(10.0)).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let a: Vec<Record> = (0..10).map(|i| point(i, i as i64 * 1000, 0)).collect();
        let b = vec![point(99, 3000, 0), point(98, 7000, 0)];
        let kept = find_non_overlapping(&a, &b, &options(10.0)).unwrap();
        let ids: Vec<u64> = kept.iter().filter_map(|r| r.object_id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 4, 5, 6, 8, 9]);
    }

    #[test]
    fn test_unique_only_buffers_base() {
        // Distance 15: a buffered test point would reach the base point's
        // buffer, but the raw test point does not.
        let base = vec![point(1, 0, 0)];
        let test = vec![point(2, 15, 0)];
        let kept = find_unique(&base, &test, &options(10.0)).unwrap();
        assert_eq!(kept.len(), 1);

        let kept = find_non_overlapping(&test, &base, &options(10.0)).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_unique_inside_base_buffer() {
        let base = vec![Record::with_id(
            Geometry::LineString(vec![Coord::new(0, 0), Coord::new(100, 0)]),
            1,
        )];
        let test = vec![point(2, 50, 5), point(3, 50, 40)];
        let kept = find_unique(&base, &test, &options(10.0)).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].object_id(), Some(3));
    }

    #[test]
    fn test_unique_empty_test_set() {
        let base = vec![point(1, 0, 0)];
        let kept = find_unique(&base, &[], &options(10.0)).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_invalid_distance_rejected() {
        let a = vec![point(1, 0, 0)];
        let result = find_non_overlapping(&a, &a, &options(-1.0));
        assert!(matches!(result, Err(Error::InvalidBufferDistance(_))));
    }

    #[test]
    fn test_parallel_same_result() {
        let a: Vec<Record> = (0..50).map(|i| point(i, (i as i64) * 17, 0)).collect();
        let b: Vec<Record> = (0..50).map(|i| point(100 + i, (i as i64) * 29, 5)).collect();
        let seq = find_non_overlapping(&a, &b, &options(4.0)).unwrap();
        let par = find_non_overlapping(&a, &b, &options(4.0).with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_compare_stats() {
        let a = vec![point(1, 0, 0), point(2, 500, 0)];
        let b = vec![point(3, 5, 0)];
        let result = compare(FilterMode::NonOverlapping, &a, &b, &options(10.0)).unwrap();
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.stats.examined, 2);
        assert_eq!(result.stats.compared_against, 1);
        assert_eq!(result.stats.kept, 1);
        assert_eq!(result.stats.mode, "non-overlapping");
    }

    #[test]
    fn test_axis_tangent_buffers_overlap() {
        let a = vec![point(1, 0, 0)];
        let b = vec![point(2, 20, 0)];
        assert!(find_non_overlapping(&a, &b, &options(10.0)).unwrap().is_empty());
        assert!(find_non_overlapping(&b, &a, &options(10.0)).unwrap().is_empty());
    }

    #[test]
    fn test_diagonal_tangent_buffers_overlap() {
        let a = vec![point(1, 0, 0)];
        let b = vec![point(2, 12, 16)];
        assert!(find_non_overlapping(&a, &b, &options(10.0)).unwrap().is_empty());

        let c = vec![point(3, 12, 17)];
        assert_eq!(find_non_overlapping(&a, &c, &options(10.0)).unwrap().len(), 1);
    }

    #[test]
    fn test_unique_tangent_to_base_buffer() {
        let base = vec![point(1, 0, 0)];
        let test = vec![point(2, 6, 8), point(3, 0, 11)];
        let kept = find_unique(&base, &test, &options(10.0)).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].object_id(), Some(3));
    }
}
