//! Indexed footprint of the buffered side.
//!
//! The buffered side is indexed once in an R-tree keyed on bounding boxes.
//! A geometry reaches the footprint when its exact distance to some indexed
//! geometry is at most the reach, which is the same as saying the dilated
//! shapes intersect. Tangent buffers are at exactly the reach and count.

use geo::{Distance, Euclidean};
use rayon::prelude::*;
use rstar::{RTree, RTreeObject, AABB};

use crate::model::{Extent, Record};

/// One indexed geometry with its bounding box.
#[derive(Debug, Clone)]
struct IndexedGeometry {
    geometry: geo::Geometry<f64>,
    extent: Extent,
}

impl IndexedGeometry {
    fn from_record(record: &Record) -> Option<Self> {
        let extent = record.geometry.extent()?;
        Some(Self {
            geometry: record.geometry.to_geo(),
            extent,
        })
    }
}

impl RTreeObject for IndexedGeometry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope(&self.extent, 0.0)
    }
}

fn envelope(extent: &Extent, margin: f64) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [extent.min_x as f64 - margin, extent.min_y as f64 - margin],
        [extent.max_x as f64 + margin, extent.max_y as f64 + margin],
    )
}

/// Spatial index over one side of a comparison.
pub struct Footprint {
    tree: RTree<IndexedGeometry>,
}

impl Footprint {
    /// Index every record. Records without coordinates are left out.
    pub fn new(records: &[Record], parallel: bool) -> Self {
        let entries: Vec<IndexedGeometry> = if parallel {
            records
                .par_iter()
                .filter_map(IndexedGeometry::from_record)
                .collect()
        } else {
            records
                .iter()
                .filter_map(IndexedGeometry::from_record)
                .collect()
        };
        log::debug!("Indexed {} of {} records", entries.len(), records.len());
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed geometries.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Whether `record` lies within `reach` of any indexed geometry.
    ///
    /// Two geometries buffered by `d` intersect exactly when they are at
    /// most `2 * d` apart; a raw geometry meets a footprint buffered by `d`
    /// when it is at most `d` away.
    pub fn reaches(&self, record: &Record, reach: f64) -> bool {
        let Some(extent) = record.geometry.extent() else {
            return false;
        };
        let shape = record.geometry.to_geo();
        self.tree
            .locate_in_envelope_intersecting(&envelope(&extent, reach))
            .any(|entry| Euclidean.distance(&entry.geometry, &shape) <= reach)
    }
}
