//! Buffer polygons for drawing.
//!
//! A buffer is the dilation of a geometry by the buffer distance. Points
//! become discs, lines become round-capped corridors, polygons grow by the
//! distance on every side.

use geo::{Buffer, MultiPolygon};

use crate::model::Geometry;

/// Buffer one geometry.
pub fn buffer_geometry(geometry: &Geometry, distance: f64) -> MultiPolygon<f64> {
    geometry.to_geo().buffer(distance)
}
