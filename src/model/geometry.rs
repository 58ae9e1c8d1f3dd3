//! Geometry types.

use serde::{Deserialize, Serialize};

use super::Extent;

/// An integer coordinate pair as stored in the file (raw SOSI units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    /// Create a coordinate.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for geo::Coord<f64> {
    fn from(c: Coord) -> Self {
        geo::Coord {
            x: c.x as f64,
            y: c.y as f64,
        }
    }
}

/// Record kind, fixed by the group keyword that starts the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// `.PUNKT`
    Point,
    /// `.KURVE`
    LineString,
    /// `.FLATE`
    Polygon,
}

impl GeometryKind {
    /// All kinds, in marker order.
    pub const ALL: [GeometryKind; 3] = [
        GeometryKind::LineString,
        GeometryKind::Point,
        GeometryKind::Polygon,
    ];

    /// The group keyword for this kind.
    pub fn marker(&self) -> &'static str {
        match self {
            GeometryKind::Point => ".PUNKT",
            GeometryKind::LineString => ".KURVE",
            GeometryKind::Polygon => ".FLATE",
        }
    }

    /// Look up a kind by its exact group keyword.
    pub fn from_marker(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.marker() == token)
    }

    /// Minimum number of coordinate pairs a record of this kind needs.
    pub fn min_coords(&self) -> usize {
        match self {
            GeometryKind::Point | GeometryKind::LineString => 1,
            GeometryKind::Polygon => 4,
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        };
        f.write_str(name)
    }
}

/// A record geometry.
///
/// The set of variants is closed: the file grammar only knows these three
/// geometry-bearing groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
    /// Exterior ring; closure is implied.
    Polygon(Vec<Coord>),
}

impl Geometry {
    /// Build a geometry of `kind` from accumulated coordinates.
    ///
    /// Returns `None` when the coordinates do not satisfy the kind's
    /// minimum shape. A point keeps only its first coordinate.
    pub fn from_parts(kind: GeometryKind, coords: Vec<Coord>) -> Option<Self> {
        if coords.len() < kind.min_coords() {
            return None;
        }
        match kind {
            GeometryKind::Point => coords.first().copied().map(Geometry::Point),
            GeometryKind::LineString => Some(Geometry::LineString(coords)),
            GeometryKind::Polygon => Some(Geometry::Polygon(coords)),
        }
    }

    /// Geometry kind.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// Coordinates in file order.
    pub fn coords(&self) -> &[Coord] {
        match self {
            Geometry::Point(c) => std::slice::from_ref(c),
            Geometry::LineString(cs) | Geometry::Polygon(cs) => cs,
        }
    }

    /// Bounding extent of this geometry, `None` if it has no coordinates.
    pub fn extent(&self) -> Option<Extent> {
        Extent::from_coords(self.coords().iter().copied())
    }

    /// Convert to a `geo` geometry in floating point.
    ///
    /// A single-vertex line becomes a point; `geo` cannot represent a
    /// one-coordinate line meaningfully.
    pub fn to_geo(&self) -> geo::Geometry<f64> {
        match self {
            Geometry::Point(c) => geo::Geometry::Point(geo::Point::from(geo::Coord::from(*c))),
            Geometry::LineString(cs) if cs.len() == 1 => {
                geo::Geometry::Point(geo::Point::from(geo::Coord::from(cs[0])))
            }
            Geometry::LineString(cs) => geo::Geometry::LineString(to_line_string(cs)),
            Geometry::Polygon(cs) => {
                geo::Geometry::Polygon(geo::Polygon::new(to_line_string(cs), vec![]))
            }
        }
    }
}

fn to_line_string(coords: &[Coord]) -> geo::LineString<f64> {
    geo::LineString::new(coords.iter().map(|c| geo::Coord::from(*c)).collect())
}
