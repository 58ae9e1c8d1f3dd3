//! Data model for SOSI content.
//!
//! Records pair a geometry with the raw attribute lines that preceded its
//! coordinates. The attribute lines are opaque: nothing in this crate
//! interprets the cadastral codes they carry.

mod dataset;
mod extent;
mod geometry;
mod record;

pub use dataset::{Dataset, ParseStats};
pub use extent::Extent;
pub use geometry::{Coord, Geometry, GeometryKind};
pub use record::Record;
