//! Buffered comparison of two datasets.
//!
//! Both filters answer "which records have no counterpart on the other
//! side within the buffer distance":
//!
//! - [`find_non_overlapping`] buffers both sides and keeps reference records
//!   whose buffer misses every candidate buffer.
//! - [`find_unique`] buffers only the base side and keeps test records that
//!   miss it.
//!
//! Intersection is decided on exact distances against an R-tree
//! [`Footprint`], so buffers that just touch count as overlapping.
//! [`buffer_geometry`] builds the polygonal buffers used for drawing.
//!
//! # Example
//!
//! ```no_run
//! use sosidiff::compare::{find_non_overlapping, CompareOptions};
//!
//! fn main() -> sosidiff::Result<()> {
//!     let fkb = sosidiff::parse_file("Liten_FKB.SOS")?;
//!     let everk = sosidiff::parse_file("Liten_Everk.SOS")?;
//!
//!     let options = CompareOptions::new().with_buffer_distance(10.0);
//!     let kept = find_non_overlapping(&fkb.records, &everk.records, &options)?;
//!     println!("Found {} non-overlapping geometries.", kept.len());
//!     Ok(())
//! }
//! ```

mod buffer;
mod filter;
mod footprint;
mod options;

pub use buffer::buffer_geometry;
pub use filter::{compare, find_non_overlapping, find_unique, CompareStats, Comparison};
pub use footprint::Footprint;
pub use options::{CompareOptions, FilterMode, DEFAULT_BUFFER_DISTANCE};
