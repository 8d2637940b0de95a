//! Builds simple, non-crossing spherical loops (and optionally a nested
//! polygon) out of an unordered collection of directed or undirected
//! geodesic edges on the unit sphere.
//!
//! Typical use:
//!
//! ```
//! use geosplice::{Builder, BuilderOptions, UnitVec};
//!
//! let options = BuilderOptions::builder().build().unwrap();
//! let mut builder = Builder::new(options);
//! builder.add_loop(&[
//!   UnitVec::from_lat_lng_deg(0.0, 0.0),
//!   UnitVec::from_lat_lng_deg(0.0, 10.0),
//!   UnitVec::from_lat_lng_deg(10.0, 5.0),
//! ]);
//! let result = builder.assemble_loops();
//! assert_eq!(result.loops.len(), 1);
//! ```

#[cfg(feature = "python")]
mod python;

mod assemble;
mod builder;
mod cell;
mod cluster;
mod constants;
mod containment;
mod edge_store;
mod error;
mod geometry;
mod options;
mod splice;
mod spatial;
mod types;
mod union_find;

pub use builder::{AssembleResult, Builder, PolygonAssembleResult, PolygonLoop};
pub use error::BuilderError;
pub use options::{BuilderOptions, BuilderOptionsBuilder, StartRotation};
pub use types::{Angle, DirectedEdge, Polygon, UnitVec};
