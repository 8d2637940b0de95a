//! Spatial indices over points and edges on the unit sphere, built on
//! `rstar`.
//!
//! Both indices use plain Euclidean (chordal) coordinates as the underlying
//! `rstar::Point`. Chordal distance is a monotone function of geodesic angle
//! on the unit sphere (`chord^2 = 2 - 2 cos(angle)`), so radius queries
//! expressed in chordal-distance-squared are exactly equivalent to the
//! angular fixed-radius queries the design calls for, without needing a
//! sphere-aware R-tree.

mod edge_index;
mod point_index;

pub(crate) use edge_index::EdgeIndex;
pub(crate) use point_index::PointIndex;

use crate::types::Angle;

/// Convert an angular radius to the squared chordal distance threshold used
/// by the underlying `rstar` indices.
#[must_use]
pub(crate) fn chord_distance_squared_for_angle(r: Angle) -> f64 {
  let clamped = r.radians().max(0.0);
  2.0 - 2.0 * clamped.cos()
}
