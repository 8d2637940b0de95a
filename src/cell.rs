//! A discrete hierarchical cell grid over the unit sphere, used for
//! optional vertex snapping.
//!
//! The sphere is projected onto the six faces of its bounding cube; each
//! face is subdivided into a `2^level x 2^level` grid. This is the same
//! cube-projection idea used by every sphere-quadtree scheme (S2, HEALPix
//! variants, etc.); the projection here is the simplest linear (gnomonic)
//! one rather than the area-equalizing quadratic one real S2 uses, since
//! this design only needs a valid, monotone-decreasing per-level diagonal
//! bound, not an equal-area tiling.

use crate::constants::CELL_GRID_LEVELS;
use crate::types::{Angle, UnitVec};

/// Upper bound, per level, on the diagonal of a single grid cell. Level 0
/// covers a full cube face; each subsequent level halves linear cell size,
/// so the diagonal bound halves too.
const BASE_DIAG_RAD: f64 = std::f64::consts::FRAC_PI_2;

/// Maximum cell diagonal (radians) at `level`, monotone decreasing in
/// `level`. Levels beyond [`CELL_GRID_LEVELS`] are not supported.
#[must_use]
pub(crate) fn max_diag(level: usize) -> Angle {
  Angle::from_radians(BASE_DIAG_RAD / 2f64.powi(level as i32))
}

/// Deepest level whose `max_diag(level) / 2 <= robustness_radius`, or
/// `None` if even level 0 fails to satisfy the budget.
#[must_use]
pub(crate) fn snap_level_for_robustness(robustness_radius: Angle) -> Option<usize> {
  (0..=CELL_GRID_LEVELS)
    .rev()
    .find(|&level| max_diag(level).radians() / 2.0 <= robustness_radius.radians())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
  PosX,
  NegX,
  PosY,
  NegY,
  PosZ,
  NegZ,
}

fn face_and_uv(p: UnitVec) -> (Face, f64, f64) {
  let (ax, ay, az) = (p.x.abs(), p.y.abs(), p.z.abs());
  if ax >= ay && ax >= az {
    if p.x > 0.0 {
      (Face::PosX, p.y / p.x, p.z / p.x)
    } else {
      (Face::NegX, p.y / p.x, p.z / p.x)
    }
  } else if ay >= ax && ay >= az {
    if p.y > 0.0 {
      (Face::PosY, p.x / p.y, p.z / p.y)
    } else {
      (Face::NegY, p.x / p.y, p.z / p.y)
    }
  } else if p.z > 0.0 {
    (Face::PosZ, p.x / p.z, p.y / p.z)
  } else {
    (Face::NegZ, p.x / p.z, p.y / p.z)
  }
}

fn face_uv_to_point(face: Face, u: f64, v: f64) -> UnitVec {
  let raw = match face {
    Face::PosX => (1.0, u, v),
    Face::NegX => (-1.0, u, v),
    Face::PosY => (u, 1.0, v),
    Face::NegY => (u, -1.0, v),
    Face::PosZ => (u, v, 1.0),
    Face::NegZ => (u, v, -1.0),
  };
  UnitVec::from_xyz(raw.0, raw.1, raw.2).expect("cube face coordinate is never the zero vector")
}

/// Quantize `u` (or `v`), clamped to `[-1, 1]`, to the center of its cell on
/// a `2^level`-wide axis.
fn quantize(coord: f64, level: usize) -> f64 {
  let cells_per_axis = 2f64.powi(level as i32);
  let clamped = coord.clamp(-1.0, 1.0);
  let normalized = (clamped + 1.0) / 2.0; // in [0, 1]
  let index = (normalized * cells_per_axis).floor().min(cells_per_axis - 1.0);
  let center_normalized = (index + 0.5) / cells_per_axis;
  center_normalized * 2.0 - 1.0
}

/// Center of the grid cell at `level` containing `p`.
#[must_use]
pub(crate) fn cell_center(p: UnitVec, level: usize) -> UnitVec {
  let (face, u, v) = face_and_uv(p);
  let qu = quantize(u, level);
  let qv = quantize(v, level);
  face_uv_to_point(face, qu, qv)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn max_diag_is_monotone_decreasing() {
    for level in 0..CELL_GRID_LEVELS {
      assert!(max_diag(level).radians() > max_diag(level + 1).radians());
    }
  }

  #[test]
  fn cell_center_displacement_is_bounded_by_half_diagonal() {
    let p = UnitVec::from_lat_lng_deg(10.0, 20.0);
    for level in [0usize, 4, 10, 20] {
      let center = cell_center(p, level);
      let displacement = crate::geometry::angle(p, center).radians();
      assert!(displacement <= max_diag(level).radians(), "level {level}");
    }
  }

  #[test]
  fn snapping_is_idempotent() {
    let p = UnitVec::from_lat_lng_deg(-45.0, 123.0);
    let once = cell_center(p, 12);
    let twice = cell_center(once, 12);
    assert_eq!(once.key(), twice.key());
  }

  #[test]
  fn snap_level_picks_deepest_satisfying_level() {
    let level = snap_level_for_robustness(Angle::from_radians(max_diag(10).radians() / 2.0)).unwrap();
    assert!(level >= 10);
  }

  #[test]
  fn snap_level_none_when_budget_tighter_than_finest_level_can_achieve() {
    let level = snap_level_for_robustness(Angle::from_radians(max_diag(CELL_GRID_LEVELS).radians() / 4.0));
    assert_eq!(level, None);
  }
}
