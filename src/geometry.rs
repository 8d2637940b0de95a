//! Geodesic primitives on the unit sphere.
//!
//! These are the collaborator contracts the design treats as external:
//! angle between unit vectors, interpolation along a geodesic, distance from
//! a point to an edge, and the orientation/crossing predicates used by loop
//! assembly and containment. They live in-crate because there is no external
//! dependency this codebase can lean on for unit-sphere (as opposed to
//! WGS84-ellipsoid) geometry — see DESIGN.md for why `geographiclib-rs` was
//! dropped from the dependency set this crate inherited.

use crate::types::{Angle, UnitVec};

/// Angle between two unit vectors, computed via `atan2(|a x b|, a . b)`
/// rather than `acos(a . b)` for numerical stability near 0 and pi.
#[must_use]
pub fn angle(a: UnitVec, b: UnitVec) -> Angle {
  let cross_norm = a.cross(b).norm();
  let dot = a.dot(b).clamp(-1.0, 1.0);
  Angle::from_radians(cross_norm.atan2(dot))
}

/// Point a fraction `t` along the geodesic from `a` to `b` (spherical linear
/// interpolation), renormalized to the unit sphere. `t = 0` returns `a`,
/// `t = 1` returns `b`.
#[must_use]
pub fn interpolate(t: f64, a: UnitVec, b: UnitVec) -> UnitVec {
  let theta = angle(a, b).radians();
  if theta < 1e-15 {
    return a;
  }
  let sin_theta = theta.sin();
  let wa = ((1.0 - t) * theta).sin() / sin_theta;
  let wb = (t * theta).sin() / sin_theta;
  a.scale(wa).add(b.scale(wb)).renormalized()
}

/// Orientation of the ordered triple `(a, b, c)`: positive for
/// counter-clockwise as seen from outside the sphere, negative for
/// clockwise, zero (within tolerance) for collinear (on a common great
/// circle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
  CounterClockwise,
  Clockwise,
  Collinear,
}

/// Robust-ish orientation predicate via the scalar triple product
/// `(a x b) . c`. Exact symbolic perturbation (as a true robustness layer
/// would use) is out of scope; an epsilon band around zero is treated as
/// collinear, consistent with every other angular comparison in this crate.
#[must_use]
pub fn sign(a: UnitVec, b: UnitVec, c: UnitVec) -> Orientation {
  let value = a.cross(b).dot(c);
  if value > crate::constants::ANGLE_EPSILON_RAD {
    Orientation::CounterClockwise
  } else if value < -crate::constants::ANGLE_EPSILON_RAD {
    Orientation::Clockwise
  } else {
    Orientation::Collinear
  }
}

/// Geodesic distance from `p` to the shorter arc `(a, b)`.
///
/// Computes the cross-track distance to the great circle through `a` and
/// `b`, then checks whether the closest point on that circle actually falls
/// within the `[a, b]` arc; if not, falls back to the nearer endpoint.
#[must_use]
pub fn distance_to_edge(p: UnitVec, a: UnitVec, b: UnitVec) -> Angle {
  let ab_angle = angle(a, b).radians();
  if ab_angle < 1e-15 {
    return angle(p, a);
  }

  let normal = a.cross(b).renormalized();
  let cross_track = p.dot(normal).clamp(-1.0, 1.0).asin();

  // Foot of the perpendicular from `p` onto the great circle through a, b.
  let foot = p.sub(normal.scale(p.dot(normal))).renormalized();

  let foot_on_arc = {
    let total = angle(a, b).radians();
    let split = angle(a, foot).radians() + angle(foot, b).radians();
    (split - total).abs() < crate::constants::ANGLE_EPSILON_RAD
  };

  if foot_on_arc {
    Angle::from_radians(cross_track.abs())
  } else {
    angle(p, a).min_with(angle(p, b))
  }
}

impl Angle {
  #[must_use]
  pub(crate) fn min_with(self, other: Self) -> Self {
    if self.radians() <= other.radians() {
      self
    } else {
      other
    }
  }
}

/// `true` if segments `(a, b)` and `(c, d)` cross at an interior point of
/// both (shared endpoints do not count as a crossing).
#[must_use]
pub fn segments_cross(a: UnitVec, b: UnitVec, c: UnitVec, d: UnitVec) -> bool {
  if a.is_same_vertex(c) || a.is_same_vertex(d) || b.is_same_vertex(c) || b.is_same_vertex(d) {
    return false;
  }
  let s1 = sign(a, b, c);
  let s2 = sign(a, b, d);
  let s3 = sign(c, d, a);
  let s4 = sign(c, d, b);

  s1 != Orientation::Collinear
    && s2 != Orientation::Collinear
    && s3 != Orientation::Collinear
    && s4 != Orientation::Collinear
    && s1 != s2
    && s3 != s4
}

/// Signed turning angle at `via`, arriving from `prev` and departing towards
/// `next`. Positive values turn left (counter-clockwise as seen from
/// outside the sphere at `via`), negative values turn right. Used by the
/// loop assembler's "least to the left" continuation rule.
#[must_use]
pub fn signed_turn(prev: UnitVec, via: UnitVec, next: UnitVec) -> f64 {
  let tangent_towards = |to: UnitVec| -> UnitVec { to.sub(via.scale(via.dot(to))).renormalized() };

  let incoming_tangent = tangent_towards(prev);
  let outgoing_tangent = tangent_towards(next);
  // Direction of travel on arrival at `via` is the reverse of the tangent
  // pointing back towards `prev`.
  let arrival_direction = incoming_tangent.scale(-1.0);

  let cross = arrival_direction.cross(outgoing_tangent);
  let sin_component = cross.dot(via);
  let cos_component = arrival_direction.dot(outgoing_tangent);
  sin_component.atan2(cos_component)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn v(lat: f64, lng: f64) -> UnitVec {
    UnitVec::from_lat_lng_deg(lat, lng)
  }

  #[test]
  fn angle_between_equator_points() {
    let a = v(0.0, 0.0);
    let b = v(0.0, 90.0);
    assert!((angle(a, b).radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
  }

  #[test]
  fn angle_is_symmetric_and_zero_for_identical() {
    let a = v(12.0, 34.0);
    assert_eq!(angle(a, a).radians(), 0.0);
  }

  #[test]
  fn interpolate_midpoint_is_equidistant() {
    let a = v(0.0, 0.0);
    let b = v(0.0, 10.0);
    let mid = interpolate(0.5, a, b);
    let da = angle(a, mid).radians();
    let db = angle(mid, b).radians();
    assert!((da - db).abs() < 1e-9);
  }

  #[test]
  fn distance_to_edge_is_zero_on_the_arc() {
    let a = v(0.0, 0.0);
    let b = v(0.0, 10.0);
    let on_arc = interpolate(0.3, a, b);
    let d = distance_to_edge(on_arc, a, b);
    assert!(d.radians() < 1e-9);
  }

  #[test]
  fn distance_to_edge_falls_back_to_endpoint_beyond_arc() {
    let a = v(0.0, 0.0);
    let b = v(0.0, 10.0);
    let beyond = v(0.0, 20.0);
    let d = distance_to_edge(beyond, a, b);
    let expected = angle(beyond, b).radians();
    assert!((d.radians() - expected).abs() < 1e-9);
  }

  #[test]
  fn crossing_bowtie_segments_detected() {
    let a = v(0.0, 0.0);
    let b = v(10.0, 10.0);
    let c = v(0.0, 10.0);
    let d = v(10.0, 0.0);
    assert!(segments_cross(a, b, c, d));
  }

  #[test]
  fn non_crossing_segments_not_detected() {
    let a = v(0.0, 0.0);
    let b = v(0.0, 10.0);
    let c = v(5.0, 0.0);
    let d = v(5.0, 10.0);
    assert!(!segments_cross(a, b, c, d));
  }

  #[test]
  fn straight_continuation_has_near_zero_turn() {
    let prev = v(0.0, -10.0);
    let via = v(0.0, 0.0);
    let next = v(0.0, 10.0);
    let turn = signed_turn(prev, via, next);
    assert!(turn.abs() < 1e-6);
  }
}
