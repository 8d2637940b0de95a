//! Core value types: unit vectors, angles, and directed edges.

use crate::constants::{ANTIPODAL_EDGE_EPSILON_RAD, DEGENERATE_EDGE_EPSILON_RAD};
use crate::error::BuilderError;

/// An angle, stored internally in radians.
///
/// Comparisons are exact `f64` comparisons; callers wanting fuzzy comparisons
/// should go through [`crate::constants::ANGLE_EPSILON_RAD`] explicitly,
/// the same way the rest of this crate treats angular tolerance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
  pub const ZERO: Self = Self(0.0);

  #[must_use]
  pub const fn from_radians(radians: f64) -> Self {
    Self(radians)
  }

  #[must_use]
  pub fn from_degrees(degrees: f64) -> Self {
    Self(degrees.to_radians())
  }

  #[must_use]
  pub const fn radians(self) -> f64 {
    self.0
  }

  #[must_use]
  pub fn degrees(self) -> f64 {
    self.0.to_degrees()
  }

  #[must_use]
  pub fn is_finite_non_negative(self) -> bool {
    self.0.is_finite() && self.0 >= 0.0
  }
}

/// A point on the unit sphere, represented as three Cartesian coordinates.
///
/// Equality at the design level is identity of the double triple (used via
/// [`VertexKey`] for hashmap lookups); "nearness" always goes through
/// [`crate::geometry::angle`] instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVec {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

impl UnitVec {
  /// Build a unit vector from Cartesian coordinates, normalizing in the
  /// process.
  ///
  /// # Errors
  /// Returns [`BuilderError::ZeroLengthVector`] if `(x, y, z)` is (close to)
  /// the zero vector and cannot be normalized.
  pub fn from_xyz(x: f64, y: f64, z: f64) -> Result<Self, BuilderError> {
    let norm = (x * x + y * y + z * z).sqrt();
    if !norm.is_finite() || norm < 1e-300 {
      return Err(BuilderError::ZeroLengthVector { x, y, z });
    }
    Ok(Self {
      x: x / norm,
      y: y / norm,
      z: z / norm,
    })
  }

  /// Build a unit vector from geographic coordinates in degrees.
  ///
  /// Infallible: every `(lat, lng)` pair maps to a point on the sphere. Out
  /// of domain latitudes are not rejected here; callers validating user
  /// input should range-check before calling.
  #[must_use]
  pub fn from_lat_lng_deg(lat_deg: f64, lng_deg: f64) -> Self {
    let lat = lat_deg.to_radians();
    let lng = lng_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lng, cos_lng) = lng.sin_cos();
    Self {
      x: cos_lat * cos_lng,
      y: cos_lat * sin_lng,
      z: sin_lat,
    }
  }

  #[must_use]
  pub fn dot(self, other: Self) -> f64 {
    self.x * other.x + self.y * other.y + self.z * other.z
  }

  #[must_use]
  pub fn cross(self, other: Self) -> Self {
    Self {
      x: self.y * other.z - self.z * other.y,
      y: self.z * other.x - self.x * other.z,
      z: self.x * other.y - self.y * other.x,
    }
  }

  #[must_use]
  pub fn norm(self) -> f64 {
    self.dot(self).sqrt()
  }

  #[must_use]
  pub fn scale(self, s: f64) -> Self {
    Self {
      x: self.x * s,
      y: self.y * s,
      z: self.z * s,
    }
  }

  #[must_use]
  pub fn add(self, other: Self) -> Self {
    Self {
      x: self.x + other.x,
      y: self.y + other.y,
      z: self.z + other.z,
    }
  }

  #[must_use]
  pub fn sub(self, other: Self) -> Self {
    Self {
      x: self.x - other.x,
      y: self.y - other.y,
      z: self.z - other.z,
    }
  }

  /// Renormalize, used after averaging or interpolating.
  ///
  /// Falls back to `self` unchanged if the result would be degenerate; in
  /// practice this only happens for exactly antipodal inputs, which callers
  /// are expected to have already rejected as degenerate edges.
  #[must_use]
  pub fn renormalized(self) -> Self {
    let norm = self.norm();
    if norm < 1e-300 {
      return self;
    }
    self.scale(1.0 / norm)
  }

  #[must_use]
  pub(crate) fn key(self) -> VertexKey {
    VertexKey::from(self)
  }

  /// `true` when `self` and `other` are the same vertex for the purposes of
  /// degenerate-edge rejection.
  #[must_use]
  pub fn is_same_vertex(self, other: Self) -> bool {
    self.key() == other.key() || crate::geometry::angle(self, other).radians() < DEGENERATE_EDGE_EPSILON_RAD
  }

  /// `true` when `self` and `other` are antipodal: the edge between them has
  /// no well-defined shorter arc, so it too is rejected as degenerate.
  #[must_use]
  pub fn is_antipodal_vertex(self, other: Self) -> bool {
    (std::f64::consts::PI - crate::geometry::angle(self, other).radians()).abs() < ANTIPODAL_EDGE_EPSILON_RAD
  }
}

/// Bit-identity key for a [`UnitVec`], used wherever the design calls for
/// "identity of double triples" (hash-map keys, dedup sets). Two vectors
/// compare equal under this key iff every coordinate is bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct VertexKey(u64, u64, u64);

impl From<UnitVec> for VertexKey {
  fn from(v: UnitVec) -> Self {
    Self(v.x.to_bits(), v.y.to_bits(), v.z.to_bits())
  }
}

/// A directed geodesic edge: the shorter arc from `src` to `dst`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedEdge {
  pub src: UnitVec,
  pub dst: UnitVec,
}

impl DirectedEdge {
  #[must_use]
  pub const fn new(src: UnitVec, dst: UnitVec) -> Self {
    Self { src, dst }
  }

  #[must_use]
  pub const fn reversed(self) -> Self {
    Self {
      src: self.dst,
      dst: self.src,
    }
  }
}

/// A polygon expressed as an exterior ring plus interior holes, supplied by
/// the caller to [`crate::Builder::add_polygon`]. Rings need not be closed
/// explicitly (last vertex equal to first); both forms are accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
  pub exterior: Vec<UnitVec>,
  pub holes: Vec<Vec<UnitVec>>,
}

impl Polygon {
  #[must_use]
  pub const fn new(exterior: Vec<UnitVec>, holes: Vec<Vec<UnitVec>>) -> Self {
    Self { exterior, holes }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalizes_on_construction() {
    let v = UnitVec::from_xyz(3.0, 0.0, 0.0).unwrap();
    assert!((v.norm() - 1.0).abs() < 1e-12);
    assert_eq!(v.x, 1.0);
  }

  #[test]
  fn rejects_zero_vector() {
    let result = UnitVec::from_xyz(0.0, 0.0, 0.0);
    assert!(matches!(result, Err(BuilderError::ZeroLengthVector { .. })));
  }

  #[test]
  fn lat_lng_round_trips_poles() {
    let north = UnitVec::from_lat_lng_deg(90.0, 0.0);
    assert!((north.z - 1.0).abs() < 1e-9);
  }

  #[test]
  fn vertex_key_is_bit_identity() {
    let a = UnitVec::from_lat_lng_deg(10.0, 20.0);
    let b = UnitVec::from_lat_lng_deg(10.0, 20.0);
    let c = UnitVec::from_lat_lng_deg(10.0, 20.0001);
    assert_eq!(a.key(), b.key());
    assert_ne!(a.key(), c.key());
  }
}
