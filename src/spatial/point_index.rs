use rstar::{PointDistance, RTree, RTreeObject, AABB};

use super::chord_distance_squared_for_angle;
use crate::types::{Angle, UnitVec};

#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedPoint {
  point: UnitVec,
  id: usize,
}

impl RTreeObject for IndexedPoint {
  type Envelope = AABB<[f64; 3]>;

  fn envelope(&self) -> Self::Envelope {
    AABB::from_point([self.point.x, self.point.y, self.point.z])
  }
}

impl PointDistance for IndexedPoint {
  fn distance_2(&self, query: &[f64; 3]) -> f64 {
    let dx = self.point.x - query[0];
    let dy = self.point.y - query[1];
    let dz = self.point.z - query[2];
    dx * dx + dy * dy + dz * dz
  }
}

/// Fixed-radius spatial index over points on the unit sphere.
///
/// Collaborator contract consumed by the vertex cluster finder: "enumerate
/// sites whose distance from a query point is <= r".
pub(crate) struct PointIndex {
  tree: RTree<IndexedPoint>,
}

impl PointIndex {
  /// Build an index over `points`, where `points[i]`'s payload id is `i`.
  pub(crate) fn build(points: &[UnitVec]) -> Self {
    let entries = points
      .iter()
      .enumerate()
      .map(|(id, &point)| IndexedPoint { point, id })
      .collect();
    Self {
      tree: RTree::bulk_load(entries),
    }
  }

  /// Ids of every point within angular radius `r` of `query` (including any
  /// point coincident with `query` itself).
  pub(crate) fn within(&self, query: UnitVec, r: Angle) -> Vec<usize> {
    let threshold = chord_distance_squared_for_angle(r);
    let q = [query.x, query.y, query.z];
    self
      .tree
      .locate_within_distance(q, threshold)
      .map(|entry| entry.id)
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn v(lat: f64, lng: f64) -> UnitVec {
    UnitVec::from_lat_lng_deg(lat, lng)
  }

  #[test]
  fn finds_nearby_points_within_radius() {
    let points = vec![v(0.0, 0.0), v(0.0, 1.0), v(0.0, 50.0)];
    let index = PointIndex::build(&points);
    let hits = index.within(v(0.0, 0.0), Angle::from_degrees(2.0));
    assert_eq!(hits.len(), 2);
    assert!(hits.contains(&0));
    assert!(hits.contains(&1));
    assert!(!hits.contains(&2));
  }

  #[test]
  fn zero_radius_only_matches_coincident_points() {
    let points = vec![v(0.0, 0.0), v(0.0, 0.0), v(1.0, 1.0)];
    let index = PointIndex::build(&points);
    let hits = index.within(v(0.0, 0.0), Angle::ZERO);
    assert_eq!(hits.len(), 2);
  }
}
