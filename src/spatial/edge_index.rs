use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::geometry::distance_to_edge;
use crate::types::{Angle, DirectedEdge, UnitVec};

#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedEdge {
  edge: DirectedEdge,
  id: usize,
}

impl RTreeObject for IndexedEdge {
  type Envelope = AABB<[f64; 3]>;

  fn envelope(&self) -> Self::Envelope {
    let a = [self.edge.src.x, self.edge.src.y, self.edge.src.z];
    let b = [self.edge.dst.x, self.edge.dst.y, self.edge.dst.z];
    AABB::from_points([a, b].iter())
  }
}

impl PointDistance for IndexedEdge {
  fn distance_2(&self, query: &[f64; 3]) -> f64 {
    let p = UnitVec {
      x: query[0],
      y: query[1],
      z: query[2],
    };
    let d = distance_to_edge(p, self.edge.src, self.edge.dst).radians();
    d * d
  }
}

/// Fixed-radius spatial index over geodesic edges.
///
/// Collaborator contract consumed by the edge splicer: "enumerate edges
/// whose distance from a query point is <= r". Distances are measured and
/// thresholded in angular radians (not chordal distance) throughout, since
/// envelope (Euclidean) distance is a valid lower bound on geodesic
/// distance-to-segment, which is all `rstar`'s pruning requires.
pub(crate) struct EdgeIndex {
  tree: RTree<IndexedEdge>,
}

impl EdgeIndex {
  pub(crate) fn build(edges: &[DirectedEdge]) -> Self {
    let entries = edges
      .iter()
      .enumerate()
      .map(|(id, &edge)| IndexedEdge { edge, id })
      .collect();
    Self {
      tree: RTree::bulk_load(entries),
    }
  }

  /// Ids of every edge passing within angular radius `r` of `query`.
  pub(crate) fn within(&self, query: UnitVec, r: Angle) -> Vec<usize> {
    let threshold = r.radians() * r.radians();
    let q = [query.x, query.y, query.z];
    self
      .tree
      .locate_within_distance(q, threshold)
      .map(|entry| entry.id)
      .collect()
  }
}
