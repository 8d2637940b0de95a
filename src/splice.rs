//! Edge splicer (component D): when a vertex lies within
//! `splice_radius` of an edge it does not touch, the edge is split at that
//! vertex's position. Iterates to a fixed point since inserting a split
//! point creates two shorter edges that a different vertex might now be
//! close enough to split again.

use std::collections::{HashMap, HashSet};

use crate::constants::MAX_SPLICE_PASSES;
use crate::edge_store::EdgeStore;
use crate::geometry::angle;
use crate::spatial::EdgeIndex;
use crate::types::{Angle, UnitVec, VertexKey};

/// Splice `store` in place. Returns the number of passes that performed at
/// least one split (0 if the initial edge set was already splice-stable).
pub(crate) fn splice_edges(store: &mut EdgeStore, radius: Angle) -> usize {
  if radius.radians() <= 0.0 {
    return 0;
  }

  let mut passes_with_splits = 0;
  for _ in 0..MAX_SPLICE_PASSES {
    let edges = store.edges();
    if edges.is_empty() {
      break;
    }

    let vertices = distinct_vertices(&edges);
    let index = EdgeIndex::build(&edges);

    let mut splits_per_edge: HashMap<usize, Vec<UnitVec>> = HashMap::new();
    for &v in &vertices {
      for edge_id in index.within(v, radius) {
        let edge = edges[edge_id];
        if edge.src.is_same_vertex(v) || edge.dst.is_same_vertex(v) {
          continue;
        }
        splits_per_edge.entry(edge_id).or_default().push(v);
      }
    }

    if splits_per_edge.is_empty() {
      break;
    }
    passes_with_splits += 1;

    for (edge_id, mut points) in splits_per_edge {
      let edge = edges[edge_id];
      if !store.erase(edge.src, edge.dst) {
        // Another split on a duplicate occurrence already consumed it.
        continue;
      }
      points.sort_by(|a, b| {
        angle(edge.src, *a)
          .radians()
          .partial_cmp(&angle(edge.src, *b).radians())
          .unwrap_or(std::cmp::Ordering::Equal)
      });
      let mut prev = edge.src;
      for point in points {
        store.insert(prev, point);
        prev = point;
      }
      store.insert(prev, edge.dst);
    }
  }

  passes_with_splits
}

fn distinct_vertices(edges: &[crate::types::DirectedEdge]) -> Vec<UnitVec> {
  let mut seen: HashSet<VertexKey> = HashSet::new();
  let mut out = Vec::new();
  for edge in edges {
    for v in [edge.src, edge.dst] {
      if seen.insert(v.key()) {
        out.push(v);
      }
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;
  use crate::geometry::distance_to_edge;

  fn v(lat: f64, lng: f64) -> UnitVec {
    UnitVec::from_lat_lng_deg(lat, lng)
  }

  #[test]
  fn zero_radius_leaves_store_untouched() {
    let mut store = EdgeStore::new();
    store.insert(v(0.0, 0.0), v(0.0, 10.0));
    let passes = splice_edges(&mut store, Angle::ZERO);
    assert_eq!(passes, 0);
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn splits_edge_at_nearby_vertex() {
    let mut store = EdgeStore::new();
    let a = v(0.0, 0.0);
    let b = v(0.0, 10.0);
    let mid = v(0.001, 5.0);
    store.insert(a, b);
    store.insert(mid, v(20.0, 5.0));

    splice_edges(&mut store, Angle::from_degrees(1.0));

    assert_eq!(store.outgoing(a), &[mid]);
    assert_eq!(store.outgoing(mid), &[v(20.0, 5.0), b]);
  }

  #[test]
  fn leaves_edge_with_no_nearby_vertex_alone() {
    let mut store = EdgeStore::new();
    let a = v(0.0, 0.0);
    let b = v(0.0, 10.0);
    store.insert(a, b);
    store.insert(v(45.0, 0.0), v(45.0, 10.0));

    let passes = splice_edges(&mut store, Angle::from_degrees(1.0));
    assert_eq!(passes, 0);
    assert_eq!(store.outgoing(a), &[b]);
  }

  proptest! {
    /// Property 4 (splice separation): once splicing has converged, no
    /// vertex in the store lies within `radius` of an edge it is not an
    /// endpoint of — otherwise that edge should have been split there.
    #[test]
    fn no_vertex_remains_close_to_a_non_incident_edge(
      lats in prop::collection::vec(-80.0f64..80.0, 3..8),
      lngs in prop::collection::vec(-170.0f64..170.0, 3..8),
      radius_deg in 0.01f64..2.0,
    ) {
      let n = lats.len().min(lngs.len());
      if n < 3 {
        return Ok(());
      }
      let mut store = EdgeStore::new();
      for i in 0..n {
        store.insert(v(lats[i], lngs[i]), v(lats[(i + 1) % n], lngs[(i + 1) % n]));
      }

      let radius = Angle::from_degrees(radius_deg);
      splice_edges(&mut store, radius);

      let edges = store.edges();
      let vertices = distinct_vertices(&edges);
      for &p in &vertices {
        for edge in &edges {
          if edge.src.is_same_vertex(p) || edge.dst.is_same_vertex(p) {
            continue;
          }
          prop_assert!(distance_to_edge(p, edge.src, edge.dst).radians() >= radius.radians());
        }
      }
    }
  }
}
