//! Vertex cluster finder (component C): merges vertices within
//! `vertex_merge_radius` of one another into a single representative
//! position, iterating to a fixed point since merging two vertices can pull
//! a third vertex within range that was previously too far away.

use std::collections::HashMap;

use crate::constants::MAX_CLUSTER_PASSES;
use crate::spatial::PointIndex;
use crate::types::{Angle, UnitVec, VertexKey};
use crate::union_find::UnionFind;

/// Maps every input vertex to the representative position of its cluster.
#[derive(Debug, Clone, Default)]
pub(crate) struct Clusters {
  representative: HashMap<VertexKey, UnitVec>,
}

impl Clusters {
  pub(crate) fn representative_of(&self, v: UnitVec) -> UnitVec {
    self.representative.get(&v.key()).copied().unwrap_or(v)
  }
}

/// Run the clustering fixed point over `vertices` (deduplicated by the
/// caller is not required; duplicates just merge into the same cluster
/// immediately).
///
/// Returns the identity mapping when `radius` is zero, since no two
/// distinct vertices are within a zero radius of each other.
pub(crate) fn find_clusters(vertices: &[UnitVec], radius: Angle) -> Clusters {
  if radius.radians() <= 0.0 || vertices.len() < 2 {
    return Clusters::default();
  }

  // `current[i]` is vertex i's position after the previous pass; the
  // original identity of vertex i (for the final mapping) never changes.
  let original: Vec<UnitVec> = vertices.to_vec();
  let mut current: Vec<UnitVec> = vertices.to_vec();

  for _ in 0..MAX_CLUSTER_PASSES {
    let index = PointIndex::build(&current);
    let mut uf = UnionFind::new(current.len());
    for (i, &p) in current.iter().enumerate() {
      for j in index.within(p, radius) {
        if j != i {
          uf.union(i, j);
        }
      }
    }

    let mut sums: HashMap<usize, (f64, f64, f64, usize)> = HashMap::new();
    for (i, &p) in current.iter().enumerate() {
      let root = uf.find(i);
      let entry = sums.entry(root).or_insert((0.0, 0.0, 0.0, 0));
      entry.0 += p.x;
      entry.1 += p.y;
      entry.2 += p.z;
      entry.3 += 1;
    }

    let mut next = current.clone();
    let mut changed = false;
    for (i, &p) in current.iter().enumerate() {
      let root = uf.find(i);
      let (sx, sy, sz, count) = sums[&root];
      if count == 1 {
        continue;
      }
      let centroid = UnitVec::from_xyz(sx, sy, sz).unwrap_or(p);
      if centroid.key() != p.key() {
        changed = true;
      }
      next[i] = centroid;
    }

    current = next;
    if !changed {
      break;
    }
  }

  let mut representative = HashMap::with_capacity(original.len());
  for (orig, rep) in original.iter().zip(current.iter()) {
    representative.insert(orig.key(), *rep);
  }
  Clusters { representative }
}
