//! Containment and nesting oracle: decides which assembled loops lie
//! inside which others, and what polarity (CCW/CW) each nesting depth
//! should carry.

use crate::geometry::segments_cross;
use crate::types::UnitVec;

fn ring_centroid(ring: &[UnitVec]) -> UnitVec {
  let (mut sx, mut sy, mut sz) = (0.0, 0.0, 0.0);
  for p in ring {
    sx += p.x;
    sy += p.y;
    sz += p.z;
  }
  UnitVec::from_xyz(sx, sy, sz).unwrap_or(ring[0])
}

/// A point guaranteed (for any ring spanning less than a hemisphere) to lie
/// outside `ring`: the antipode of its centroid.
fn outside_probe(ring: &[UnitVec]) -> UnitVec {
  let centroid = ring_centroid(ring);
  UnitVec::from_xyz(-centroid.x, -centroid.y, -centroid.z).unwrap_or(centroid)
}

fn point_in_ring(point: UnitVec, ring: &[UnitVec]) -> bool {
  if ring.len() < 3 {
    return false;
  }
  let probe = outside_probe(ring);
  let n = ring.len();
  let mut crossings = 0usize;
  for i in 0..n {
    let a = ring[i];
    let b = ring[(i + 1) % n];
    if segments_cross(point, probe, a, b) {
      crossings += 1;
    }
  }
  crossings % 2 == 1
}

/// `true` if `inner` lies inside `outer`, tested via its first vertex.
#[must_use]
pub(crate) fn contains(outer: &[UnitVec], inner: &[UnitVec]) -> bool {
  inner.first().is_some_and(|&p| point_in_ring(p, outer))
}

fn cross3(a: (f64, f64, f64), b: (f64, f64, f64)) -> (f64, f64, f64) {
  (a.1 * b.2 - a.2 * b.1, a.2 * b.0 - a.0 * b.2, a.0 * b.1 - a.1 * b.0)
}

/// Sign of the enclosed area, relative to the outward normal at the ring's
/// centroid: positive means counter-clockwise as seen from outside the
/// sphere.
fn orientation_sign(ring: &[UnitVec]) -> f64 {
  let n = ring.len();
  let mut sum = (0.0, 0.0, 0.0);
  for i in 0..n {
    let a = ring[i];
    let b = ring[(i + 1) % n];
    let c = cross3((a.x, a.y, a.z), (b.x, b.y, b.z));
    sum.0 += c.0;
    sum.1 += c.1;
    sum.2 += c.2;
  }
  let centroid = ring_centroid(ring);
  sum.0 * centroid.x + sum.1 * centroid.y + sum.2 * centroid.z
}

fn oriented(ring: Vec<UnitVec>, want_ccw: bool) -> Vec<UnitVec> {
  let is_ccw = orientation_sign(&ring) > 0.0;
  if is_ccw == want_ccw {
    ring
  } else {
    ring.into_iter().rev().collect()
  }
}

/// A loop placed within a nesting forest: its vertices, its nesting depth
/// (0 = outermost), and the index (into the slice passed to
/// [`nest_loops`]) of its immediate parent, if any.
#[derive(Debug, Clone)]
pub(crate) struct LoopNode {
  pub(crate) vertices: Vec<UnitVec>,
  pub(crate) depth: usize,
  pub(crate) parent: Option<usize>,
}

/// Assign each loop a nesting depth and immediate parent, and orient it so
/// that even depths wind counter-clockwise (shells) and odd depths wind
/// clockwise (holes), per the standard nesting polarity rule.
#[must_use]
pub(crate) fn nest_loops(loops: Vec<Vec<UnitVec>>) -> Vec<LoopNode> {
  let n = loops.len();
  let mut contains_matrix = vec![vec![false; n]; n];
  for i in 0..n {
    for j in 0..n {
      if i != j && contains(&loops[i], &loops[j]) {
        contains_matrix[i][j] = true;
      }
    }
  }

  let mut parent: Vec<Option<usize>> = vec![None; n];
  for j in 0..n {
    let candidates: Vec<usize> = (0..n).filter(|&i| contains_matrix[i][j]).collect();
    parent[j] = candidates
      .iter()
      .copied()
      .find(|&c| !candidates.iter().any(|&other| other != c && contains_matrix[other][c]));
  }

  let mut depth = vec![0usize; n];
  for j in 0..n {
    let mut d = 0;
    let mut cur = parent[j];
    while let Some(p) = cur {
      d += 1;
      cur = parent[p];
    }
    depth[j] = d;
  }

  loops
    .into_iter()
    .enumerate()
    .map(|(i, vertices)| LoopNode {
      vertices: oriented(vertices, depth[i] % 2 == 0),
      depth: depth[i],
      parent: parent[i],
    })
    .collect()
}
