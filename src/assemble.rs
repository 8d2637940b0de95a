//! Loop assembler (component E): greedy "least to the left" walk that
//! consumes edges from the store and emits simple, non-self-crossing
//! closed loops.
//!
//! At each vertex the walk picks the outgoing edge that turns least to the
//! left of the arrival direction, which is the standard technique for
//! tracing simple faces out of an embedded planar (here: spherical) graph.
//! Candidate edges tie-broken by the store's deterministic enumeration
//! order. A start that dead-ends or self-crosses before closing is
//! abandoned and its consumed edges are restored, after which the next
//! candidate start (per [`crate::options::StartRotation`]) is tried.

use log::warn;

use crate::edge_store::EdgeStore;
use crate::geometry::{segments_cross, signed_turn};
use crate::options::BuilderOptions;
use crate::types::{DirectedEdge, UnitVec, VertexKey};

/// Output of [`assemble`].
#[derive(Debug, Clone, Default)]
pub(crate) struct AssembleOutput {
  pub(crate) loops: Vec<Vec<UnitVec>>,
  pub(crate) unused_edges: Vec<DirectedEdge>,
  pub(crate) rejected_loop_count: usize,
}

const MIN_LOOP_VERTICES: usize = 3;

pub(crate) fn assemble(store: &mut EdgeStore, options: &BuilderOptions) -> AssembleOutput {
  let mut output = AssembleOutput::default();
  let mut seen_loop_keys: Vec<Vec<VertexKey>> = Vec::new();

  loop {
    let candidates = store.edges();
    if candidates.is_empty() {
      break;
    }

    let rotation = options.start_rotation.0 % candidates.len();
    let mut started = false;

    for attempt in 0..candidates.len() {
      let start_idx = (rotation + attempt) % candidates.len();
      let start_edge = candidates[start_idx];
      if !store.erase(start_edge.src, start_edge.dst) {
        // Already consumed by an earlier attempt this round.
        continue;
      }
      if options.undirected_edges {
        store.erase(start_edge.dst, start_edge.src);
      }

      match trace_loop(store, start_edge, options.undirected_edges) {
        Ok((path, consumed)) => {
          started = true;
          let canonical = canonical_key(&path);
          if seen_loop_keys.contains(&canonical) {
            output.rejected_loop_count += 1;
            output.unused_edges.extend(consumed);
          } else if options.validate && !loop_is_valid(&path) {
            warn!("rejected invalid loop with {} vertices during assembly", path.len());
            output.rejected_loop_count += 1;
            output.unused_edges.extend(consumed);
          } else {
            seen_loop_keys.push(canonical);
            output.loops.push(path);
          }
          break;
        }
        Err(consumed) => {
          for edge in consumed {
            store.insert(edge.src, edge.dst);
            if options.undirected_edges {
              store.insert(edge.dst, edge.src);
            }
          }
        }
      }
    }

    if !started {
      output.unused_edges.extend(store.edges());
      break;
    }
  }

  output
}

/// Attempt a walk starting at `start_edge`. On success, returns the closed
/// loop's vertices (start vertex not repeated at the end) together with
/// every edge consumed along the way, so the caller can route a
/// canonical-duplicate loop's edges to the unused list instead of losing
/// them. On failure, returns the list of edges consumed before failure, for
/// the caller to restore.
fn trace_loop(
  store: &mut EdgeStore,
  start_edge: DirectedEdge,
  undirected: bool,
) -> Result<(Vec<UnitVec>, Vec<DirectedEdge>), Vec<DirectedEdge>> {
  let start = start_edge.src;
  let mut path = vec![start, start_edge.dst];
  let mut consumed = vec![start_edge];
  let mut prev = start_edge.src;
  let mut current = start_edge.dst;

  loop {
    if current.is_same_vertex(start) && path.len() - 1 >= MIN_LOOP_VERTICES {
      path.pop();
      return Ok((path, consumed));
    }

    let outgoing = store.outgoing(current).to_vec();
    if outgoing.is_empty() {
      return Err(consumed);
    }

    let mut best: Option<(usize, f64)> = None;
    for (idx, &candidate) in outgoing.iter().enumerate() {
      let turn = signed_turn(prev, current, candidate);
      match best {
        Some((_, best_turn)) if turn >= best_turn => {}
        _ => best = Some((idx, turn)),
      }
    }
    let Some((idx, _)) = best else {
      return Err(consumed);
    };
    let next = outgoing[idx];

    // Reject a move that would self-cross a non-adjacent segment already
    // walked in this loop.
    if path.len() >= 3 {
      for window in path.windows(2).take(path.len() - 2) {
        if segments_cross(current, next, window[0], window[1]) {
          return Err(consumed);
        }
      }
    }

    if !store.erase(current, next) {
      return Err(consumed);
    }
    if undirected {
      store.erase(next, current);
    }
    consumed.push(DirectedEdge::new(current, next));

    path.push(next);
    prev = current;
    current = next;
  }
}

/// Re-checks a just-closed loop against the three conditions `validate`
/// promises: at least [`MIN_LOOP_VERTICES`] vertices, all pairwise distinct
/// (and non-antipodal), and no two non-adjacent edges crossing. The walk in
/// [`trace_loop`] already enforces these as it goes; this is the
/// belt-and-suspenders re-check the `validate` option asks for.
fn loop_is_valid(path: &[UnitVec]) -> bool {
  let n = path.len();
  if n < MIN_LOOP_VERTICES {
    return false;
  }

  for i in 0..n {
    for j in (i + 1)..n {
      if path[i].is_same_vertex(path[j]) || path[i].is_antipodal_vertex(path[j]) {
        return false;
      }
    }
  }

  for i in 0..n {
    let a0 = path[i];
    let a1 = path[(i + 1) % n];
    for j in (i + 1)..n {
      if j == i || (j + 1) % n == i || (i + 1) % n == j {
        continue;
      }
      if segments_cross(a0, a1, path[j], path[(j + 1) % n]) {
        return false;
      }
    }
  }

  true
}

fn canonical_key(path: &[UnitVec]) -> Vec<VertexKey> {
  let keys: Vec<VertexKey> = path.iter().map(|v| v.key()).collect();
  let min_pos = (0..keys.len()).min_by_key(|&i| keys[i]).unwrap_or(0);
  let mut rotated: Vec<VertexKey> = keys[min_pos..].iter().chain(keys[..min_pos].iter()).copied().collect();
  let mut reversed = rotated.clone();
  reversed[1..].reverse();
  if reversed < rotated {
    rotated = reversed;
  }
  rotated
}
