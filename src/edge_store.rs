//! The edge multiset: a mapping from source vertex to an insertion-ordered
//! bag of destinations, with deterministic source enumeration order.

use indexmap::IndexMap;

use crate::types::{DirectedEdge, UnitVec, VertexKey};

#[derive(Debug, Clone)]
struct Bucket {
  vertex: UnitVec,
  dsts: Vec<UnitVec>,
}

/// A multiset of directed edges, indexed by source vertex.
///
/// Source enumeration order is the order in which each source first
/// appeared (`IndexMap` preserves insertion order), which is what makes
/// loop assembly reproducible given a fixed input order.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeStore {
  outgoing: IndexMap<VertexKey, Bucket>,
}

impl EdgeStore {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Insert `(src, dst)` with no XOR or degeneracy handling. Callers apply
  /// those policies before calling this; it is the mechanical primitive the
  /// rest of this module and [`crate::builder`] build on.
  pub(crate) fn insert(&mut self, src: UnitVec, dst: UnitVec) {
    self
      .outgoing
      .entry(src.key())
      .or_insert_with(|| Bucket { vertex: src, dsts: Vec::new() })
      .dsts
      .push(dst);
  }

  /// Remove one occurrence of `(src, dst)`, returning whether one was
  /// present.
  pub(crate) fn erase(&mut self, src: UnitVec, dst: UnitVec) -> bool {
    let Some(bucket) = self.outgoing.get_mut(&src.key()) else {
      return false;
    };
    let dst_key = dst.key();
    let Some(pos) = bucket.dsts.iter().position(|candidate| candidate.key() == dst_key) else {
      return false;
    };
    bucket.dsts.remove(pos);
    if bucket.dsts.is_empty() {
      self.outgoing.shift_remove(&src.key());
    }
    true
  }

  pub(crate) fn outgoing(&self, src: UnitVec) -> &[UnitVec] {
    self
      .outgoing
      .get(&src.key())
      .map_or(&[], |bucket| bucket.dsts.as_slice())
  }

  pub(crate) fn len(&self) -> usize {
    self.outgoing.values().map(|bucket| bucket.dsts.len()).sum()
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// All directed edges, in source-insertion order, then per-source
  /// insertion order.
  pub(crate) fn edges(&self) -> Vec<DirectedEdge> {
    self
      .outgoing
      .values()
      .flat_map(|bucket| bucket.dsts.iter().map(move |&dst| DirectedEdge::new(bucket.vertex, dst)))
      .collect()
  }

  /// Sources in deterministic enumeration order.
  pub(crate) fn sources(&self) -> Vec<UnitVec> {
    self.outgoing.values().map(|bucket| bucket.vertex).collect()
  }

  /// Every distinct vertex touched by this store, as either a source or a
  /// destination.
  pub(crate) fn vertices(&self) -> Vec<UnitVec> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for bucket in self.outgoing.values() {
      if seen.insert(bucket.vertex.key()) {
        out.push(bucket.vertex);
      }
      for &dst in &bucket.dsts {
        if seen.insert(dst.key()) {
          out.push(dst);
        }
      }
    }
    out
  }
}
