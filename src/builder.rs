//! Orchestrator (component G): wires the edge store, vertex cluster finder,
//! cell snapper, edge splicer, loop assembler, and containment oracle into
//! the public `Builder` API.

use log::debug;

use crate::assemble;
use crate::cell;
use crate::cluster;
use crate::containment::{self, LoopNode};
use crate::edge_store::EdgeStore;
use crate::options::BuilderOptions;
use crate::splice;
use crate::types::{DirectedEdge, Polygon, UnitVec};

/// Accumulates edges and assembles them into simple loops.
///
/// `assemble_loops` and `assemble_polygon` consume the builder by value:
/// once assembly has run there is nothing left to add edges to, so the
/// type system rules out the "add more edges after assembling" misuse that
/// would otherwise be undefined behavior.
#[derive(Debug, Clone)]
pub struct Builder {
  options: BuilderOptions,
  store: EdgeStore,
  degenerate_edges_dropped: usize,
}

/// Result of [`Builder::assemble_loops`].
#[derive(Debug, Clone, Default)]
pub struct AssembleResult {
  /// Simple, non-self-crossing closed loops, each a sequence of vertices
  /// with the first vertex not repeated at the end.
  pub loops: Vec<Vec<UnitVec>>,
  /// Edges left over because no further loop could be started from them.
  pub unused_edges: Vec<DirectedEdge>,
  /// Edges dropped for connecting a vertex to itself, either as supplied
  /// or after clustering/snapping merged their endpoints together.
  pub degenerate_edges_dropped: usize,
  /// Loops discarded as duplicates of an already-emitted loop.
  pub rejected_loop_count: usize,
}

/// One loop within a [`PolygonAssembleResult`], annotated with its nesting
/// depth (0 = outermost shell, 1 = hole, 2 = island within a hole, ...).
/// Vertices wind counter-clockwise at even depths and clockwise at odd
/// depths.
#[derive(Debug, Clone)]
pub struct PolygonLoop {
  pub vertices: Vec<UnitVec>,
  pub depth: usize,
}

/// Result of [`Builder::assemble_polygon`].
#[derive(Debug, Clone, Default)]
pub struct PolygonAssembleResult {
  pub loops: Vec<PolygonLoop>,
  pub unused_edges: Vec<DirectedEdge>,
  pub degenerate_edges_dropped: usize,
  pub rejected_loop_count: usize,
}

impl Builder {
  #[must_use]
  pub fn new(options: BuilderOptions) -> Self {
    Self {
      options,
      store: EdgeStore::new(),
      degenerate_edges_dropped: 0,
    }
  }

  /// Add a single directed edge. A no-op (with no error) if `src` and `dst`
  /// are the same vertex.
  ///
  /// If `xor_edges` is set, a call that exactly cancels a previously added
  /// `(src, dst)` edge removes it instead of adding a duplicate.
  pub fn add_edge(&mut self, src: UnitVec, dst: UnitVec) {
    if src.is_same_vertex(dst) || src.is_antipodal_vertex(dst) {
      self.degenerate_edges_dropped += 1;
      return;
    }

    if self.options.xor_edges && self.store.erase(src, dst) {
      if self.options.undirected_edges {
        self.store.erase(dst, src);
      }
      return;
    }

    self.store.insert(src, dst);
    if self.options.undirected_edges {
      self.store.insert(dst, src);
    }
  }

  /// Add the closed loop `v[0] -> v[1] -> ... -> v[n-1] -> v[0]`.
  pub fn add_loop(&mut self, vertices: &[UnitVec]) {
    let n = vertices.len();
    if n < 2 {
      return;
    }
    for i in 0..n {
      self.add_edge(vertices[i], vertices[(i + 1) % n]);
    }
  }

  /// Add the open chain `v[0] -> v[1] -> ... -> v[n-1]` (no closing edge).
  pub fn add_polyline(&mut self, vertices: &[UnitVec]) {
    for pair in vertices.windows(2) {
      self.add_edge(pair[0], pair[1]);
    }
  }

  /// Add a polygon's exterior ring and each of its holes as independent
  /// loops.
  pub fn add_polygon(&mut self, polygon: &Polygon) {
    self.add_loop(&polygon.exterior);
    for hole in &polygon.holes {
      self.add_loop(hole);
    }
  }

  /// Number of edges currently queued (after XOR cancellation, before
  /// clustering/splicing/assembly).
  #[must_use]
  pub fn edge_count(&self) -> usize {
    self.store.len()
  }

  fn prepare(&mut self) {
    if let Some(level) = self.options.snap_level() {
      self.rewrite(|v| cell::cell_center(v, level));
      debug!("snapped vertices to cell grid level {level}");
    }

    if self.options.vertex_merge_radius.radians() > 0.0 {
      let vertices = self.store.vertices();
      let clusters = cluster::find_clusters(&vertices, self.options.vertex_merge_radius);
      self.rewrite(|v| clusters.representative_of(v));
      debug!("clustering merged {} candidate vertices", vertices.len());
    }

    let splice_radius = self.options.splice_radius();
    if splice_radius.radians() > 0.0 {
      let passes = splice::splice_edges(&mut self.store, splice_radius);
      debug!("edge splicing converged after {passes} pass(es) with splits");
    }
  }

  /// Rebuild the store with every edge endpoint mapped through `transform`,
  /// dropping (and counting) any edge that becomes degenerate as a result.
  fn rewrite(&mut self, mut transform: impl FnMut(UnitVec) -> UnitVec) {
    let mut rewritten = EdgeStore::new();
    for edge in self.store.edges() {
      let src = transform(edge.src);
      let dst = transform(edge.dst);
      if src.is_same_vertex(dst) || src.is_antipodal_vertex(dst) {
        self.degenerate_edges_dropped += 1;
        continue;
      }
      rewritten.insert(src, dst);
    }
    self.store = rewritten;
  }

  /// Run the full pipeline (snap/cluster, splice, assemble) and return the
  /// resulting loops without attempting to nest them into a polygon.
  #[must_use]
  pub fn assemble_loops(mut self) -> AssembleResult {
    self.prepare();
    let output = assemble::assemble(&mut self.store, &self.options);
    debug!(
      "assembled {} loop(s), {} unused edge(s), {} rejected duplicate(s)",
      output.loops.len(),
      output.unused_edges.len(),
      output.rejected_loop_count
    );
    AssembleResult {
      loops: output.loops,
      unused_edges: output.unused_edges,
      degenerate_edges_dropped: self.degenerate_edges_dropped,
      rejected_loop_count: output.rejected_loop_count,
    }
  }

  /// Run the full pipeline and additionally nest the resulting loops into a
  /// shell/hole/shell forest with alternating orientation by depth.
  #[must_use]
  pub fn assemble_polygon(self) -> PolygonAssembleResult {
    let degenerate_edges_dropped_before = self.degenerate_edges_dropped;
    let AssembleResult {
      loops,
      unused_edges,
      degenerate_edges_dropped,
      rejected_loop_count,
    } = self.assemble_loops();
    debug_assert!(degenerate_edges_dropped >= degenerate_edges_dropped_before);

    let nodes: Vec<LoopNode> = containment::nest_loops(loops);
    let loops = nodes
      .into_iter()
      .map(|node| PolygonLoop {
        vertices: node.vertices,
        depth: node.depth,
      })
      .collect();

    PolygonAssembleResult {
      loops,
      unused_edges,
      degenerate_edges_dropped,
      rejected_loop_count,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Angle;

  fn v(lat: f64, lng: f64) -> UnitVec {
    UnitVec::from_lat_lng_deg(lat, lng)
  }

  #[test]
  fn assembles_a_triangle_from_three_edges() {
    let _ = env_logger::try_init();
    let options = BuilderOptions::builder().build().unwrap();
    let mut builder = Builder::new(options);
    builder.add_edge(v(0.0, 0.0), v(0.0, 10.0));
    builder.add_edge(v(0.0, 10.0), v(10.0, 5.0));
    builder.add_edge(v(10.0, 5.0), v(0.0, 0.0));

    let result = builder.assemble_loops();
    assert_eq!(result.loops.len(), 1);
    assert!(result.unused_edges.is_empty());
    assert_eq!(result.degenerate_edges_dropped, 0);
  }

  #[test]
  fn xor_edges_cancel_duplicate_edge() {
    let options = BuilderOptions::builder().xor_edges(true).build().unwrap();
    let mut builder = Builder::new(options);
    let a = v(0.0, 0.0);
    let b = v(0.0, 10.0);
    builder.add_edge(a, b);
    builder.add_edge(a, b);
    assert_eq!(builder.edge_count(), 0);
  }

  #[test]
  fn degenerate_edge_is_dropped() {
    let options = BuilderOptions::builder().build().unwrap();
    let mut builder = Builder::new(options);
    let a = v(0.0, 0.0);
    builder.add_edge(a, a);
    assert_eq!(builder.edge_count(), 0);
    let result = builder.assemble_loops();
    assert_eq!(result.degenerate_edges_dropped, 1);
  }

  #[test]
  fn vertex_merge_radius_clusters_nearby_endpoints() {
    let options = BuilderOptions::builder()
      .vertex_merge_radius(Angle::from_degrees(0.5))
      .build()
      .unwrap();
    let mut builder = Builder::new(options);
    builder.add_edge(v(0.0, 0.0), v(0.0, 10.0));
    builder.add_edge(v(0.0, 10.0001), v(10.0, 5.0));
    builder.add_edge(v(10.0, 5.0), v(0.0001, 0.0));

    let result = builder.assemble_loops();
    assert_eq!(result.loops.len(), 1);
    assert_eq!(result.loops[0].len(), 3);
  }

  #[test]
  fn assemble_polygon_nests_hole_inside_shell() {
    let options = BuilderOptions::builder().build().unwrap();
    let mut builder = Builder::new(options);

    // Outer shell (large square, traversed CCW as seen from outside).
    builder.add_loop(&[v(-10.0, -10.0), v(-10.0, 10.0), v(10.0, 10.0), v(10.0, -10.0)]);
    // Inner hole (small square).
    builder.add_loop(&[v(-2.0, -2.0), v(-2.0, 2.0), v(2.0, 2.0), v(2.0, -2.0)]);

    let result = builder.assemble_polygon();
    assert_eq!(result.loops.len(), 2);
    let depths: Vec<usize> = result.loops.iter().map(|l| l.depth).collect();
    assert!(depths.contains(&0));
    assert!(depths.contains(&1));
  }
}
