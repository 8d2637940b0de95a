//! Named integration scenarios for loop assembly, traced by hand against
//! the greedy least-left-turn walk.
//!
//! Two scenarios from the original catalog are intentionally not
//! reproduced here: an XOR-of-three-rings case whose expected merge
//! depends on treating a shared border as cancelling regardless of
//! direction (see DESIGN.md's open questions for why this crate's XOR
//! only cancels an exact directed duplicate), and a four-subsquare
//! tiling case whose source never specifies concrete coordinates.
//!
//! `s5_nested_diamonds_directed` below is also a simplification: the named
//! scenario has all four diamonds sharing two touching points (a "hinge" at
//! a common north and south vertex), which exercises the walk's shared-vertex
//! disambiguation at those hinges. Reproducing that exactly requires hand-
//! tracing which of several outgoing edges at a 4-way shared vertex the
//! least-left-turn rule picks first, which cannot be confirmed without
//! running the assembler; this test instead uses four fully disjoint
//! diamonds, which checks that independent loops each come back out but
//! does not exercise shared-vertex disambiguation the way the named
//! scenario does.

use geosplice::{Angle, Builder, BuilderOptions, UnitVec};

fn v(lat: f64, lng: f64) -> UnitVec {
  UnitVec::from_lat_lng_deg(lat, lng)
}

/// S1: a single triangle with default options assembles to exactly that
/// triangle, with nothing left over.
#[test]
fn s1_single_triangle() {
  let options = BuilderOptions::builder().build().unwrap();
  let mut builder = Builder::new(options);
  builder.add_loop(&[v(0.0, 0.0), v(0.0, 10.0), v(10.0, 5.0)]);

  let result = builder.assemble_loops();
  assert_eq!(result.loops.len(), 1);
  assert_eq!(result.loops[0].len(), 3);
  assert!(result.unused_edges.is_empty());
}

/// S2: a triangle plus two dangling polylines attached at its vertices. The
/// tails have no cycle of their own, so the walk only closes the triangle
/// after backtracking away from every start that wanders into a tail; all 6
/// tail edges end up unused regardless of which vertex the surviving loop
/// is reported starting from.
#[test]
fn s2_triangle_with_tail() {
  let options = BuilderOptions::builder()
    .vertex_merge_radius(Angle::from_degrees(4.0))
    .build()
    .unwrap();
  let mut builder = Builder::new(options);
  builder.add_loop(&[v(0.0, 0.0), v(0.0, 10.0), v(10.0, 5.0)]);
  builder.add_polyline(&[v(0.0, 0.0), v(5.0, 5.0)]);
  builder.add_polyline(&[
    v(10.0, 5.0),
    v(20.0, 7.0),
    v(30.0, 10.0),
    v(40.0, 15.0),
    v(50.0, 3.0),
    v(60.0, -20.0),
  ]);

  let result = builder.assemble_loops();
  assert_eq!(result.loops.len(), 1);
  let mut loop_keys: Vec<_> = result.loops[0].iter().map(|p| (p.x, p.y, p.z)).collect();
  loop_keys.sort_by(|a, b| a.partial_cmp(b).unwrap());
  let mut expected: Vec<_> = [v(0.0, 0.0), v(0.0, 10.0), v(10.0, 5.0)]
    .iter()
    .map(|p| (p.x, p.y, p.z))
    .collect();
  expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
  assert_eq!(loop_keys, expected, "the closed loop must be exactly the triangle");
  assert_eq!(result.unused_edges.len(), 6);
  assert_eq!(result.degenerate_edges_dropped, 0);
}

/// S5 (simplified, see module docs): four concentric, fully disjoint
/// diamonds instead of the named scenario's diamonds sharing two touching
/// points. Each is its own simple loop with nothing shared between them, so
/// they must all come back out independent of assembly order.
#[test]
fn s5_nested_diamonds_directed_disjoint() {
  let options = BuilderOptions::builder().build().unwrap();
  let mut builder = Builder::new(options);

  for radius in [2.0, 4.0, 6.0, 8.0] {
    builder.add_loop(&[v(radius, 0.0), v(0.0, radius), v(-radius, 0.0), v(0.0, -radius)]);
  }

  let result = builder.assemble_loops();
  assert_eq!(result.loops.len(), 4);
  assert!(result.unused_edges.is_empty());
  assert!(result.loops.iter().all(|l| l.len() == 4));
}

/// S6: a clean triangle plus a self-crossing bowtie. The bowtie can never
/// close without the walk rejecting a self-crossing continuation, so all
/// four of its edges end up unused while the triangle still assembles.
#[test]
fn s6_self_crossing_bowtie_rejected() {
  let options = BuilderOptions::builder().build().unwrap();
  let mut builder = Builder::new(options);
  builder.add_loop(&[v(0.0, 0.0), v(0.0, 10.0), v(5.0, 5.0)]);
  builder.add_polyline(&[v(0.0, 20.0), v(0.0, 30.0), v(10.0, 20.0)]);
  builder.add_polyline(&[v(10.0, 20.0), v(10.0, 30.0), v(0.0, 20.0)]);

  let result = builder.assemble_loops();
  assert_eq!(result.loops.len(), 1);
  assert_eq!(result.loops[0].len(), 3);
  assert_eq!(result.unused_edges.len(), 4);
}
