//! Tolerances and iteration caps shared across the builder's pipeline stages.

/// Below this angle (radians) two unit vectors are treated as the same
/// vertex, and an edge between them is considered degenerate.
pub const DEGENERATE_EDGE_EPSILON_RAD: f64 = 1e-15;

/// Within this angle (radians) of exactly `pi` apart, two unit vectors are
/// treated as antipodal; an edge between them has no well-defined shorter
/// arc and is considered degenerate.
pub const ANTIPODAL_EDGE_EPSILON_RAD: f64 = 1e-15;

/// General-purpose angular fuzz used when comparing geodesic distances
/// against a computed radius (clustering, splicing, containment).
pub const ANGLE_EPSILON_RAD: f64 = 1e-9;

/// Lower bound on `edge_splice_fraction`; below this the triangle-inequality
/// argument that bounds splice cascades no longer holds.
pub const MIN_SPLICE_FRACTION: f64 = std::f64::consts::SQRT_2 / 2.0;

/// Hard cap on vertex-clustering fixed-point iterations. Real inputs
/// converge in a handful of passes; this guards against floating-point
/// jitter preventing exact convergence.
pub const MAX_CLUSTER_PASSES: usize = 64;

/// Hard cap on edge-splicing fixed-point passes.
pub const MAX_SPLICE_PASSES: usize = 64;

/// Number of subdivision levels in the hierarchical cell grid.
pub const CELL_GRID_LEVELS: usize = 30;

/// Tolerance used by [`crate::containment`] when two rings' areas are
/// compared to decide which contains the other.
pub const CONTAINMENT_EPSILON_RAD: f64 = 1e-9;
