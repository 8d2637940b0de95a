//! Tolerance and mode options for a [`crate::Builder`].

use crate::cell;
use crate::constants::MIN_SPLICE_FRACTION;
use crate::error::BuilderError;
use crate::types::Angle;

/// Which starting edge the loop assembler picks first within each
/// deterministic enumeration round. Exists so tests can exercise different
/// starting points without relying on hash-map iteration order, which this
/// crate never does (see [`crate::edge_store::EdgeStore`]) but which other
/// edge-ordering choices might accidentally depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartRotation(pub(crate) usize);

impl StartRotation {
  #[must_use]
  pub const fn new(offset: usize) -> Self {
    Self(offset)
  }
}

/// Validated tolerance and mode options for a [`crate::Builder`].
///
/// Constructed via [`BuilderOptionsBuilder`]; invalid combinations are
/// rejected synchronously, never deferred to assembly time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuilderOptions {
  pub(crate) undirected_edges: bool,
  pub(crate) xor_edges: bool,
  pub(crate) vertex_merge_radius: Angle,
  pub(crate) edge_splice_fraction: f64,
  pub(crate) snap_to_cell_centers: bool,
  pub(crate) robustness_radius: Angle,
  pub(crate) validate: bool,
  pub(crate) start_rotation: StartRotation,
}

impl Default for BuilderOptions {
  fn default() -> Self {
    Self {
      undirected_edges: false,
      xor_edges: false,
      vertex_merge_radius: Angle::ZERO,
      edge_splice_fraction: 0.0,
      snap_to_cell_centers: false,
      robustness_radius: Angle::ZERO,
      validate: false,
      start_rotation: StartRotation::default(),
    }
  }
}

impl BuilderOptions {
  #[must_use]
  pub fn builder() -> BuilderOptionsBuilder {
    BuilderOptionsBuilder::default()
  }

  #[must_use]
  pub const fn splice_radius(&self) -> Angle {
    Angle::from_radians(self.vertex_merge_radius.radians() * self.edge_splice_fraction)
  }

  /// Deepest grid level satisfying `robustness_radius`, or `None` when
  /// snapping is disabled or the budget is unattainable at any level.
  #[must_use]
  pub(crate) fn snap_level(&self) -> Option<usize> {
    if !self.snap_to_cell_centers {
      return None;
    }
    cell::snap_level_for_robustness(self.robustness_radius)
  }
}

/// Builder for [`BuilderOptions`], mirroring the validating-options-struct
/// idiom this codebase already uses for its densification options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BuilderOptionsBuilder {
  options: BuilderOptions,
}

impl BuilderOptionsBuilder {
  #[must_use]
  pub const fn undirected_edges(mut self, value: bool) -> Self {
    self.options.undirected_edges = value;
    self
  }

  #[must_use]
  pub const fn xor_edges(mut self, value: bool) -> Self {
    self.options.xor_edges = value;
    self
  }

  #[must_use]
  pub const fn vertex_merge_radius(mut self, radius: Angle) -> Self {
    self.options.vertex_merge_radius = radius;
    self
  }

  #[must_use]
  pub const fn edge_splice_fraction(mut self, fraction: f64) -> Self {
    self.options.edge_splice_fraction = fraction;
    self
  }

  #[must_use]
  pub const fn snap_to_cell_centers(mut self, value: bool) -> Self {
    self.options.snap_to_cell_centers = value;
    self
  }

  #[must_use]
  pub const fn robustness_radius(mut self, radius: Angle) -> Self {
    self.options.robustness_radius = radius;
    self
  }

  #[must_use]
  pub const fn validate(mut self, value: bool) -> Self {
    self.options.validate = value;
    self
  }

  #[must_use]
  pub const fn start_rotation(mut self, rotation: StartRotation) -> Self {
    self.options.start_rotation = rotation;
    self
  }

  /// Validate and finalize the options.
  ///
  /// # Errors
  /// Returns [`BuilderError::InvalidOption`] when `vertex_merge_radius` or
  /// `robustness_radius` is negative/non-finite, or when
  /// `edge_splice_fraction` is outside `{0} ∪ [sqrt(2)/2, 1]`.
  pub fn build(self) -> Result<BuilderOptions, BuilderError> {
    let options = self.options;

    if !options.vertex_merge_radius.is_finite_non_negative() {
      return Err(BuilderError::invalid_option(
        "vertex_merge_radius",
        "must be finite and non-negative",
      ));
    }

    if !options.robustness_radius.is_finite_non_negative() {
      return Err(BuilderError::invalid_option(
        "robustness_radius",
        "must be finite and non-negative",
      ));
    }

    let fraction = options.edge_splice_fraction;
    let fraction_valid = fraction == 0.0 || (fraction.is_finite() && (MIN_SPLICE_FRACTION..=1.0).contains(&fraction));
    if !fraction_valid {
      return Err(BuilderError::invalid_option(
        "edge_splice_fraction",
        format!("must be 0 or within [{MIN_SPLICE_FRACTION}, 1], got {fraction}"),
      ));
    }

    Ok(options)
  }
}
