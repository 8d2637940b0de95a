//! Error types surfaced by the builder.
//!
//! Configuration failures are reported synchronously at construction time;
//! geometry failures never panic and are instead folded into the assembly
//! output (`unused_edges`, `rejected_loop_count`), per the error-handling
//! design.

use thiserror::Error;

/// Errors surfaced by [`crate::BuilderOptions::validate`] and
/// [`crate::Builder::new`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuilderError {
  /// A tolerance or mode option was outside its accepted domain.
  #[error("invalid option `{option}`: {reason}")]
  InvalidOption {
    option: &'static str,
    reason: String,
  },

  /// A unit vector failed to normalize (zero-length input).
  #[error("vector ({x}, {y}, {z}) has zero length and cannot be normalized")]
  ZeroLengthVector { x: f64, y: f64, z: f64 },
}

impl BuilderError {
  pub(crate) fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidOption {
      option,
      reason: reason.into(),
    }
  }
}
