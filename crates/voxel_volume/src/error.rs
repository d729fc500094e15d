//! Error taxonomy for volume operations.
//!
//! Every failure is caller-visible and recoverable; operators validate
//! before mutating, so a returned error means the target grid is unchanged
//! (or, for staged passes, that the scratch buffer was discarded).

use glam::IVec3;

/// Errors produced by grid, octree, and operator entry points.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
  /// Index outside the grid dimensions on get/set.
  #[error("grid position {position:?} out of range (dimensions {dimensions:?})")]
  OutOfRange { position: IVec3, dimensions: IVec3 },

  /// Binary operator operands differ in resolution, bounds, or dimensions.
  #[error("grid shapes are incompatible: {reason}")]
  ShapeMismatch { reason: String },

  /// Invalid parameter reported before any work begins.
  #[error("invalid parameter: {reason}")]
  InvalidParameter { reason: String },

  /// Underlying I/O failure while reading or writing a stream.
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// Malformed or truncated serialized data.
  #[error("decode error: {reason}")]
  Decode { reason: String },
}

impl VolumeError {
  pub(crate) fn invalid(reason: impl Into<String>) -> Self {
    Self::InvalidParameter {
      reason: reason.into(),
    }
  }

  pub(crate) fn decode(reason: impl Into<String>) -> Self {
    Self::Decode {
      reason: reason.into(),
    }
  }
}
