//! Grid transformation operators.
//!
//! Three families, one calling convention each:
//!
//! - [`GridOp`]: unary mask transforms (morphology and Euclidean offset),
//!   applied in place via a single `apply` dispatch
//! - [`BooleanOp`]: pointwise set algebra against a second grid of
//!   identical shape
//! - free functions for the region/query algorithms, which return their
//!   natural result types ([`ScalarField`](crate::ScalarField) distances,
//!   [`LabelField`](crate::LabelField) labels, interpolated scalars)
//!
//! Every neighbor-dependent pass reads the pre-pass snapshot and writes a
//! separate buffer (the stencil executor), so results never depend on
//! traversal or worker order.

pub mod boolean;
pub mod interpolate;
pub mod morphology;
pub mod region;
pub(crate) mod stencil;

pub use boolean::BooleanOp;
pub use interpolate::{interpolate, interpolate_world};
pub use region::{connected_components, distance_transform, flood_fill};

use glam::IVec3;

use crate::error::VolumeError;
use crate::grid::VoxelGrid;

/// Face-adjacent neighbor offsets (the 6-neighborhood).
pub(crate) const FACE_NEIGHBORS: [IVec3; 6] = [
  IVec3::new(1, 0, 0),
  IVec3::new(-1, 0, 0),
  IVec3::new(0, 1, 0),
  IVec3::new(0, -1, 0),
  IVec3::new(0, 0, 1),
  IVec3::new(0, 0, -1),
];

/// Neighbor definition for frontier algorithms.
///
/// `Six` is strict face adjacency; `TwentySix` additionally admits edge and
/// corner neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
  Six,
  TwentySix,
}

impl Connectivity {
  /// Whether offset `d` (each component in -1..=1, not all zero) is a
  /// neighbor step under this connectivity.
  #[inline]
  pub(crate) fn admits(self, d: IVec3) -> bool {
    match self {
      Connectivity::Six => d.abs().element_sum() == 1,
      Connectivity::TwentySix => d != IVec3::ZERO,
    }
  }
}

/// Unary in-place mask operators.
///
/// Morphological neighborhoods are 6-face; `Offset` alone measures a true
/// Euclidean ball, which is why a 1-voxel positive offset can differ from
/// one dilation round at the corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridOp {
  /// Majority-style smoothing over the 3x3x3 neighborhood (self included):
  /// a cell becomes active when the active fraction of its in-bounds
  /// neighborhood reaches `threshold`.
  Smooth { iterations: u32, threshold: f32 },
  /// Grow the active set by one 6-face ring per iteration.
  Dilate { iterations: u32 },
  /// Shrink the active set by one 6-face ring per iteration.
  Erode { iterations: u32 },
  /// Erode then dilate; removes speckles smaller than the radius.
  Open { iterations: u32 },
  /// Dilate then erode; closes holes smaller than the radius.
  Close { iterations: u32 },
  /// Euclidean offset: positive `distance` grows the surface outward by
  /// that many voxel lengths, negative inverts the grown set.
  Offset { distance: f32 },
}

impl GridOp {
  /// Apply the operator to `grid` in place.
  ///
  /// Parameters are validated before any pass runs; on error the grid is
  /// untouched.
  pub fn apply(&self, grid: &mut VoxelGrid) -> Result<(), VolumeError> {
    self.validate()?;
    match *self {
      GridOp::Smooth {
        iterations,
        threshold,
      } => morphology::smooth(grid, iterations, threshold),
      GridOp::Dilate { iterations } => morphology::dilate(grid, iterations),
      GridOp::Erode { iterations } => morphology::erode(grid, iterations),
      GridOp::Open { iterations } => {
        morphology::erode(grid, iterations);
        morphology::dilate(grid, iterations);
      }
      GridOp::Close { iterations } => {
        morphology::dilate(grid, iterations);
        morphology::erode(grid, iterations);
      }
      GridOp::Offset { distance } => morphology::offset(grid, distance),
    }
    Ok(())
  }

  fn validate(&self) -> Result<(), VolumeError> {
    match *self {
      GridOp::Smooth { threshold, .. } => {
        if !(0.0..=1.0).contains(&threshold) || threshold.is_nan() {
          return Err(VolumeError::invalid(format!(
            "smooth threshold must lie in [0, 1], got {threshold}"
          )));
        }
      }
      GridOp::Offset { distance } => {
        if !distance.is_finite() {
          return Err(VolumeError::invalid(format!(
            "offset distance must be finite, got {distance}"
          )));
        }
      }
      _ => {}
    }
    Ok(())
  }
}
