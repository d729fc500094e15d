//! Pointwise boolean set algebra between two grids of identical shape.
//!
//! Implemented word-wise on the packed storage: 64 voxels per instruction,
//! parallelized over word chunks. Padding bits are zero in both operands,
//! so OR / AND / AND-NOT cannot leak into padding.

use rayon::prelude::*;

use crate::error::VolumeError;
use crate::grid::VoxelGrid;

/// Binary combinator kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BooleanOp {
  /// Cell active in either operand.
  Union,
  /// Cell active in both operands.
  Intersection,
  /// Cell active in the target but not in `other`.
  Difference,
}

impl BooleanOp {
  /// Combine `other` into `target` in place.
  ///
  /// Operands must agree in resolution, bounds, and dimensions; a
  /// `ShapeMismatch` is reported before anything is written.
  pub fn apply(&self, target: &mut VoxelGrid, other: &VoxelGrid) -> Result<(), VolumeError> {
    target.shape().ensure_compatible(other.shape())?;

    let op = *self;
    target
      .bits_mut()
      .words_mut()
      .par_iter_mut()
      .zip(other.bits().words().par_iter())
      .for_each(|(a, &b)| {
        *a = match op {
          BooleanOp::Union => *a | b,
          BooleanOp::Intersection => *a & b,
          BooleanOp::Difference => *a & !b,
        };
      });
    Ok(())
  }

  /// Combine into a fresh grid, leaving both operands untouched.
  pub fn combine(&self, a: &VoxelGrid, b: &VoxelGrid) -> Result<VoxelGrid, VolumeError> {
    let mut result = a.clone();
    self.apply(&mut result, b)?;
    Ok(result)
  }
}

#[cfg(test)]
#[path = "boolean_test.rs"]
mod boolean_test;
