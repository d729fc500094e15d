//! Scalar and label fields over the grid coordinate contract.
//!
//! Distance transforms produce real-valued distances and component labeling
//! produces integer labels; neither belongs in boolean occupancy storage.
//! These field types share [`GridShape`] with [`VoxelGrid`](crate::VoxelGrid)
//! so results stay addressable with the same indices and world mapping, but
//! they carry properly typed payloads.

use glam::IVec3;

use crate::error::VolumeError;
use crate::shape::GridShape;

/// Dense `f32` field (e.g. grid-step distances).
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
  shape: GridShape,
  data: Vec<f32>,
}

impl ScalarField {
  /// Allocate a field filled with `initial`.
  pub fn filled(shape: GridShape, initial: f32) -> Self {
    Self {
      data: vec![initial; shape.volume()],
      shape,
    }
  }

  #[inline]
  pub fn shape(&self) -> &GridShape {
    &self.shape
  }

  pub fn get(&self, position: IVec3) -> Result<f32, VolumeError> {
    if !self.shape.contains(position) {
      return Err(VolumeError::OutOfRange {
        position,
        dimensions: self.shape.dimensions().as_ivec3(),
      });
    }
    Ok(self.data[self.shape.linear_index(position.x as u32, position.y as u32, position.z as u32)])
  }

  pub fn set(&mut self, position: IVec3, value: f32) -> Result<(), VolumeError> {
    if !self.shape.contains(position) {
      return Err(VolumeError::OutOfRange {
        position,
        dimensions: self.shape.dimensions().as_ivec3(),
      });
    }
    let idx = self
      .shape
      .linear_index(position.x as u32, position.y as u32, position.z as u32);
    self.data[idx] = value;
    Ok(())
  }

  #[inline(always)]
  pub(crate) fn value_mut(&mut self, x: u32, y: u32, z: u32) -> &mut f32 {
    let idx = self.shape.linear_index(x, y, z);
    &mut self.data[idx]
  }

  /// Flat row-major view (x fastest).
  #[inline]
  pub fn as_slice(&self) -> &[f32] {
    &self.data
  }

  /// Largest finite value in the field.
  pub fn max_value(&self) -> f32 {
    self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
  }
}

/// Dense `u32` field; label 0 means "unlabeled / background".
#[derive(Clone, Debug, PartialEq)]
pub struct LabelField {
  shape: GridShape,
  data: Vec<u32>,
}

impl LabelField {
  /// Allocate an all-background field.
  pub fn zeroed(shape: GridShape) -> Self {
    Self {
      data: vec![0; shape.volume()],
      shape,
    }
  }

  #[inline]
  pub fn shape(&self) -> &GridShape {
    &self.shape
  }

  pub fn get(&self, position: IVec3) -> Result<u32, VolumeError> {
    if !self.shape.contains(position) {
      return Err(VolumeError::OutOfRange {
        position,
        dimensions: self.shape.dimensions().as_ivec3(),
      });
    }
    Ok(self.data[self.shape.linear_index(position.x as u32, position.y as u32, position.z as u32)])
  }

  #[inline(always)]
  pub(crate) fn label(&self, x: u32, y: u32, z: u32) -> u32 {
    self.data[self.shape.linear_index(x, y, z)]
  }

  #[inline(always)]
  pub(crate) fn label_mut(&mut self, x: u32, y: u32, z: u32) -> &mut u32 {
    let idx = self.shape.linear_index(x, y, z);
    &mut self.data[idx]
  }

  /// Flat row-major view (x fastest).
  #[inline]
  pub fn as_slice(&self) -> &[u32] {
    &self.data
  }

  /// Number of distinct non-zero labels present.
  pub fn distinct_labels(&self) -> u32 {
    let mut seen = std::collections::HashSet::new();
    for &label in &self.data {
      if label != 0 {
        seen.insert(label);
      }
    }
    seen.len() as u32
  }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;
