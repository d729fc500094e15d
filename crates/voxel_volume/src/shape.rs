//! GridShape - the coordinate/bounds contract shared by all field types.
//!
//! A shape binds a world-space AABB to an integer index space through a
//! uniform voxel edge length ("resolution"). `VoxelGrid`, `ScalarField`,
//! and `LabelField` all embed one, so a distance field or a label field is
//! addressable with exactly the same coordinates as the occupancy grid it
//! was derived from.

use glam::{IVec3, UVec3, Vec3};

use crate::error::VolumeError;

/// World-space AABB + resolution + derived integer dimensions.
///
/// Invariants, upheld by the constructors:
/// - `resolution > 0`
/// - `max_bounds >= min_bounds` componentwise
/// - `dimensions[i] = floor((max[i] - min[i]) / resolution) + 1`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridShape {
  resolution: f32,
  min_bounds: Vec3,
  max_bounds: Vec3,
  dimensions: UVec3,
}

impl GridShape {
  /// Create a shape from a resolution and world-space AABB corners.
  ///
  /// Fails with `InvalidParameter` if `resolution` is not a positive finite
  /// number or the AABB is inverted on any axis.
  pub fn new(resolution: f32, min_bounds: Vec3, max_bounds: Vec3) -> Result<Self, VolumeError> {
    if !resolution.is_finite() || resolution <= 0.0 {
      return Err(VolumeError::invalid(format!(
        "resolution must be positive, got {resolution}"
      )));
    }
    if min_bounds.cmpgt(max_bounds).any() {
      return Err(VolumeError::invalid(format!(
        "min_bounds {min_bounds} exceeds max_bounds {max_bounds}"
      )));
    }
    let size = max_bounds - min_bounds;
    let dimensions = UVec3::new(
      (size.x / resolution).floor() as u32 + 1,
      (size.y / resolution).floor() as u32 + 1,
      (size.z / resolution).floor() as u32 + 1,
    );
    Ok(Self {
      resolution,
      min_bounds,
      max_bounds,
      dimensions,
    })
  }

  /// Create a shape with exact integer dimensions.
  ///
  /// `max_bounds` is derived as `min + (dims - 1) * resolution`, which makes
  /// the derived dimensions round-trip exactly. This is the constructor to
  /// use when a specific side length matters (e.g. a power-of-two cube for
  /// octree conversion).
  pub fn with_dimensions(
    resolution: f32,
    min_bounds: Vec3,
    dimensions: UVec3,
  ) -> Result<Self, VolumeError> {
    if !resolution.is_finite() || resolution <= 0.0 {
      return Err(VolumeError::invalid(format!(
        "resolution must be positive, got {resolution}"
      )));
    }
    if dimensions.cmpeq(UVec3::ZERO).any() {
      return Err(VolumeError::invalid(format!(
        "dimensions must be non-zero on every axis, got {dimensions}"
      )));
    }
    let max_bounds = min_bounds + (dimensions - UVec3::ONE).as_vec3() * resolution;
    Ok(Self {
      resolution,
      min_bounds,
      max_bounds,
      dimensions,
    })
  }

  /// Reassemble a shape from previously persisted fields.
  ///
  /// Trusts the stored dimensions rather than re-deriving them, so a grid
  /// round-trips bit-for-bit even when float division would re-bin an edge.
  /// Basic invariants are still enforced.
  pub(crate) fn from_parts(
    resolution: f32,
    min_bounds: Vec3,
    max_bounds: Vec3,
    dimensions: UVec3,
  ) -> Result<Self, VolumeError> {
    if !resolution.is_finite() || resolution <= 0.0 {
      return Err(VolumeError::invalid(format!(
        "resolution must be positive, got {resolution}"
      )));
    }
    if min_bounds.cmpgt(max_bounds).any() {
      return Err(VolumeError::invalid(format!(
        "min_bounds {min_bounds} exceeds max_bounds {max_bounds}"
      )));
    }
    if dimensions.cmpeq(UVec3::ZERO).any() {
      return Err(VolumeError::invalid(format!(
        "dimensions must be non-zero on every axis, got {dimensions}"
      )));
    }
    Ok(Self {
      resolution,
      min_bounds,
      max_bounds,
      dimensions,
    })
  }

  /// World units per voxel edge.
  #[inline]
  pub fn resolution(&self) -> f32 {
    self.resolution
  }

  /// Minimum corner of the world-space AABB (the grid origin).
  #[inline]
  pub fn min_bounds(&self) -> Vec3 {
    self.min_bounds
  }

  /// Maximum corner of the world-space AABB.
  #[inline]
  pub fn max_bounds(&self) -> Vec3 {
    self.max_bounds
  }

  /// Integer extent on each axis.
  #[inline]
  pub fn dimensions(&self) -> UVec3 {
    self.dimensions
  }

  /// Total number of voxels (`dim_x * dim_y * dim_z`).
  #[inline]
  pub fn volume(&self) -> usize {
    self.dimensions.x as usize * self.dimensions.y as usize * self.dimensions.z as usize
  }

  /// True if all three dimensions are equal.
  #[inline]
  pub fn is_cubic(&self) -> bool {
    self.dimensions.x == self.dimensions.y && self.dimensions.y == self.dimensions.z
  }

  /// Map a world position to the grid cell containing it.
  ///
  /// Componentwise `floor((p - min) / resolution)` - a true floor, so
  /// positions below `min_bounds` map to negative indices rather than
  /// collapsing onto cell 0. The result may lie outside the grid; check
  /// with [`contains`](Self::contains).
  #[inline]
  pub fn world_to_grid(&self, world_pos: Vec3) -> IVec3 {
    ((world_pos - self.min_bounds) / self.resolution)
      .floor()
      .as_ivec3()
  }

  /// Map a grid index to the **minimum corner** of its voxel.
  ///
  /// The voxel center is `grid_to_world(i) + resolution / 2` on each axis.
  #[inline]
  pub fn grid_to_world(&self, grid_pos: IVec3) -> Vec3 {
    self.min_bounds + grid_pos.as_vec3() * self.resolution
  }

  /// Bounds predicate: `0 <= i < dim` on every axis.
  #[inline]
  pub fn contains(&self, position: IVec3) -> bool {
    position.cmpge(IVec3::ZERO).all() && position.cmplt(self.dimensions.as_ivec3()).all()
  }

  /// Row-major linear index, x fastest-varying.
  ///
  /// Callers must ensure the position is in range.
  #[inline(always)]
  pub fn linear_index(&self, x: u32, y: u32, z: u32) -> usize {
    debug_assert!(self.contains(IVec3::new(x as i32, y as i32, z as i32)));
    x as usize
      + y as usize * self.dimensions.x as usize
      + z as usize * self.dimensions.x as usize * self.dimensions.y as usize
  }

  /// Check operand compatibility for binary operators.
  ///
  /// Shapes must agree in resolution, both bounds corners, and dimensions;
  /// anything else is a `ShapeMismatch`.
  pub fn ensure_compatible(&self, other: &GridShape) -> Result<(), VolumeError> {
    if self == other {
      Ok(())
    } else {
      Err(VolumeError::ShapeMismatch {
        reason: format!(
          "left {:?} res {} vs right {:?} res {}",
          self.dimensions, self.resolution, other.dimensions, other.resolution
        ),
      })
    }
  }
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;
