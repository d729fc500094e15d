//! VoxelGrid - dense boolean occupancy volume.
//!
//! The grid owns a [`GridShape`] (world AABB + resolution + derived integer
//! dimensions) and a bit-packed [`BitVolume`]. Producers populate it through
//! `set`, operators transform it in place, and the octree store compresses
//! it. All public access is bounds-checked; out-of-range indices are
//! reported, never clamped.

pub mod bitvol;
pub mod io;

use glam::{IVec3, UVec3, Vec3};

use crate::error::VolumeError;
use crate::shape::GridShape;

pub use bitvol::BitVolume;

/// Dense boolean volume over a 3D index space.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
  shape: GridShape,
  data: BitVolume,
}

impl VoxelGrid {
  /// Create a zero-filled grid from a resolution and world-space AABB.
  pub fn new(resolution: f32, min_bounds: Vec3, max_bounds: Vec3) -> Result<Self, VolumeError> {
    Ok(Self::from_shape(GridShape::new(
      resolution, min_bounds, max_bounds,
    )?))
  }

  /// Create a zero-filled grid with exact integer dimensions.
  ///
  /// Use this when the side length matters more than the upper bound, e.g.
  /// a power-of-two cube destined for octree conversion.
  pub fn with_dimensions(
    resolution: f32,
    min_bounds: Vec3,
    dimensions: UVec3,
  ) -> Result<Self, VolumeError> {
    Ok(Self::from_shape(GridShape::with_dimensions(
      resolution, min_bounds, dimensions,
    )?))
  }

  /// Create a zero-filled grid over an existing shape.
  pub fn from_shape(shape: GridShape) -> Self {
    Self {
      data: BitVolume::new(shape.dimensions()),
      shape,
    }
  }

  #[inline]
  pub fn shape(&self) -> &GridShape {
    &self.shape
  }

  #[inline]
  pub fn resolution(&self) -> f32 {
    self.shape.resolution()
  }

  #[inline]
  pub fn min_bounds(&self) -> Vec3 {
    self.shape.min_bounds()
  }

  #[inline]
  pub fn max_bounds(&self) -> Vec3 {
    self.shape.max_bounds()
  }

  #[inline]
  pub fn dimensions(&self) -> UVec3 {
    self.shape.dimensions()
  }

  /// Bounds predicate: true iff `0 <= position < dimensions` on every axis.
  #[inline]
  pub fn is_inside(&self, position: IVec3) -> bool {
    self.shape.contains(position)
  }

  /// Read the voxel at `position`.
  pub fn get(&self, position: IVec3) -> Result<bool, VolumeError> {
    if !self.shape.contains(position) {
      return Err(self.out_of_range(position));
    }
    Ok(
      self
        .data
        .get(position.x as u32, position.y as u32, position.z as u32),
    )
  }

  /// Write the voxel at `position`.
  pub fn set(&mut self, position: IVec3, value: bool) -> Result<(), VolumeError> {
    if !self.shape.contains(position) {
      return Err(self.out_of_range(position));
    }
    self
      .data
      .set(position.x as u32, position.y as u32, position.z as u32, value);
    Ok(())
  }

  /// Unchecked read for hot loops that already validated their coordinates.
  #[inline(always)]
  pub(crate) fn voxel(&self, x: u32, y: u32, z: u32) -> bool {
    self.data.get(x, y, z)
  }

  /// Set every voxel to `value`.
  pub fn fill(&mut self, value: bool) {
    self.data.fill(value);
  }

  /// Set every voxel to false.
  pub fn clear(&mut self) {
    self.fill(false);
  }

  /// Fill the inclusive box `[min, max]`, clamped to the grid.
  ///
  /// The requested box may extend past the grid on any side; only the
  /// overlap is written. A box entirely outside the grid writes nothing.
  pub fn set_region(&mut self, min: IVec3, max: IVec3, value: bool) {
    let dims = self.dimensions().as_ivec3();
    let lo = min.max(IVec3::ZERO);
    let hi = max.min(dims - IVec3::ONE);
    for z in lo.z..=hi.z {
      for y in lo.y..=hi.y {
        for x in lo.x..=hi.x {
          self.data.set(x as u32, y as u32, z as u32, value);
        }
      }
    }
  }

  /// Number of occupied voxels. O(volume / 64) via popcount.
  #[inline]
  pub fn count_occupied(&self) -> usize {
    self.data.count_ones()
  }

  /// Occupied fraction in `[0, 1]`.
  pub fn occupancy_rate(&self) -> f32 {
    self.count_occupied() as f32 / self.shape.volume() as f32
  }

  /// Map a world position to the grid cell containing it.
  #[inline]
  pub fn world_to_grid(&self, world_pos: Vec3) -> IVec3 {
    self.shape.world_to_grid(world_pos)
  }

  /// Map a grid index to the minimum corner of its voxel.
  #[inline]
  pub fn grid_to_world(&self, grid_pos: IVec3) -> Vec3 {
    self.shape.grid_to_world(grid_pos)
  }

  /// Borrow the packed storage (operators combine grids word-wise).
  #[inline]
  pub(crate) fn bits(&self) -> &BitVolume {
    &self.data
  }

  #[inline]
  pub(crate) fn bits_mut(&mut self) -> &mut BitVolume {
    &mut self.data
  }

  /// Replace the storage wholesale (stencil passes swap in their output).
  ///
  /// Debug-asserts that the replacement matches the grid dimensions.
  pub(crate) fn replace_bits(&mut self, data: BitVolume) {
    debug_assert_eq!(data.dimensions(), self.shape.dimensions());
    self.data = data;
  }

  fn out_of_range(&self, position: IVec3) -> VolumeError {
    VolumeError::OutOfRange {
      position,
      dimensions: self.dimensions().as_ivec3(),
    }
  }
}
