//! Small helpers shared by the shape producers.

use glam::{IVec3, Vec3};
use voxel_volume::VoxelGrid;

/// Clamp a grid index into the valid index range.
pub(crate) fn clamp_to_grid(grid: &VoxelGrid, p: IVec3) -> IVec3 {
  p.clamp(IVec3::ZERO, grid.dimensions().as_ivec3() - IVec3::ONE)
}

/// World-space center of a voxel.
pub(crate) fn cell_center(grid: &VoxelGrid, p: IVec3) -> Vec3 {
  grid.grid_to_world(p) + Vec3::splat(grid.resolution() * 0.5)
}
