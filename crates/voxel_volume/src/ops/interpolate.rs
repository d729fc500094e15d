//! Trilinear interpolation of the occupancy lattice.
//!
//! Occupancy is read as a 0/1 lattice; sampling blends the 8 cell values
//! surrounding a continuous position. At an exact lattice point the result
//! is exactly the cell value.

use glam::Vec3;

use crate::error::VolumeError;
use crate::grid::VoxelGrid;

/// Sample the grid at a continuous position in grid coordinates.
///
/// The position must lie inside `[0, dim - 1)` on every axis so that the
/// upper interpolation corner is a real lattice point; anything else is an
/// `InvalidParameter`.
pub fn interpolate(grid: &VoxelGrid, position: Vec3) -> Result<f32, VolumeError> {
  let dims = grid.dimensions().as_vec3();
  let upper = dims - Vec3::ONE;
  if position.cmplt(Vec3::ZERO).any() || position.cmpge(upper).any() {
    return Err(VolumeError::invalid(format!(
      "interpolation position {position} outside [0, {upper})"
    )));
  }

  let base = position.floor();
  let frac = position - base;
  let (x0, y0, z0) = (base.x as u32, base.y as u32, base.z as u32);
  let (x1, y1, z1) = (x0 + 1, y0 + 1, z0 + 1);

  let v000 = grid.voxel(x0, y0, z0) as u32 as f32;
  let v100 = grid.voxel(x1, y0, z0) as u32 as f32;
  let v010 = grid.voxel(x0, y1, z0) as u32 as f32;
  let v110 = grid.voxel(x1, y1, z0) as u32 as f32;
  let v001 = grid.voxel(x0, y0, z1) as u32 as f32;
  let v101 = grid.voxel(x1, y0, z1) as u32 as f32;
  let v011 = grid.voxel(x0, y1, z1) as u32 as f32;
  let v111 = grid.voxel(x1, y1, z1) as u32 as f32;

  // Blend along x, then y, then z.
  let c00 = v000 * (1.0 - frac.x) + v100 * frac.x;
  let c10 = v010 * (1.0 - frac.x) + v110 * frac.x;
  let c01 = v001 * (1.0 - frac.x) + v101 * frac.x;
  let c11 = v011 * (1.0 - frac.x) + v111 * frac.x;

  let c0 = c00 * (1.0 - frac.y) + c10 * frac.y;
  let c1 = c01 * (1.0 - frac.y) + c11 * frac.y;

  Ok(c0 * (1.0 - frac.z) + c1 * frac.z)
}

/// Sample at a world-space position by mapping it through the grid's
/// coordinate contract first.
pub fn interpolate_world(grid: &VoxelGrid, world_pos: Vec3) -> Result<f32, VolumeError> {
  let grid_pos = (world_pos - grid.min_bounds()) / grid.resolution();
  interpolate(grid, grid_pos)
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;
