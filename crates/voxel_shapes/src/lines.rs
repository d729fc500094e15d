//! Line voxelization via 3D DDA cell traversal.

use glam::{IVec3, Vec3};
use voxel_volume::{VolumeError, VoxelGrid};

/// Mark every cell the segment `start` - `end` passes through.
///
/// Uses an Amanatides-Woo style DDA walk in continuous grid coordinates, so
/// the marked cells form a connected corridor along the segment. Cells
/// outside the grid are skipped; a segment entirely outside marks nothing.
pub fn voxelize_line(
  start: Vec3,
  end: Vec3,
  resolution: f32,
  min_bounds: Vec3,
  max_bounds: Vec3,
) -> Result<VoxelGrid, VolumeError> {
  let mut grid = VoxelGrid::new(resolution, min_bounds, max_bounds)?;

  // Work in continuous grid coordinates: cell (i) spans [i, i+1).
  let rel_start = (start - grid.min_bounds()) / grid.resolution();
  let rel_end = (end - grid.min_bounds()) / grid.resolution();

  let mut cell = rel_start.floor().as_ivec3();
  let end_cell = rel_end.floor().as_ivec3();
  let dir = rel_end - rel_start;

  let step = IVec3::new(
    if dir.x > 0.0 { 1 } else { -1 },
    if dir.y > 0.0 { 1 } else { -1 },
    if dir.z > 0.0 { 1 } else { -1 },
  );

  // Parametric distance along the segment consumed by crossing one cell on
  // each axis, and the distance to the first crossing.
  let mut t_max = Vec3::ZERO;
  let mut t_delta = Vec3::ZERO;
  for i in 0..3 {
    if dir[i] != 0.0 {
      t_delta[i] = 1.0 / dir[i].abs();
      let frac = rel_start[i] - rel_start[i].floor();
      t_max[i] = if dir[i] > 0.0 {
        (1.0 - frac) / dir[i].abs()
      } else {
        frac / dir[i].abs()
      };
    } else {
      t_delta[i] = f32::INFINITY;
      t_max[i] = f32::INFINITY;
    }
  }

  // The walk crosses at most the Manhattan cell distance many boundaries.
  let max_steps = (end_cell - cell).abs().element_sum() + 1;

  for _ in 0..max_steps {
    if grid.is_inside(cell) {
      grid.set(cell, true)?;
    }
    if cell == end_cell {
      break;
    }
    // Advance across the nearest cell boundary.
    if t_max.x <= t_max.y && t_max.x <= t_max.z {
      cell.x += step.x;
      t_max.x += t_delta.x;
    } else if t_max.y <= t_max.z {
      cell.y += step.y;
      t_max.y += t_delta.y;
    } else {
      cell.z += step.z;
      t_max.z += t_delta.z;
    }
  }

  Ok(grid)
}

#[cfg(test)]
#[path = "lines_test.rs"]
mod lines_test;
