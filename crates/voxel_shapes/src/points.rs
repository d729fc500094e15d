//! Point cloud voxelization.

use glam::{IVec3, Vec3};
use voxel_volume::{VolumeError, VoxelGrid};

use crate::util::{cell_center, clamp_to_grid};

/// Mark the cell containing each point; with `point_radius > 0`, mark the
/// whole ball around it instead.
///
/// Points outside the grid (and the out-of-grid part of any ball) are
/// skipped.
pub fn voxelize_point_cloud(
  points: &[Vec3],
  point_radius: f32,
  resolution: f32,
  min_bounds: Vec3,
  max_bounds: Vec3,
) -> Result<VoxelGrid, VolumeError> {
  if !point_radius.is_finite() || point_radius < 0.0 {
    return Err(VolumeError::InvalidParameter {
      reason: format!("point radius must be non-negative, got {point_radius}"),
    });
  }

  let mut grid = VoxelGrid::new(resolution, min_bounds, max_bounds)?;

  for &point in points {
    if point_radius == 0.0 {
      let cell = grid.world_to_grid(point);
      if grid.is_inside(cell) {
        grid.set(cell, true)?;
      }
      continue;
    }

    let extent = Vec3::splat(point_radius);
    let lo = clamp_to_grid(&grid, grid.world_to_grid(point - extent));
    let hi = clamp_to_grid(&grid, grid.world_to_grid(point + extent));
    let r_sq = point_radius * point_radius;
    for z in lo.z..=hi.z {
      for y in lo.y..=hi.y {
        for x in lo.x..=hi.x {
          let p = IVec3::new(x, y, z);
          if (cell_center(&grid, p) - point).length_squared() <= r_sq {
            grid.set(p, true)?;
          }
        }
      }
    }
  }

  Ok(grid)
}

#[cfg(test)]
#[path = "points_test.rs"]
mod points_test;
