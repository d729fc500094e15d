//! Implicit surface voxelization.

use glam::{IVec3, Vec3};
use voxel_volume::{VolumeError, VoxelGrid};

use crate::util::cell_center;

/// Mark every voxel whose center evaluates at or below `isovalue`.
///
/// With an SDF and `isovalue = 0` this voxelizes the solid interior; a
/// positive isovalue inflates the shape by that world-space margin.
pub fn voxelize_implicit<F>(
  field: F,
  isovalue: f32,
  resolution: f32,
  min_bounds: Vec3,
  max_bounds: Vec3,
) -> Result<VoxelGrid, VolumeError>
where
  F: Fn(Vec3) -> f32,
{
  if !isovalue.is_finite() {
    return Err(VolumeError::InvalidParameter {
      reason: format!("isovalue must be finite, got {isovalue}"),
    });
  }

  let mut grid = VoxelGrid::new(resolution, min_bounds, max_bounds)?;
  let dims = grid.dimensions().as_ivec3();

  for z in 0..dims.z {
    for y in 0..dims.y {
      for x in 0..dims.x {
        let p = IVec3::new(x, y, z);
        if field(cell_center(&grid, p)) <= isovalue {
          grid.set(p, true)?;
        }
      }
    }
  }

  Ok(grid)
}

#[cfg(test)]
#[path = "implicit_test.rs"]
mod implicit_test;
