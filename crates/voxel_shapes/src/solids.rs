//! Solid primitive voxelizers: box, sphere, cylinder, capsule.

use glam::{IVec3, Vec3};
use voxel_volume::{VolumeError, VoxelGrid};

use crate::util::{cell_center, clamp_to_grid};

fn invalid(reason: String) -> VolumeError {
  VolumeError::InvalidParameter { reason }
}

/// Mark every voxel whose center lies inside the shape's index range and
/// passes `inside`.
fn fill_range(
  grid: &mut VoxelGrid,
  world_min: Vec3,
  world_max: Vec3,
  inside: impl Fn(Vec3) -> bool,
) -> Result<(), VolumeError> {
  let lo = clamp_to_grid(grid, grid.world_to_grid(world_min));
  let hi = clamp_to_grid(grid, grid.world_to_grid(world_max));
  for z in lo.z..=hi.z {
    for y in lo.y..=hi.y {
      for x in lo.x..=hi.x {
        let p = IVec3::new(x, y, z);
        if inside(cell_center(grid, p)) {
          grid.set(p, true)?;
        }
      }
    }
  }
  Ok(())
}

/// Axis-aligned solid box given by center and full edge lengths.
pub fn voxelize_box(
  center: Vec3,
  size: Vec3,
  resolution: f32,
  min_bounds: Vec3,
  max_bounds: Vec3,
) -> Result<VoxelGrid, VolumeError> {
  if size.cmple(Vec3::ZERO).any() {
    return Err(invalid(format!("box size must be positive, got {size}")));
  }
  let mut grid = VoxelGrid::new(resolution, min_bounds, max_bounds)?;
  let half = size * 0.5;
  fill_range(&mut grid, center - half, center + half, |c| {
    (c - center).abs().cmple(half).all()
  })?;
  Ok(grid)
}

/// Solid ball.
pub fn voxelize_sphere(
  center: Vec3,
  radius: f32,
  resolution: f32,
  min_bounds: Vec3,
  max_bounds: Vec3,
) -> Result<VoxelGrid, VolumeError> {
  if !radius.is_finite() || radius <= 0.0 {
    return Err(invalid(format!("sphere radius must be positive, got {radius}")));
  }
  let mut grid = VoxelGrid::new(resolution, min_bounds, max_bounds)?;
  let extent = Vec3::splat(radius);
  let r_sq = radius * radius;
  fill_range(&mut grid, center - extent, center + extent, |c| {
    (c - center).length_squared() <= r_sq
  })?;
  Ok(grid)
}

/// Finite solid cylinder about an arbitrary axis through `center`.
///
/// `height` is the full extent along the axis; the axis is normalized
/// internally and must not be zero-length.
pub fn voxelize_cylinder(
  center: Vec3,
  axis: Vec3,
  radius: f32,
  height: f32,
  resolution: f32,
  min_bounds: Vec3,
  max_bounds: Vec3,
) -> Result<VoxelGrid, VolumeError> {
  if !radius.is_finite() || radius <= 0.0 {
    return Err(invalid(format!(
      "cylinder radius must be positive, got {radius}"
    )));
  }
  if !height.is_finite() || height <= 0.0 {
    return Err(invalid(format!(
      "cylinder height must be positive, got {height}"
    )));
  }
  let axis = axis
    .try_normalize()
    .ok_or_else(|| invalid(format!("cylinder axis must be non-zero, got {axis}")))?;

  let mut grid = VoxelGrid::new(resolution, min_bounds, max_bounds)?;
  let half_height = height * 0.5;
  let r_sq = radius * radius;
  // Conservative world box: half the height plus the radius on every axis.
  let extent = Vec3::splat(half_height + radius);
  fill_range(&mut grid, center - extent, center + extent, |c| {
    let d = c - center;
    let axial = d.dot(axis);
    axial.abs() <= half_height && (d - axial * axis).length_squared() <= r_sq
  })?;
  Ok(grid)
}

/// Capsule: every point within `radius` of the segment `start` - `end`.
pub fn voxelize_capsule(
  start: Vec3,
  end: Vec3,
  radius: f32,
  resolution: f32,
  min_bounds: Vec3,
  max_bounds: Vec3,
) -> Result<VoxelGrid, VolumeError> {
  if !radius.is_finite() || radius <= 0.0 {
    return Err(invalid(format!(
      "capsule radius must be positive, got {radius}"
    )));
  }
  let mut grid = VoxelGrid::new(resolution, min_bounds, max_bounds)?;
  let seg = end - start;
  let seg_len_sq = seg.length_squared();
  let r_sq = radius * radius;
  let extent = Vec3::splat(radius);
  fill_range(
    &mut grid,
    start.min(end) - extent,
    start.max(end) + extent,
    |c| {
      let t = if seg_len_sq > 0.0 {
        ((c - start).dot(seg) / seg_len_sq).clamp(0.0, 1.0)
      } else {
        0.0
      };
      (c - (start + seg * t)).length_squared() <= r_sq
    },
  )?;
  Ok(grid)
}

#[cfg(test)]
#[path = "solids_test.rs"]
mod solids_test;
