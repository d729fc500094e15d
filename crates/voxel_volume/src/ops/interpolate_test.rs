use glam::{IVec3, UVec3, Vec3};

use crate::error::VolumeError;
use crate::grid::VoxelGrid;
use crate::ops::{interpolate, interpolate_world};

fn grid_with_block() -> VoxelGrid {
  let mut grid = VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(8)).unwrap();
  grid.set_region(IVec3::splat(2), IVec3::splat(5), true);
  grid
}

#[test]
fn lattice_points_are_exact() {
  let grid = grid_with_block();

  for p in [
    IVec3::new(0, 0, 0),
    IVec3::new(2, 2, 2),
    IVec3::new(5, 3, 4),
    IVec3::new(6, 6, 6),
  ] {
    let sampled = interpolate(&grid, p.as_vec3()).unwrap();
    let expected = grid.get(p).unwrap() as u32 as f32;
    assert_eq!(sampled, expected, "at {p}");
  }
}

#[test]
fn midpoint_between_opposite_cells_is_half() {
  let mut grid = VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(4)).unwrap();
  grid.set(IVec3::new(1, 1, 1), true).unwrap();
  // (2,1,1) stays empty.

  let v = interpolate(&grid, Vec3::new(1.5, 1.0, 1.0)).unwrap();
  assert!((v - 0.5).abs() < 1e-6);
}

#[test]
fn cell_center_weights_all_corners_equally() {
  let mut grid = VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(4)).unwrap();
  grid.set(IVec3::new(1, 1, 1), true).unwrap();

  // One active corner out of eight.
  let v = interpolate(&grid, Vec3::splat(1.5)).unwrap();
  assert!((v - 0.125).abs() < 1e-6);
}

#[test]
fn interpolation_is_monotone_along_an_edge() {
  let mut grid = VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(4)).unwrap();
  grid.set(IVec3::new(2, 1, 1), true).unwrap();

  let near = interpolate(&grid, Vec3::new(1.25, 1.0, 1.0)).unwrap();
  let far = interpolate(&grid, Vec3::new(1.75, 1.0, 1.0)).unwrap();
  assert!(near < far);
  assert!((near - 0.25).abs() < 1e-6);
  assert!((far - 0.75).abs() < 1e-6);
}

#[test]
fn domain_is_half_open_below_dim_minus_one() {
  let grid = grid_with_block(); // dims 8 -> valid domain [0, 7)

  assert!(interpolate(&grid, Vec3::splat(6.999)).is_ok());

  for p in [
    Vec3::splat(-0.001),
    Vec3::splat(7.0),
    Vec3::new(3.0, 7.5, 3.0),
    Vec3::new(3.0, 3.0, 100.0),
  ] {
    assert!(
      matches!(
        interpolate(&grid, p),
        Err(VolumeError::InvalidParameter { .. })
      ),
      "position {p} must be rejected"
    );
  }
}

#[test]
fn world_sampling_maps_through_grid_coordinates() {
  let mut grid = VoxelGrid::new(0.5, Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
  grid.set(IVec3::new(2, 2, 2), true).unwrap();

  // World (0,0,0) is grid (2,2,2): the active lattice point exactly.
  let v = interpolate_world(&grid, Vec3::ZERO).unwrap();
  assert_eq!(v, 1.0);

  // A quarter-resolution step along +x blends toward the empty neighbor.
  let v = interpolate_world(&grid, Vec3::new(0.125, 0.0, 0.0)).unwrap();
  assert!((v - 0.75).abs() < 1e-6);
}
