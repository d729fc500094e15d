use glam::{IVec3, UVec3, Vec3};

use crate::error::VolumeError;
use crate::grid::VoxelGrid;
use crate::ops::GridOp;

fn cube(side: u32) -> VoxelGrid {
  VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(side)).unwrap()
}

fn speckled(side: u32) -> VoxelGrid {
  let mut grid = cube(side);
  for z in 0..side as i32 {
    for y in 0..side as i32 {
      for x in 0..side as i32 {
        if (x * 5 + y * 11 + z * 3) % 7 < 2 {
          grid.set(IVec3::new(x, y, z), true).unwrap();
        }
      }
    }
  }
  grid
}

#[test]
fn dilate_single_voxel_grows_a_cross() {
  let mut grid = cube(7);
  grid.set(IVec3::splat(3), true).unwrap();

  GridOp::Dilate { iterations: 1 }.apply(&mut grid).unwrap();

  // Self plus 6 face neighbors.
  assert_eq!(grid.count_occupied(), 7);
  assert!(grid.get(IVec3::new(4, 3, 3)).unwrap());
  assert!(grid.get(IVec3::new(3, 2, 3)).unwrap());
  assert!(!grid.get(IVec3::new(4, 4, 3)).unwrap(), "no diagonal growth");
}

#[test]
fn erode_removes_surface_shell() {
  let mut grid = cube(9);
  grid.set_region(IVec3::splat(2), IVec3::splat(6), true);
  let before = grid.count_occupied(); // 5^3

  GridOp::Erode { iterations: 1 }.apply(&mut grid).unwrap();

  // A 5^3 box erodes to 3^3.
  assert_eq!(before, 125);
  assert_eq!(grid.count_occupied(), 27);
  assert!(grid.get(IVec3::splat(4)).unwrap());
  assert!(!grid.get(IVec3::splat(2)).unwrap());
}

#[test]
fn erode_does_not_treat_the_boundary_as_empty() {
  let mut grid = cube(6);
  grid.fill(true);

  GridOp::Erode { iterations: 1 }.apply(&mut grid).unwrap();

  // Out-of-bounds neighbors cannot erode; a full grid stays full.
  assert_eq!(grid.count_occupied(), 6 * 6 * 6);
}

#[test]
fn dilate_never_decreases_and_erode_never_increases() {
  let original = speckled(10);

  for n in 1..=3 {
    let mut dilated = original.clone();
    GridOp::Dilate { iterations: n }.apply(&mut dilated).unwrap();
    assert!(dilated.count_occupied() >= original.count_occupied());

    let mut eroded = original.clone();
    GridOp::Erode { iterations: n }.apply(&mut eroded).unwrap();
    assert!(eroded.count_occupied() <= original.count_occupied());
  }
}

#[test]
fn open_and_close_bound_the_input() {
  let original = speckled(10);

  let mut opened = original.clone();
  GridOp::Open { iterations: 1 }.apply(&mut opened).unwrap();
  assert!(opened.count_occupied() <= original.count_occupied());

  let mut closed = original.clone();
  GridOp::Close { iterations: 1 }.apply(&mut closed).unwrap();
  assert!(closed.count_occupied() >= original.count_occupied());
}

#[test]
fn close_restores_a_solid_box() {
  let mut grid = cube(9);
  grid.set_region(IVec3::splat(2), IVec3::splat(6), true);
  let original = grid.clone();

  GridOp::Close { iterations: 1 }.apply(&mut grid).unwrap();
  assert_eq!(grid, original);
}

#[test]
fn smooth_erases_isolated_speckle() {
  let mut grid = cube(7);
  grid.set(IVec3::splat(3), true).unwrap();

  GridOp::Smooth {
    iterations: 1,
    threshold: 0.5,
  }
  .apply(&mut grid)
  .unwrap();

  // 1 active out of 27 in-bounds neighbors is far below threshold.
  assert_eq!(grid.count_occupied(), 0);
}

#[test]
fn smooth_keeps_solid_interior() {
  let mut grid = cube(9);
  grid.set_region(IVec3::splat(1), IVec3::splat(7), true);

  GridOp::Smooth {
    iterations: 1,
    threshold: 0.9,
  }
  .apply(&mut grid)
  .unwrap();

  // Deep interior cells see a fully active neighborhood.
  assert!(grid.get(IVec3::splat(4)).unwrap());
}

#[test]
fn smooth_zero_iterations_is_identity() {
  let original = speckled(8);
  let mut grid = original.clone();
  GridOp::Smooth {
    iterations: 0,
    threshold: 0.5,
  }
  .apply(&mut grid)
  .unwrap();
  assert_eq!(grid, original);
}

#[test]
fn smooth_rejects_bad_threshold() {
  let mut grid = cube(4);
  for threshold in [-0.1, 1.5, f32::NAN] {
    let result = GridOp::Smooth {
      iterations: 1,
      threshold,
    }
    .apply(&mut grid);
    assert!(matches!(result, Err(VolumeError::InvalidParameter { .. })));
  }
}

#[test]
fn offset_zero_is_identity() {
  let original = speckled(8);
  let mut grid = original.clone();
  GridOp::Offset { distance: 0.0 }.apply(&mut grid).unwrap();
  assert_eq!(grid, original);
}

#[test]
fn offset_grows_a_euclidean_ball() {
  let mut grid = cube(9);
  grid.set(IVec3::splat(4), true).unwrap();

  GridOp::Offset { distance: 1.5 }.apply(&mut grid).unwrap();

  // Distance 1.5 covers the 6 face steps (1.0) and 12 edge diagonals
  // (sqrt 2), but not the 8 corner diagonals (sqrt 3).
  assert_eq!(grid.count_occupied(), 1 + 6 + 12);
  assert!(grid.get(IVec3::new(5, 5, 4)).unwrap());
  assert!(!grid.get(IVec3::new(5, 5, 5)).unwrap());
}

#[test]
fn negative_offset_inverts_the_grown_set() {
  let mut grid = cube(5);
  grid.set(IVec3::splat(2), true).unwrap();

  GridOp::Offset { distance: -1.0 }.apply(&mut grid).unwrap();

  // Cells within distance 1 of the voxel become inactive; everything else
  // becomes active.
  assert!(!grid.get(IVec3::splat(2)).unwrap());
  assert!(!grid.get(IVec3::new(3, 2, 2)).unwrap());
  assert!(grid.get(IVec3::new(3, 3, 2)).unwrap());
  assert_eq!(grid.count_occupied(), 5 * 5 * 5 - 7);
}

#[test]
fn offset_rejects_non_finite_distance() {
  let mut grid = cube(4);
  for distance in [f32::NAN, f32::INFINITY] {
    let result = GridOp::Offset { distance }.apply(&mut grid);
    assert!(matches!(result, Err(VolumeError::InvalidParameter { .. })));
  }
}
