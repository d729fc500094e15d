//! Morphological filters: smooth, dilate, erode, and Euclidean offset.
//!
//! Dilate/erode step along the 6-face neighborhood; smooth votes over the
//! full 3x3x3 block; offset measures a Euclidean ball. Each iterated pass
//! runs through the stencil executor, so neighbor tests always see the
//! state from before the pass began.

use glam::IVec3;

use crate::grid::VoxelGrid;

use super::stencil::apply_pass;
use super::FACE_NEIGHBORS;

pub(crate) fn smooth(grid: &mut VoxelGrid, iterations: u32, threshold: f32) {
  let dims = grid.dimensions().as_ivec3();
  for _ in 0..iterations {
    apply_pass(grid, |input, x, y, z| {
      let mut active = 0u32;
      let mut total = 0u32;
      for dz in -1..=1 {
        for dy in -1..=1 {
          for dx in -1..=1 {
            let n = IVec3::new(x as i32 + dx, y as i32 + dy, z as i32 + dz);
            if n.cmpge(IVec3::ZERO).all() && n.cmplt(dims).all() {
              total += 1;
              if input.voxel(n.x as u32, n.y as u32, n.z as u32) {
                active += 1;
              }
            }
          }
        }
      }
      active as f32 / total as f32 >= threshold
    });
  }
}

pub(crate) fn dilate(grid: &mut VoxelGrid, iterations: u32) {
  let dims = grid.dimensions().as_ivec3();
  for _ in 0..iterations {
    apply_pass(grid, |input, x, y, z| {
      if input.voxel(x, y, z) {
        return true;
      }
      FACE_NEIGHBORS.iter().any(|&d| {
        let n = IVec3::new(x as i32, y as i32, z as i32) + d;
        n.cmpge(IVec3::ZERO).all() && n.cmplt(dims).all() && input.voxel(n.x as u32, n.y as u32, n.z as u32)
      })
    });
  }
}

pub(crate) fn erode(grid: &mut VoxelGrid, iterations: u32) {
  let dims = grid.dimensions().as_ivec3();
  for _ in 0..iterations {
    apply_pass(grid, |input, x, y, z| {
      if !input.voxel(x, y, z) {
        return false;
      }
      // Only in-bounds neighbors can erode a cell; the grid boundary is
      // not treated as empty space.
      FACE_NEIGHBORS.iter().all(|&d| {
        let n = IVec3::new(x as i32, y as i32, z as i32) + d;
        !(n.cmpge(IVec3::ZERO).all() && n.cmplt(dims).all())
          || input.voxel(n.x as u32, n.y as u32, n.z as u32)
      })
    });
  }
}

/// Euclidean offset, single pass.
///
/// `grown(c) = exists active cell within Euclidean distance |d| of c`;
/// positive distances keep `grown`, negative distances invert it. A zero
/// distance is the identity.
pub(crate) fn offset(grid: &mut VoxelGrid, distance: f32) {
  if distance == 0.0 {
    return;
  }
  let dims = grid.dimensions().as_ivec3();
  let radius = distance.abs().ceil() as i32;
  let limit_sq = distance * distance;
  let positive = distance > 0.0;

  apply_pass(grid, |input, x, y, z| {
    let mut grown = false;
    'scan: for dz in -radius..=radius {
      for dy in -radius..=radius {
        for dx in -radius..=radius {
          let dist_sq = (dx * dx + dy * dy + dz * dz) as f32;
          if dist_sq > limit_sq {
            continue;
          }
          let n = IVec3::new(x as i32 + dx, y as i32 + dy, z as i32 + dz);
          if n.cmpge(IVec3::ZERO).all()
            && n.cmplt(dims).all()
            && input.voxel(n.x as u32, n.y as u32, n.z as u32)
          {
            grown = true;
            break 'scan;
          }
        }
      }
    }
    if positive {
      grown
    } else {
      !grown
    }
  });
}

#[cfg(test)]
#[path = "morphology_test.rs"]
mod morphology_test;
