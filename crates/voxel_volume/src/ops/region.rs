//! Frontier-driven region algorithms: distance transform, connected
//! component labeling, and flood fill.
//!
//! All three are sequential breadth-first traversals over a `VecDeque`
//! frontier; the input grid is only ever read. Results go to properly
//! typed fields - distances are `f32`, labels are `u32` - never back into
//! boolean storage.

use std::collections::VecDeque;

use glam::IVec3;

use crate::error::VolumeError;
use crate::field::{LabelField, ScalarField};
use crate::grid::{BitVolume, VoxelGrid};

use super::{Connectivity, FACE_NEIGHBORS};

/// Multi-source shortest grid-step distance from every active voxel.
///
/// Active voxels are distance 0; every other voxel gets its 6-face BFS step
/// count to the nearest active voxel, clamped to `max_distance`. Voxels
/// farther than `max_distance` (or unreachable, e.g. on an all-empty grid)
/// report exactly `max_distance`.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "ops::distance_transform")
)]
pub fn distance_transform(
  grid: &VoxelGrid,
  max_distance: f32,
) -> Result<ScalarField, VolumeError> {
  if !max_distance.is_finite() || max_distance < 0.0 {
    return Err(VolumeError::invalid(format!(
      "max_distance must be finite and non-negative, got {max_distance}"
    )));
  }

  let dims = grid.dimensions();
  let mut field = ScalarField::filled(*grid.shape(), max_distance);
  let mut frontier: VecDeque<(IVec3, f32)> = VecDeque::new();

  for z in 0..dims.z {
    for y in 0..dims.y {
      for x in 0..dims.x {
        if grid.voxel(x, y, z) {
          *field.value_mut(x, y, z) = 0.0;
          frontier.push_back((IVec3::new(x as i32, y as i32, z as i32), 0.0));
        }
      }
    }
  }

  let idims = dims.as_ivec3();
  while let Some((pos, dist)) = frontier.pop_front() {
    let next = dist + 1.0;
    for &d in &FACE_NEIGHBORS {
      let n = pos + d;
      if n.cmpge(IVec3::ZERO).all() && n.cmplt(idims).all() {
        let cell = field.value_mut(n.x as u32, n.y as u32, n.z as u32);
        if next < *cell {
          *cell = next;
          frontier.push_back((n, next));
        }
      }
    }
  }

  Ok(field)
}

/// Label every connected group of active voxels.
///
/// A raster scan (z, then y, then x ascending) seeds a BFS per unlabeled
/// active voxel; labels count up from 1 in seed order, so the labeling is
/// deterministic. Returns the label field and the component count.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "ops::connected_components")
)]
pub fn connected_components(grid: &VoxelGrid, connectivity: Connectivity) -> (LabelField, u32) {
  let dims = grid.dimensions();
  let idims = dims.as_ivec3();
  let mut labels = LabelField::zeroed(*grid.shape());
  let mut frontier: VecDeque<IVec3> = VecDeque::new();
  let mut next_label = 1u32;

  for z in 0..dims.z {
    for y in 0..dims.y {
      for x in 0..dims.x {
        if !grid.voxel(x, y, z) || labels.label(x, y, z) != 0 {
          continue;
        }

        *labels.label_mut(x, y, z) = next_label;
        frontier.push_back(IVec3::new(x as i32, y as i32, z as i32));

        while let Some(pos) = frontier.pop_front() {
          for dz in -1..=1 {
            for dy in -1..=1 {
              for dx in -1..=1 {
                let d = IVec3::new(dx, dy, dz);
                if !connectivity.admits(d) {
                  continue;
                }
                let n = pos + d;
                if n.cmpge(IVec3::ZERO).all()
                  && n.cmplt(idims).all()
                  && grid.voxel(n.x as u32, n.y as u32, n.z as u32)
                  && labels.label(n.x as u32, n.y as u32, n.z as u32) == 0
                {
                  *labels.label_mut(n.x as u32, n.y as u32, n.z as u32) = next_label;
                  frontier.push_back(n);
                }
              }
            }
          }
        }

        next_label += 1;
      }
    }
  }

  (labels, next_label - 1)
}

/// Flood-fill the inactive region reachable from `seed`.
///
/// Active voxels are obstacles; they and the grid boundary stop the fill.
/// On return the grid contains exactly the filled region (obstacles are
/// never marked). A seed on an obstacle fills nothing. Returns the number
/// of voxels filled.
pub fn flood_fill(
  grid: &mut VoxelGrid,
  seed: IVec3,
  connectivity: Connectivity,
) -> Result<usize, VolumeError> {
  if !grid.is_inside(seed) {
    return Err(VolumeError::invalid(format!(
      "fill seed {seed} is outside the grid (dimensions {})",
      grid.dimensions()
    )));
  }

  let idims = grid.dimensions().as_ivec3();
  let mut result = BitVolume::new(grid.dimensions());
  let mut filled = 0usize;

  if !grid.voxel(seed.x as u32, seed.y as u32, seed.z as u32) {
    let mut frontier: VecDeque<IVec3> = VecDeque::new();
    result.set(seed.x as u32, seed.y as u32, seed.z as u32, true);
    frontier.push_back(seed);
    filled = 1;

    while let Some(pos) = frontier.pop_front() {
      for dz in -1..=1 {
        for dy in -1..=1 {
          for dx in -1..=1 {
            let d = IVec3::new(dx, dy, dz);
            if !connectivity.admits(d) {
              continue;
            }
            let n = pos + d;
            if n.cmpge(IVec3::ZERO).all()
              && n.cmplt(idims).all()
              && !grid.voxel(n.x as u32, n.y as u32, n.z as u32)
              && !result.get(n.x as u32, n.y as u32, n.z as u32)
            {
              result.set(n.x as u32, n.y as u32, n.z as u32, true);
              frontier.push_back(n);
              filled += 1;
            }
          }
        }
      }
    }
  }

  grid.replace_bits(result);
  Ok(filled)
}

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;
