//! Raw binary dump of a VoxelGrid.
//!
//! Layout, all little-endian:
//!
//! ```text
//! min_bounds   3 x f32
//! max_bounds   3 x f32
//! dimensions   3 x i32
//! resolution   1 x f32
//! payload      dim_x * dim_y * dim_z bytes, one per voxel (0 or 1),
//!              row-major with x fastest-varying
//! ```
//!
//! The decoder is strict: a short stream, a payload byte other than 0/1, or
//! a header that violates the grid invariants is a `Decode` error, never a
//! panic or a silently smaller grid.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use glam::{IVec3, Vec3};

use crate::error::VolumeError;
use crate::shape::GridShape;

use super::VoxelGrid;

fn read_f32<R: Read>(reader: &mut R) -> Result<f32, VolumeError> {
  let mut buf = [0u8; 4];
  reader
    .read_exact(&mut buf)
    .map_err(|_| VolumeError::decode("truncated header"))?;
  Ok(f32::from_le_bytes(buf))
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, VolumeError> {
  let mut buf = [0u8; 4];
  reader
    .read_exact(&mut buf)
    .map_err(|_| VolumeError::decode("truncated header"))?;
  Ok(i32::from_le_bytes(buf))
}

fn read_vec3<R: Read>(reader: &mut R) -> Result<Vec3, VolumeError> {
  Ok(Vec3::new(
    read_f32(reader)?,
    read_f32(reader)?,
    read_f32(reader)?,
  ))
}

impl VoxelGrid {
  /// Write the grid to `writer` in the raw dump format.
  pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<(), VolumeError> {
    for v in [self.min_bounds(), self.max_bounds()] {
      writer.write_all(&v.x.to_le_bytes())?;
      writer.write_all(&v.y.to_le_bytes())?;
      writer.write_all(&v.z.to_le_bytes())?;
    }
    let dims = self.dimensions();
    for d in [dims.x, dims.y, dims.z] {
      writer.write_all(&(d as i32).to_le_bytes())?;
    }
    writer.write_all(&self.resolution().to_le_bytes())?;

    for z in 0..dims.z {
      for y in 0..dims.y {
        for x in 0..dims.x {
          writer.write_all(&[self.voxel(x, y, z) as u8])?;
        }
      }
    }
    Ok(())
  }

  /// Read a grid previously written by [`save_to`](Self::save_to).
  pub fn load_from<R: Read>(reader: &mut R) -> Result<Self, VolumeError> {
    let min_bounds = read_vec3(reader)?;
    let max_bounds = read_vec3(reader)?;

    let mut dims = [0i32; 3];
    for d in &mut dims {
      *d = read_i32(reader)?;
    }
    if dims.iter().any(|&d| d <= 0) {
      return Err(VolumeError::decode(format!(
        "non-positive dimensions {dims:?}"
      )));
    }
    let dimensions = IVec3::from_array(dims).as_uvec3();

    let volume = (dimensions.x as usize)
      .checked_mul(dimensions.y as usize)
      .and_then(|v| v.checked_mul(dimensions.z as usize))
      .ok_or_else(|| VolumeError::decode(format!("dimensions {dimensions} overflow")))?;

    let resolution = read_f32(reader)?;
    let shape = GridShape::from_parts(resolution, min_bounds, max_bounds, dimensions)
      .map_err(|e| VolumeError::decode(format!("invalid header: {e}")))?;

    let mut payload = vec![0u8; volume];
    reader
      .read_exact(&mut payload)
      .map_err(|_| VolumeError::decode("truncated payload"))?;

    let mut grid = VoxelGrid::from_shape(shape);
    let mut idx = 0;
    for z in 0..dimensions.z {
      for y in 0..dimensions.y {
        for x in 0..dimensions.x {
          match payload[idx] {
            0 => {}
            1 => grid.bits_mut().set(x, y, z, true),
            other => {
              return Err(VolumeError::decode(format!(
                "payload byte {other} at index {idx} is not 0/1"
              )))
            }
          }
          idx += 1;
        }
      }
    }
    Ok(grid)
  }

  /// Save to a file path.
  pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<(), VolumeError> {
    let mut writer = BufWriter::new(File::create(path)?);
    self.save_to(&mut writer)?;
    writer.flush()?;
    Ok(())
  }

  /// Load from a file path.
  pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, VolumeError> {
    let mut reader = BufReader::new(File::open(path)?);
    Self::load_from(&mut reader)
  }
}

#[cfg(test)]
#[path = "io_test.rs"]
mod io_test;
