//! Self-describing binary serialization of a SparseOctree.
//!
//! Layout, all little-endian:
//!
//! ```text
//! magic        4 bytes  b"SVO1"  (format version tag)
//! max_depth    u64
//! side_length  u64      must equal 1 << max_depth
//! node stream  pre-order; per node: { is_leaf: u8, value: u8 }, and for
//!              an internal node immediately its 8 children's streams in
//!              ascending octant order (dx | dy<<1 | dz<<2)
//! ```
//!
//! There is no node count: the decoder's recursion is driven entirely by
//! the `is_leaf` flags. That makes truncation detectable (the stream ends
//! mid-tree) rather than silently decodable as a smaller valid tree. The
//! decoder additionally bounds recursion by `max_depth` and rejects flag
//! or value bytes outside {0, 1}.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::VolumeError;

use super::{SparseOctree, SvoNode};

const MAGIC: [u8; 4] = *b"SVO1";

impl SparseOctree {
  /// Serialize the tree to `writer`.
  pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<(), VolumeError> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&(self.max_depth() as u64).to_le_bytes())?;
    writer.write_all(&(self.side_length() as u64).to_le_bytes())?;
    self.save_node(self.root(), writer)
  }

  fn save_node<W: Write>(&self, node: u32, writer: &mut W) -> Result<(), VolumeError> {
    match self.nodes()[node as usize] {
      SvoNode::Leaf { value } => {
        writer.write_all(&[1, value as u8])?;
      }
      SvoNode::Internal { children } => {
        writer.write_all(&[0, 0])?;
        for &child in &children {
          self.save_node(child, writer)?;
        }
      }
    }
    Ok(())
  }

  /// Deserialize a tree previously written by [`save_to`](Self::save_to).
  pub fn load_from<R: Read>(reader: &mut R) -> Result<Self, VolumeError> {
    let mut magic = [0u8; 4];
    reader
      .read_exact(&mut magic)
      .map_err(|_| VolumeError::decode("truncated header"))?;
    if magic != MAGIC {
      return Err(VolumeError::decode(format!(
        "bad magic {magic:?}, expected {MAGIC:?}"
      )));
    }

    let max_depth = read_u64(reader)?;
    let side_length = read_u64(reader)?;
    if max_depth > 31 {
      return Err(VolumeError::decode(format!(
        "max_depth {max_depth} exceeds supported range"
      )));
    }
    if side_length != 1u64 << max_depth {
      return Err(VolumeError::decode(format!(
        "side_length {side_length} does not match max_depth {max_depth}"
      )));
    }

    let mut nodes = Vec::new();
    let root = load_node(reader, &mut nodes, 0, max_depth as u32)?;
    Ok(SparseOctree::from_raw(
      nodes,
      root,
      side_length as u32,
      max_depth as u32,
    ))
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

fn read_u64<R: Read>(reader: &mut R) -> Result<u64, VolumeError> {
  let mut buf = [0u8; 8];
  reader
    .read_exact(&mut buf)
    .map_err(|_| VolumeError::decode("truncated header"))?;
  Ok(u64::from_le_bytes(buf))
}

/// Parse one node (and its subtree) into the arena, post-order.
fn load_node<R: Read>(
  reader: &mut R,
  nodes: &mut Vec<SvoNode>,
  depth: u32,
  max_depth: u32,
) -> Result<u32, VolumeError> {
  let mut pair = [0u8; 2];
  reader
    .read_exact(&mut pair)
    .map_err(|_| VolumeError::decode("truncated node stream"))?;

  let [is_leaf, value] = pair;
  if is_leaf > 1 || value > 1 {
    return Err(VolumeError::decode(format!(
      "invalid node bytes [{is_leaf}, {value}] at depth {depth}"
    )));
  }

  if is_leaf == 1 {
    nodes.push(SvoNode::Leaf { value: value != 0 });
    return Ok((nodes.len() - 1) as u32);
  }

  // An internal node at max_depth would have sub-voxel children.
  if depth >= max_depth {
    return Err(VolumeError::decode(format!(
      "internal node at depth {depth} exceeds max_depth {max_depth}"
    )));
  }

  let mut children = [0u32; 8];
  for slot in &mut children {
    *slot = load_node(reader, nodes, depth + 1, max_depth)?;
  }
  nodes.push(SvoNode::Internal { children });
  Ok((nodes.len() - 1) as u32)
}

#[cfg(test)]
#[path = "io_test.rs"]
mod io_test;
