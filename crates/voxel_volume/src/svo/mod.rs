//! SparseOctree - homogeneity-collapsing compression of cubic grids.
//!
//! A region that is entirely occupied or entirely empty is a single leaf;
//! only mixed regions split into 8 octants. Nodes live in a flat arena
//! (`Vec<SvoNode>`) and reference children by index, so building and
//! dropping very deep trees never recurses through owned pointers, and
//! traversal walks contiguous memory.
//!
//! Octant numbering throughout (and in the wire format):
//! `index = dx | dy << 1 | dz << 2`, each bit selecting the upper half of
//! its axis.

pub mod io;

use glam::UVec3;
use smallvec::SmallVec;

use crate::error::VolumeError;
use crate::grid::VoxelGrid;

/// One arena slot: a leaf with its value, or an internal node owning 8
/// children by arena index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SvoNode {
  Leaf { value: bool },
  Internal { children: [u32; 8] },
}

/// Sparse voxel octree over a cubic, power-of-two-sided occupancy grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseOctree {
  /// Arena in post-order: children always precede their parent.
  nodes: Vec<SvoNode>,
  root: u32,
  /// Grid side length in voxels at build time.
  side_length: u32,
  /// `log2(side_length)`.
  max_depth: u32,
}

impl SparseOctree {
  /// Compress `grid` into an octree.
  ///
  /// The grid must be cubic with a power-of-two side length; anything else
  /// is rejected with `InvalidParameter` before any tree is built.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "svo::from_grid"))]
  pub fn from_grid(grid: &VoxelGrid) -> Result<Self, VolumeError> {
    let dims = grid.dimensions();
    if !grid.shape().is_cubic() {
      return Err(VolumeError::invalid(format!(
        "octree conversion requires a cubic grid, got {dims}"
      )));
    }
    let side = dims.x;
    if !side.is_power_of_two() {
      return Err(VolumeError::invalid(format!(
        "octree conversion requires a power-of-two side length, got {side}"
      )));
    }

    let mut nodes = Vec::new();
    let root = build_node(grid, &mut nodes, UVec3::ZERO, side);
    Ok(Self {
      nodes,
      root,
      side_length: side,
      max_depth: side.trailing_zeros(),
    })
  }

  /// Expand the tree back into `grid`.
  ///
  /// The target must be cubic with side length equal to
  /// [`side_length`](Self::side_length); its previous contents are fully
  /// overwritten. Produces bit-for-bit the occupancy the tree was built
  /// from.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "svo::to_grid"))]
  pub fn to_grid(&self, grid: &mut VoxelGrid) -> Result<(), VolumeError> {
    let dims = grid.dimensions();
    if dims != UVec3::splat(self.side_length) {
      return Err(VolumeError::ShapeMismatch {
        reason: format!(
          "octree covers {0}^3 voxels but target grid is {1}",
          self.side_length, dims
        ),
      });
    }
    self.paint(self.root, grid, UVec3::ZERO, self.side_length);
    Ok(())
  }

  fn paint(&self, node: u32, grid: &mut VoxelGrid, origin: UVec3, size: u32) {
    match self.nodes[node as usize] {
      SvoNode::Leaf { value } => {
        for z in origin.z..origin.z + size {
          for y in origin.y..origin.y + size {
            for x in origin.x..origin.x + size {
              grid.bits_mut().set(x, y, z, value);
            }
          }
        }
      }
      SvoNode::Internal { children } => {
        let half = size / 2;
        for (octant, &child) in children.iter().enumerate() {
          self.paint(child, grid, octant_origin(origin, octant as u32, half), half);
        }
      }
    }
  }

  /// Grid side length (in voxels) this tree was built for.
  #[inline]
  pub fn side_length(&self) -> u32 {
    self.side_length
  }

  /// Tree depth bound: `log2(side_length)`.
  #[inline]
  pub fn max_depth(&self) -> u32 {
    self.max_depth
  }

  /// Total nodes in the arena.
  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Fixed per-node overhead summed over the tree.
  ///
  /// For compression-ratio reporting against the dense representation;
  /// not a correctness quantity.
  pub fn memory_usage(&self) -> usize {
    self.nodes.len() * std::mem::size_of::<SvoNode>() + std::mem::size_of::<Self>()
  }

  pub(crate) fn root(&self) -> u32 {
    self.root
  }

  pub(crate) fn nodes(&self) -> &[SvoNode] {
    &self.nodes
  }

  pub(crate) fn from_raw(nodes: Vec<SvoNode>, root: u32, side_length: u32, max_depth: u32) -> Self {
    Self {
      nodes,
      root,
      side_length,
      max_depth,
    }
  }
}

/// Child octant origin: bit 0 -> +x, bit 1 -> +y, bit 2 -> +z.
#[inline(always)]
fn octant_origin(origin: UVec3, octant: u32, half: u32) -> UVec3 {
  UVec3::new(
    origin.x + (octant & 1) * half,
    origin.y + ((octant >> 1) & 1) * half,
    origin.z + ((octant >> 2) & 1) * half,
  )
}

/// Post-order recursive build. Returns the arena index of the region's node.
///
/// Collapse rule: if all 8 children came back as leaves with one common
/// value, the region is homogeneous - the 8 freshly pushed leaf slots are
/// popped again and replaced by a single leaf. An internal node therefore
/// never covers a uniform region.
fn build_node(grid: &VoxelGrid, nodes: &mut Vec<SvoNode>, origin: UVec3, size: u32) -> u32 {
  if size == 1 {
    nodes.push(SvoNode::Leaf {
      value: grid.voxel(origin.x, origin.y, origin.z),
    });
    return (nodes.len() - 1) as u32;
  }

  let half = size / 2;
  let children: SmallVec<[u32; 8]> = (0..8u32)
    .map(|octant| build_node(grid, nodes, octant_origin(origin, octant, half), half))
    .collect();

  let homogeneous = children.iter().all(|&c| {
    matches!(
      (nodes[c as usize], nodes[children[0] as usize]),
      (SvoNode::Leaf { value: a }, SvoNode::Leaf { value: b }) if a == b
    )
  });

  if homogeneous {
    // The 8 children are single leaves and occupy the arena tail.
    let value = match nodes[children[0] as usize] {
      SvoNode::Leaf { value } => value,
      SvoNode::Internal { .. } => unreachable!(),
    };
    nodes.truncate(nodes.len() - 8);
    nodes.push(SvoNode::Leaf { value });
  } else {
    let mut slots = [0u32; 8];
    slots.copy_from_slice(&children);
    nodes.push(SvoNode::Internal { children: slots });
  }
  (nodes.len() - 1) as u32
}
