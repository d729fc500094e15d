use glam::{IVec3, UVec3, Vec3};

use super::super::SparseOctree;
use crate::error::VolumeError;
use crate::grid::VoxelGrid;

fn mixed_tree() -> (SparseOctree, VoxelGrid) {
  let mut grid = VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(16)).unwrap();
  grid.set_region(IVec3::new(1, 2, 3), IVec3::new(10, 6, 12), true);
  grid.set(IVec3::splat(15), true).unwrap();
  let tree = SparseOctree::from_grid(&grid).unwrap();
  (tree, grid)
}

#[test]
fn serialized_round_trip() {
  let (tree, grid) = mixed_tree();

  let mut bytes = Vec::new();
  tree.save_to(&mut bytes).unwrap();
  let loaded = SparseOctree::load_from(&mut bytes.as_slice()).unwrap();

  assert_eq!(loaded, tree);

  // And the reloaded tree still paints the original occupancy.
  let mut out = VoxelGrid::from_shape(*grid.shape());
  loaded.to_grid(&mut out).unwrap();
  assert_eq!(out, grid);
}

#[test]
fn wire_layout_of_a_tiny_tree() {
  // 2^3 grid with only (0,0,0) set: root internal, octant 0 a true leaf,
  // octants 1-7 false leaves.
  let mut grid = VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(2)).unwrap();
  grid.set(IVec3::ZERO, true).unwrap();
  let tree = SparseOctree::from_grid(&grid).unwrap();

  let mut bytes = Vec::new();
  tree.save_to(&mut bytes).unwrap();

  assert_eq!(&bytes[0..4], b"SVO1");
  assert_eq!(&bytes[4..12], &1u64.to_le_bytes()); // max_depth
  assert_eq!(&bytes[12..20], &2u64.to_le_bytes()); // side_length

  // Pre-order stream: internal root, then children in octant order.
  let mut expected = vec![0u8, 0]; // root: internal
  expected.extend_from_slice(&[1, 1]); // octant 0: leaf true
  for _ in 1..8 {
    expected.extend_from_slice(&[1, 0]); // octants 1-7: leaf false
  }
  assert_eq!(&bytes[20..], &expected[..]);
}

#[test]
fn single_leaf_stream() {
  let grid = VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(8)).unwrap();
  let tree = SparseOctree::from_grid(&grid).unwrap();

  let mut bytes = Vec::new();
  tree.save_to(&mut bytes).unwrap();

  // Header + exactly one leaf node.
  assert_eq!(bytes.len(), 20 + 2);
  assert_eq!(&bytes[20..], &[1, 0]);
}

#[test]
fn truncated_stream_is_a_decode_error() {
  let (tree, _) = mixed_tree();
  let mut bytes = Vec::new();
  tree.save_to(&mut bytes).unwrap();

  for cut in [0, 3, 12, 21, bytes.len() - 1] {
    assert!(
      matches!(
        SparseOctree::load_from(&mut &bytes[..cut]),
        Err(VolumeError::Decode { .. })
      ),
      "cut at {cut} must fail"
    );
  }
}

#[test]
fn bad_magic_is_rejected() {
  let (tree, _) = mixed_tree();
  let mut bytes = Vec::new();
  tree.save_to(&mut bytes).unwrap();
  bytes[0] = b'X';

  assert!(matches!(
    SparseOctree::load_from(&mut bytes.as_slice()),
    Err(VolumeError::Decode { .. })
  ));
}

#[test]
fn invalid_flag_bytes_are_rejected() {
  let (tree, _) = mixed_tree();
  let mut bytes = Vec::new();
  tree.save_to(&mut bytes).unwrap();

  // First node's is_leaf byte
  bytes[20] = 2;
  assert!(matches!(
    SparseOctree::load_from(&mut bytes.as_slice()),
    Err(VolumeError::Decode { .. })
  ));
}

#[test]
fn header_side_depth_mismatch_is_rejected() {
  let (tree, _) = mixed_tree();
  let mut bytes = Vec::new();
  tree.save_to(&mut bytes).unwrap();

  // side_length 16 with max_depth claimed as 3
  bytes[4..12].copy_from_slice(&3u64.to_le_bytes());
  assert!(matches!(
    SparseOctree::load_from(&mut bytes.as_slice()),
    Err(VolumeError::Decode { .. })
  ));
}

#[test]
fn overdeep_stream_is_rejected() {
  // Hand-built stream: header claims max_depth 0 (a 1^3 grid) but the root
  // node is internal. The decoder must stop rather than recurse.
  let mut bytes = Vec::new();
  bytes.extend_from_slice(b"SVO1");
  bytes.extend_from_slice(&0u64.to_le_bytes());
  bytes.extend_from_slice(&1u64.to_le_bytes());
  bytes.extend_from_slice(&[0, 0]); // internal root at depth 0 == max_depth

  assert!(matches!(
    SparseOctree::load_from(&mut bytes.as_slice()),
    Err(VolumeError::Decode { .. })
  ));
}

#[test]
fn file_round_trip() {
  let (tree, _) = mixed_tree();
  let path = std::env::temp_dir().join("voxel_volume_svo_test.svo");

  tree.save_file(&path).unwrap();
  let loaded = SparseOctree::load_file(&path).unwrap();
  std::fs::remove_file(&path).ok();

  assert_eq!(loaded, tree);
}
