//! voxel_volume - Framework/engine independent 3D occupancy volumes
//!
//! This crate represents 3D space as a dense boolean occupancy grid and
//! provides the algorithms to populate, compress, query, and transform it:
//!
//! - **VoxelGrid**: bit-packed occupancy volume over a world-space AABB with
//!   a uniform voxel edge length
//! - **SparseOctree**: homogeneity-collapsing compression of cubic
//!   power-of-two grids, with a lossless self-describing binary format
//! - **Grid operators**: morphological filters (dilate, erode, open, close,
//!   smooth, Euclidean offset), boolean set algebra, flood fill, connected
//!   component labeling, multi-source distance propagation, and trilinear
//!   sampling
//! - **Batch pipeline**: Enqueue → Tick → Completions stage for applying
//!   operator chains to many grids in parallel, plus a non-blocking wrapper
//!
//! Single-pass stencil operators are deterministic under parallel execution:
//! output is bit-identical whether rayon runs them on 1 worker or N.
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec3;
//! use voxel_volume::{GridOp, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(1.0, Vec3::ZERO, Vec3::splat(32.0))?;
//! grid.set_region([4, 4, 4], [12, 12, 12], true)?;
//!
//! GridOp::Dilate { iterations: 2 }.apply(&mut grid)?;
//!
//! println!("{} voxels occupied", grid.count_occupied());
//! ```

pub mod error;
pub mod field;
pub mod grid;
pub mod shape;

// Re-export commonly used items
pub use error::VolumeError;
pub use field::{LabelField, ScalarField};
pub use grid::VoxelGrid;
pub use shape::GridShape;

// Sparse voxel octree compression
pub mod svo;
pub use svo::SparseOctree;

// Grid transformation operators
pub mod ops;
pub use ops::{
  connected_components, distance_transform, flood_fill, interpolate, interpolate_world,
  BooleanOp, Connectivity, GridOp,
};

// Batch operator pipeline
pub mod pipeline;
pub use pipeline::{AsyncOpPipeline, OpBatchStage, OpCompletion, OpRequest};

// Engine-agnostic metrics collection
pub mod metrics;
