//! voxel_shapes - analytic occupancy producers.
//!
//! Simple deterministic shape voxelizers that populate a
//! [`VoxelGrid`](voxel_volume::VoxelGrid) purely through its public API
//! (`set`, `world_to_grid`, `grid_to_world`, bounds). Use them to build
//! test scenes and obstacle maps without pulling in mesh or noise
//! machinery.
//!
//! Membership is evaluated at voxel **centers**: a voxel is marked when its
//! center satisfies the shape's analytic inside test. Samples falling
//! outside the grid are skipped, never errors.
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec3;
//! use voxel_shapes::voxelize_sphere;
//!
//! let grid = voxelize_sphere(
//!   Vec3::splat(5.0), // center
//!   2.5,              // radius
//!   0.25,             // resolution
//!   Vec3::ZERO,
//!   Vec3::splat(10.0),
//! )?;
//! ```

pub mod implicit;
pub mod lines;
pub mod points;
pub mod solids;
mod util;

pub use implicit::voxelize_implicit;
pub use lines::voxelize_line;
pub use points::voxelize_point_cloud;
pub use solids::{voxelize_box, voxelize_capsule, voxelize_cylinder, voxelize_sphere};
