//! Engine-agnostic metrics collection for volume statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use voxel_volume::metrics::{VolumeMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let mut metrics = VolumeMetrics::new();
//! metrics.record_op_timing(elapsed_us);
//! metrics.record_compression(dense_bytes, tree.memory_usage());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  /// Create a new rolling window with the given capacity.
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() == self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }
}

impl RollingWindow<u64> {
  /// Mean of the stored values, or 0 when empty.
  pub fn average(&self) -> u64 {
    if self.buffer.is_empty() {
      return 0;
    }
    self.buffer.iter().sum::<u64>() / self.buffer.len() as u64
  }
}

impl RollingWindow<f32> {
  /// Mean of the stored values, or 0 when empty.
  pub fn average(&self) -> f32 {
    if self.buffer.is_empty() {
      return 0.0;
    }
    self.buffer.iter().sum::<f32>() / self.buffer.len() as f32
  }
}

/// Aggregated volume statistics.
#[derive(Debug, Clone)]
pub struct VolumeMetrics {
  /// Recent operator apply times in microseconds.
  pub op_timings_us: RollingWindow<u64>,
  /// Recent dense-bytes / tree-bytes compression ratios.
  pub compression_ratios: RollingWindow<f32>,
}

impl Default for VolumeMetrics {
  fn default() -> Self {
    Self::new()
  }
}

impl VolumeMetrics {
  pub fn new() -> Self {
    Self {
      op_timings_us: RollingWindow::new(120),
      compression_ratios: RollingWindow::new(32),
    }
  }

  /// Record one operator apply time.
  pub fn record_op_timing(&mut self, micros: u64) {
    if !is_enabled() {
      return;
    }
    self.op_timings_us.push(micros);
  }

  /// Record an octree compression outcome.
  ///
  /// `dense_bytes` is the flat occupancy payload (one bit per voxel is the
  /// packed storage; callers comparing against the on-disk dump may pass a
  /// byte per voxel instead - the ratio is whatever they want to track).
  pub fn record_compression(&mut self, dense_bytes: usize, tree_bytes: usize) {
    if !is_enabled() || tree_bytes == 0 {
      return;
    }
    self
      .compression_ratios
      .push(dense_bytes as f32 / tree_bytes as f32);
  }

  /// Mean apply time over the window, in microseconds.
  pub fn average_op_time_us(&self) -> u64 {
    self.op_timings_us.average()
  }

  /// Mean compression ratio over the window.
  pub fn average_compression_ratio(&self) -> f32 {
    self.compression_ratios.average()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rolling_window_evicts_oldest() {
    let mut window = RollingWindow::new(3);
    for v in [1u64, 2, 3, 4] {
      window.push(v);
    }
    assert_eq!(window.len(), 3);
    let values: Vec<u64> = window.iter().copied().collect();
    assert_eq!(values, vec![2, 3, 4]);
    assert_eq!(window.average(), 3);
  }

  #[test]
  fn empty_window_averages_to_zero() {
    let window: RollingWindow<u64> = RollingWindow::new(4);
    assert!(window.is_empty());
    assert_eq!(window.average(), 0);
  }

  #[cfg(feature = "metrics")]
  #[test]
  fn recording_respects_runtime_toggle() {
    use std::sync::atomic::Ordering;

    let mut metrics = VolumeMetrics::new();
    COLLECT_METRICS.store(true, Ordering::Relaxed);
    metrics.record_op_timing(100);
    assert_eq!(metrics.op_timings_us.len(), 1);

    COLLECT_METRICS.store(false, Ordering::Relaxed);
    metrics.record_op_timing(200);
    assert_eq!(metrics.op_timings_us.len(), 1);

    COLLECT_METRICS.store(true, Ordering::Relaxed);
  }

  #[cfg(not(feature = "metrics"))]
  #[test]
  fn recording_is_inert_without_the_feature() {
    let mut metrics = VolumeMetrics::new();
    metrics.record_op_timing(100);
    metrics.record_compression(4096, 64);
    assert!(metrics.op_timings_us.is_empty());
    assert!(metrics.compression_ratios.is_empty());
  }
}
