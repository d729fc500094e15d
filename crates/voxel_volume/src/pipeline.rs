//! Batch operator pipeline: Enqueue -> Tick -> Completions.
//!
//! Producers often have many grids to refine with the same operator chain
//! (one per region, one per object). [`OpBatchStage`] collects requests and
//! applies each chain on rayon's pool in one `tick`; [`AsyncOpPipeline`]
//! runs a whole batch on a background task and hands the completions back
//! over a channel, polled without blocking.
//!
//! Requests own their grids, so workers never share mutable state and the
//! per-request results are independent of scheduling order.

use crossbeam_channel::{Receiver, TryRecvError};
use rayon::prelude::*;
use web_time::Instant;

use crate::error::VolumeError;
use crate::grid::VoxelGrid;
use crate::ops::GridOp;

/// A grid plus the operator chain to run over it.
pub struct OpRequest {
  /// Caller-chosen identifier carried through to the completion.
  pub id: u64,
  /// Grid to transform (owned; returned in the completion).
  pub grid: VoxelGrid,
  /// Operators applied in order.
  pub ops: Vec<GridOp>,
}

/// Result of one request.
pub struct OpCompletion {
  /// Identifier of the originating request.
  pub id: u64,
  /// Transformed grid, or the first operator error.
  pub result: Result<VoxelGrid, VolumeError>,
  /// Wall time spent applying the chain, in microseconds.
  pub apply_time_us: u64,
}

fn process_requests(requests: Vec<OpRequest>) -> Vec<OpCompletion> {
  requests
    .into_par_iter()
    .map(|mut req| {
      let start = Instant::now();
      let mut outcome = Ok(());
      for op in &req.ops {
        if let Err(e) = op.apply(&mut req.grid) {
          outcome = Err(e);
          break;
        }
      }
      OpCompletion {
        id: req.id,
        result: outcome.map(|()| req.grid),
        apply_time_us: start.elapsed().as_micros() as u64,
      }
    })
    .collect()
}

/// Synchronous batch stage.
pub struct OpBatchStage {
  /// Requests waiting for the next tick.
  pending: Vec<OpRequest>,
  /// Completions ready to be collected.
  completed: Vec<OpCompletion>,
  /// Next request ID.
  next_id: u64,
}

impl Default for OpBatchStage {
  fn default() -> Self {
    Self::new()
  }
}

impl OpBatchStage {
  pub fn new() -> Self {
    Self {
      pending: Vec::new(),
      completed: Vec::new(),
      next_id: 0,
    }
  }

  /// Enqueue a grid and its operator chain, returning the assigned ID.
  pub fn enqueue(&mut self, grid: VoxelGrid, ops: Vec<GridOp>) -> u64 {
    let id = self.next_id;
    self.next_id += 1;
    self.pending.push(OpRequest { id, grid, ops });
    id
  }

  /// Process all pending requests in parallel.
  /// Returns the number of requests processed this tick.
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }
    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();
    self.completed.extend(process_requests(requests));
    count
  }

  /// Take all completions produced so far.
  pub fn drain_completions(&mut self) -> Vec<OpCompletion> {
    std::mem::take(&mut self.completed)
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

/// Non-blocking wrapper: one batch at a time on a background rayon task.
pub struct AsyncOpPipeline {
  receiver: Option<Receiver<Vec<OpCompletion>>>,
}

impl Default for AsyncOpPipeline {
  fn default() -> Self {
    Self::new()
  }
}

impl AsyncOpPipeline {
  pub fn new() -> Self {
    Self { receiver: None }
  }

  /// True while a batch is in flight.
  pub fn is_busy(&self) -> bool {
    self.receiver.is_some()
  }

  /// Start processing a batch (non-blocking).
  ///
  /// Returns `false` without starting anything if a batch is already in
  /// flight.
  pub fn start(&mut self, requests: Vec<OpRequest>) -> bool {
    if self.is_busy() {
      return false;
    }
    let (tx, rx) = crossbeam_channel::bounded(1);
    rayon::spawn(move || {
      // The receiver may have been cancelled; a dead channel is fine.
      let _ = tx.send(process_requests(requests));
    });
    self.receiver = Some(rx);
    true
  }

  /// Poll for the batch result (non-blocking).
  ///
  /// Returns `Some(completions)` exactly once per started batch.
  pub fn poll(&mut self) -> Option<Vec<OpCompletion>> {
    match self.receiver.as_ref()?.try_recv() {
      Ok(completions) => {
        self.receiver = None;
        Some(completions)
      }
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => {
        self.receiver = None;
        None
      }
    }
  }

  /// Drop the in-flight batch. The workers still run to completion, but
  /// their results are discarded.
  pub fn cancel(&mut self) {
    self.receiver = None;
  }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
