use glam::{IVec3, UVec3, Vec3};

use super::{AsyncOpPipeline, OpBatchStage, OpRequest};
use crate::grid::VoxelGrid;
use crate::ops::GridOp;

fn seeded_grid(seed: i32) -> VoxelGrid {
  let mut grid = VoxelGrid::with_dimensions(1.0, Vec3::ZERO, UVec3::splat(12)).unwrap();
  grid.set(IVec3::splat(5 + seed % 2), true).unwrap();
  grid.set_region(IVec3::splat(2), IVec3::splat(3 + seed % 3), true);
  grid
}

fn reference_apply(mut grid: VoxelGrid, ops: &[GridOp]) -> VoxelGrid {
  for op in ops {
    op.apply(&mut grid).unwrap();
  }
  grid
}

#[test]
fn tick_processes_everything_pending() {
  let mut stage = OpBatchStage::new();
  let ops = vec![GridOp::Dilate { iterations: 1 }];

  let ids: Vec<u64> = (0..6)
    .map(|i| stage.enqueue(seeded_grid(i), ops.clone()))
    .collect();
  assert_eq!(stage.pending_count(), 6);
  assert!(!stage.is_idle());

  assert_eq!(stage.tick(), 6);
  assert_eq!(stage.pending_count(), 0);
  assert_eq!(stage.completed_count(), 6);

  let mut completions = stage.drain_completions();
  assert!(stage.is_idle());

  completions.sort_by_key(|c| c.id);
  for (completion, (i, id)) in completions.iter().zip(ids.iter().enumerate()) {
    assert_eq!(completion.id, *id);
    let expected = reference_apply(seeded_grid(i as i32), &ops);
    assert_eq!(*completion.result.as_ref().unwrap(), expected);
  }
}

#[test]
fn empty_tick_is_a_no_op() {
  let mut stage = OpBatchStage::new();
  assert_eq!(stage.tick(), 0);
  assert!(stage.is_idle());
}

#[test]
fn operator_chains_apply_in_order() {
  let mut stage = OpBatchStage::new();
  let ops = vec![
    GridOp::Dilate { iterations: 2 },
    GridOp::Erode { iterations: 1 },
    GridOp::Smooth {
      iterations: 1,
      threshold: 0.3,
    },
  ];
  stage.enqueue(seeded_grid(0), ops.clone());
  stage.tick();

  let completions = stage.drain_completions();
  let expected = reference_apply(seeded_grid(0), &ops);
  assert_eq!(*completions[0].result.as_ref().unwrap(), expected);
}

#[test]
fn invalid_operator_surfaces_in_the_completion() {
  let mut stage = OpBatchStage::new();
  stage.enqueue(
    seeded_grid(0),
    vec![GridOp::Smooth {
      iterations: 1,
      threshold: f32::NAN,
    }],
  );
  stage.tick();

  let completions = stage.drain_completions();
  assert!(completions[0].result.is_err());
}

#[test]
fn async_pipeline_matches_synchronous_results() {
  let ops = vec![GridOp::Close { iterations: 1 }];
  let requests: Vec<OpRequest> = (0..4)
    .map(|i| OpRequest {
      id: i,
      grid: seeded_grid(i as i32),
      ops: ops.clone(),
    })
    .collect();

  let mut pipeline = AsyncOpPipeline::new();
  assert!(!pipeline.is_busy());
  assert!(pipeline.start(requests));
  assert!(pipeline.is_busy());

  // Starting again while busy must be refused.
  assert!(!pipeline.start(Vec::new()));

  let mut completions = None;
  for _ in 0..5000 {
    if let Some(c) = pipeline.poll() {
      completions = Some(c);
      break;
    }
    std::thread::sleep(std::time::Duration::from_millis(1));
  }

  let mut completions = completions.expect("batch never completed");
  assert!(!pipeline.is_busy());
  completions.sort_by_key(|c| c.id);

  for (i, completion) in completions.iter().enumerate() {
    let expected = reference_apply(seeded_grid(i as i32), &ops);
    assert_eq!(*completion.result.as_ref().unwrap(), expected);
  }
}

#[test]
fn cancel_discards_the_batch() {
  let mut pipeline = AsyncOpPipeline::new();
  pipeline.start(vec![OpRequest {
    id: 0,
    grid: seeded_grid(0),
    ops: vec![GridOp::Dilate { iterations: 3 }],
  }]);

  pipeline.cancel();
  assert!(!pipeline.is_busy());
  assert!(pipeline.poll().is_none());

  // The pipeline is immediately reusable.
  assert!(pipeline.start(Vec::new()));
}
