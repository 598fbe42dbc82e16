//! Integration tests for playing built-in scenarios through the library API

use std::sync::{Arc, Mutex};

use loopviz::engine::{
    ContainerStore, InstantClock, RecordingRenderer, RenderCall, StepExecutor, Timing,
};
use loopviz::model::{Category, ContainerKind};
use loopviz::{Player, RunOutcome, ScenarioRegistry};

fn player() -> (Player, Arc<RecordingRenderer>) {
    let renderer = Arc::new(RecordingRenderer::new());
    let player = Player::new(
        Arc::new(ScenarioRegistry::builtin()),
        renderer.clone(),
        Arc::new(InstantClock),
        Timing::default(),
    );
    (player, renderer)
}

fn labels(player: &Player, kind: ContainerKind) -> Vec<String> {
    player.contents(kind).into_iter().map(|t| t.label).collect()
}

// ============================================================================
// End States
// ============================================================================

#[test]
fn timeout_leaves_only_the_heap() {
    let (player, _renderer) = player();
    let outcome = player.run("timeout").unwrap();

    let summary = outcome.summary().expect("run should complete");
    assert_eq!(summary.steps, 13);
    assert_eq!(summary.skipped, 0);

    for kind in [
        ContainerKind::CallStack,
        ContainerKind::MicrotaskQueue,
        ContainerKind::MacrotaskQueue,
        ContainerKind::WorkerCallStack,
    ] {
        assert!(player.contents(kind).is_empty(), "{} not empty", kind);
    }
    assert_eq!(
        labels(&player, ContainerKind::Heap),
        vec!["main()", "setTimeout_Callback()", "c: \"C\""]
    );
}

#[test]
fn every_builtin_runs_clean() {
    let (player, _renderer) = player();
    for id in ["timeout", "promise", "async", "complex", "priority", "worker"] {
        match player.run(id).unwrap() {
            RunOutcome::Completed(summary) => {
                assert_eq!(summary.skipped, 0, "{} skipped steps", id);
                assert!(player.contents(ContainerKind::CallStack).is_empty(), "{}", id);
                assert!(
                    player.contents(ContainerKind::WorkerCallStack).is_empty(),
                    "{}",
                    id
                );
            }
            RunOutcome::Rejected => panic!("{} rejected on an idle player", id),
        }
    }
}

#[test]
fn priority_runs_numbered_callbacks_in_order() {
    let (player, renderer) = player();
    player.run("priority").unwrap();

    let numbered: Vec<String> = renderer
        .created_labels(ContainerKind::CallStack)
        .into_iter()
        .filter(|l| l.starts_with(|c: char| c.is_ascii_digit()))
        .collect();
    assert_eq!(
        numbered,
        vec!["1. Sync Start", "2. Sync End", "3. Microtask", "4. Macrotask"]
    );
}

#[test]
fn microtask_reaches_stack_before_macrotask() {
    let (player, renderer) = player();
    player.run("priority").unwrap();

    let transfers: Vec<ContainerKind> = renderer
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            RenderCall::Transfer { source, .. } => Some(source),
            _ => None,
        })
        .collect();
    assert_eq!(
        transfers,
        vec![ContainerKind::MicrotaskQueue, ContainerKind::MacrotaskQueue]
    );
}

// ============================================================================
// Connections
// ============================================================================

#[test]
fn connection_steps_leave_containers_untouched() {
    let registry = ScenarioRegistry::builtin();
    let worker = registry.get("worker").unwrap();
    let renderer = Arc::new(RecordingRenderer::new());
    let store = Arc::new(Mutex::new(ContainerStore::new(renderer.clone())));
    let executor = StepExecutor::new(
        store.clone(),
        renderer.clone(),
        Arc::new(InstantClock),
        Timing::default(),
    );

    let mut connections = 0;
    for (index, step) in worker.steps.iter().enumerate() {
        let before = store.lock().unwrap().snapshot();
        executor.execute(index, step).unwrap();
        if step.category == Category::Connection {
            connections += 1;
            assert_eq!(store.lock().unwrap().snapshot(), before, "step {}", index);
        }
    }
    assert_eq!(connections, 2);

    let drawn = renderer
        .calls()
        .iter()
        .filter(|c| matches!(c, RenderCall::Connection { .. }))
        .count();
    let discarded = renderer
        .calls()
        .iter()
        .filter(|c| matches!(c, RenderCall::DiscardConnection { .. }))
        .count();
    assert_eq!((drawn, discarded), (2, 2));
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn reset_when_idle_empties_everything() {
    let (player, renderer) = player();
    player.run("promise").unwrap();
    assert!(!player.contents(ContainerKind::Heap).is_empty());

    assert!(player.reset());
    for kind in ContainerKind::ALL {
        assert!(player.contents(kind).is_empty(), "{} not empty", kind);
    }
    assert_eq!(renderer.calls().last(), Some(&RenderCall::Clear));
}

#[test]
fn rerun_starts_from_a_clean_board() {
    let (player, _renderer) = player();
    player.run("timeout").unwrap();
    player.run("timeout").unwrap();

    // Heap is reseeded, not appended to
    assert_eq!(player.contents(ContainerKind::Heap).len(), 3);
}
