use bevy::prelude::*;

use super::*;

#[test]
fn test_spawn_point_used_until_a_checkpoint_is_reached() {
    let ledger = CheckpointLedger::new(Vec2::new(10.0, 20.0));
    assert_eq!(ledger.active_checkpoint_or_spawn(), Vec2::new(10.0, 20.0));
    assert!(ledger.active().is_none());

    ledger.notify_checkpoint_reached(CheckpointId(2), Vec2::new(300.0, 40.0));
    assert_eq!(ledger.active_checkpoint_or_spawn(), Vec2::new(300.0, 40.0));
}

#[test]
fn test_latest_checkpoint_wins_and_reached_keeps_first_order() {
    let ledger = CheckpointLedger::default();
    ledger.notify_checkpoint_reached(CheckpointId(1), Vec2::new(100.0, 0.0));
    ledger.notify_checkpoint_reached(CheckpointId(2), Vec2::new(200.0, 0.0));
    ledger.notify_checkpoint_reached(CheckpointId(1), Vec2::new(100.0, 0.0));

    assert_eq!(ledger.active().map(|c| c.id), Some(CheckpointId(1)));
    assert_eq!(ledger.reached(), vec![CheckpointId(1), CheckpointId(2)]);
}

#[test]
fn test_clones_share_one_ledger() {
    let ledger = CheckpointLedger::new(Vec2::ZERO);
    let handle = ledger.clone();

    handle.notify_checkpoint_reached(CheckpointId(7), Vec2::new(5.0, 5.0));
    assert_eq!(ledger.active_checkpoint_or_spawn(), Vec2::new(5.0, 5.0));

    ledger.set_spawn_point(Vec2::new(-1.0, 0.0));
    handle.deactivate();
    assert_eq!(ledger.active_checkpoint_or_spawn(), Vec2::new(-1.0, 0.0));
    assert_eq!(handle.spawn_point(), Vec2::new(-1.0, 0.0));
}

#[test]
fn test_ledger_usable_across_threads() {
    let ledger = CheckpointLedger::new(Vec2::ZERO);
    let workers: Vec<_> = (0..4)
        .map(|i| {
            let handle = ledger.clone();
            std::thread::spawn(move || {
                handle.notify_checkpoint_reached(CheckpointId(i), Vec2::new(i as f32, 0.0));
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked");
    }

    assert_eq!(ledger.reached().len(), 4);
    assert!(ledger.active().is_some());
}
