//! Determinism tests
//!
//! Один seed + одинаковый поток команд = одинаковый мир после N тиков.

use tank_simulation::*;

/// Helper: прогнать демо-уровень, игрок стреляет каждый тик
fn run_demo(seed: u64, ticks: usize) -> (Vec<SnapshotEntry>, GameStats) {
    let mut app = create_headless_app(seed);
    app.insert_resource(Level::demo());

    for tick in 0..ticks {
        if tick % 20 == 0 {
            app.world_mut().send_event(PlayerAction::Move(Direction::Left));
        }
        app.world_mut().send_event(PlayerAction::Shoot);
        app.update();
    }

    let snapshot = world_snapshot(app.world_mut());
    let stats = app.world().resource::<GameStats>().clone();
    (snapshot, stats)
}

#[test]
fn test_same_seed_same_world() {
    let (snapshot_a, stats_a) = run_demo(42, 300);
    let (snapshot_b, stats_b) = run_demo(42, 300);

    assert_eq!(snapshot_a, snapshot_b, "same seed must produce identical worlds");
    assert_eq!(stats_a, stats_b);
}

#[test]
fn test_three_runs_identical() {
    const SEED: u64 = 7;

    let runs: Vec<_> = (0..3).map(|_| run_demo(SEED, 200)).collect();

    assert_eq!(runs[0], runs[1], "Run 1 vs Run 2 diverged");
    assert_eq!(runs[1], runs[2], "Run 2 vs Run 3 diverged");
}

#[test]
fn test_different_seeds_diverge() {
    let (snapshot_a, _) = run_demo(42, 300);
    let (snapshot_b, _) = run_demo(1337, 300);

    // Враги блуждают случайно: позиции расходятся
    assert_ne!(snapshot_a, snapshot_b);
}

#[test]
fn test_snapshot_contains_demo_level() {
    let mut app = create_headless_app(42);
    app.insert_resource(Level::demo());
    app.update();

    let snapshot = world_snapshot(app.world_mut());
    let enemies = snapshot.iter().filter(|entry| entry.kind == EntityKind::Enemy).count();
    let players = snapshot.iter().filter(|entry| entry.kind == EntityKind::Player).count();

    assert_eq!(enemies, 6);
    assert_eq!(players, 1);
    assert!(snapshot.windows(2).all(|pair| pair[0].index < pair[1].index));
}
