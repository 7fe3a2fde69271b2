//! Player controls integration test
//!
//! Проверяем:
//! - одно движение за тик, флаг сбрасывается на следующем тике
//! - cooldown выстрела 0.35s
//! - игрок не проходит сквозь стены
//! - после game over команды игнорируются

use bevy::prelude::*;
use tank_simulation::*;

/// Helper: App без уровня, без врагов, прогрет
fn create_controls_app() -> App {
    let mut app = create_headless_app(42);
    app.update();
    app
}

fn spawn(app: &mut App, recipe: SpawnRecipe, data: SpawnData) -> Entity {
    let config = app.world().resource::<GameConfig>().clone();
    let entity = {
        let mut commands = app.world_mut().commands();
        spawn_entity(&mut commands, &config, 0.0, recipe, &data).expect("recipe spawns")
    };
    app.world_mut().flush();
    entity
}

fn position(app: &App, entity: Entity) -> Vec2 {
    app.world()
        .get::<Transform>(entity)
        .map(|transform| transform.translation.truncate())
        .expect("entity has transform")
}

fn count_bullets(app: &mut App, owner: Entity) -> usize {
    let mut query = app.world_mut().query::<&Projectile>();
    query.iter(app.world()).filter(|projectile| projectile.owner == owner).count()
}

fn tick_with(app: &mut App, actions: &[PlayerAction]) {
    for action in actions {
        app.world_mut().send_event(*action);
    }
    app.update();
}

/// Test: из нескольких движений за тик исполняется только первое
#[test]
fn test_one_move_per_tick() {
    let mut app = create_controls_app();
    let player = spawn(&mut app, SpawnRecipe::PlayerSpawnPoint, SpawnData::at(Vec2::new(400.0, 400.0)));

    tick_with(
        &mut app,
        &[
            PlayerAction::Move(Direction::Left),
            PlayerAction::Move(Direction::Right),
            PlayerAction::Move(Direction::Down),
        ],
    );

    // 100 u/s при 60Hz = round(1.67) = 2 шага
    assert_eq!(position(&app, player), Vec2::new(398.0, 400.0));
    let tank = app.world().get::<PlayerTank>(player).copied().expect("player tank");
    assert_eq!(tank.direction, Direction::Left);
    assert_eq!(app.world().get::<Heading>(player).map(|h| h.degrees), Some(270.0));

    // Следующий тик — флаг сброшен
    tick_with(&mut app, &[PlayerAction::Move(Direction::Right)]);
    assert_eq!(position(&app, player), Vec2::new(400.0, 400.0));
    assert_eq!(app.world().get::<Heading>(player).map(|h| h.degrees), Some(90.0));
}

/// Test: два выстрела в пределах cooldown дают одну пулю, после cooldown — вторую
#[test]
fn test_shoot_cooldown() {
    let mut app = create_controls_app();
    let player = spawn(&mut app, SpawnRecipe::PlayerSpawnPoint, SpawnData::at(Vec2::new(464.0, 800.0)));

    tick_with(&mut app, &[PlayerAction::Shoot]);
    tick_with(&mut app, &[PlayerAction::Shoot]);
    assert_eq!(count_bullets(&mut app, player), 1);

    // ~0.42s
    run_ticks(&mut app, 25);
    tick_with(&mut app, &[PlayerAction::Shoot]);
    assert_eq!(count_bullets(&mut app, player), 2);
}

/// Test: пуля вылетает по направлению танка из точки у центра
#[test]
fn test_bullet_spawned_at_muzzle() {
    let mut app = create_controls_app();
    let player = spawn(&mut app, SpawnRecipe::PlayerSpawnPoint, SpawnData::at(Vec2::new(464.0, 800.0)));

    tick_with(&mut app, &[PlayerAction::Shoot]);

    let mut query = app.world_mut().query::<(&Projectile, &Transform)>();
    let (projectile, transform) = query.single(app.world()).expect("one bullet");
    assert_eq!(projectile.owner, player);
    assert_eq!(projectile.velocity, Vec2::new(0.0, -350.0));
    // Центр (480, 815) + (-4, -4.5)
    assert_eq!(transform.translation.truncate(), Vec2::new(476.0, 810.5));
}

/// Test: стрельба не занимает слот движения
#[test]
fn test_shoot_does_not_consume_move() {
    let mut app = create_controls_app();
    let player = spawn(&mut app, SpawnRecipe::PlayerSpawnPoint, SpawnData::at(Vec2::new(400.0, 400.0)));

    tick_with(&mut app, &[PlayerAction::Shoot, PlayerAction::Move(Direction::Down)]);

    assert_eq!(position(&app, player), Vec2::new(400.0, 402.0));
    assert_eq!(count_bullets(&mut app, player), 1);
}

/// Test: игрок упирается в стену и не перекрывает её
#[test]
fn test_player_blocked_by_wall() {
    let mut app = create_controls_app();
    let player = spawn(&mut app, SpawnRecipe::PlayerSpawnPoint, SpawnData::at(Vec2::new(400.0, 400.0)));
    spawn(
        &mut app,
        SpawnRecipe::Wall,
        SpawnData::at(Vec2::new(437.0, 300.0)).with_size(Vec2::new(24.0, 200.0)),
    );

    for _ in 0..10 {
        tick_with(&mut app, &[PlayerAction::Move(Direction::Right)]);
    }

    // Правый край танка вплотную к стене: 405 + 32 = 437
    assert_eq!(position(&app, player), Vec2::new(405.0, 400.0));
}

/// Test: после game over команды игрока игнорируются
#[test]
fn test_input_ignored_after_game_over() {
    let mut app = create_controls_app();
    let player = spawn(&mut app, SpawnRecipe::PlayerSpawnPoint, SpawnData::at(Vec2::new(400.0, 400.0)));
    app.world_mut().resource_mut::<GameStats>().finish(GameOutcome::Defeat);

    for _ in 0..5 {
        tick_with(&mut app, &[PlayerAction::Move(Direction::Left), PlayerAction::Shoot]);
    }

    assert_eq!(position(&app, player), Vec2::new(400.0, 400.0));
    assert_eq!(count_bullets(&mut app, player), 0);
}
