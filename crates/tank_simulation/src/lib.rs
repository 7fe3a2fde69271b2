//! Tank Arcade Simulation Core
//!
//! ECS-симуляция top-down танковой аркады на Bevy 0.16 (headless).
//!
//! Архитектура:
//! - ECS = вся игровая логика (движение, AI, пули, правила столкновений, счёт)
//! - Хост = рендер, input bindings, UI, tile-map парсер (шлёт PlayerAction,
//!   читает GameStats / CounterChanged / GameOver)
//!
//! Один тик = один проход FixedUpdate, системы строго последовательны (`.chain()`).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod direction;
pub mod game_state;
pub mod logger;
pub mod physics;
pub mod player;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{enemy_ai_tick, EnemyAi};
pub use combat::{
    apply_collision_rules, despawn_after_timeout, despawn_out_of_bounds, move_projectiles, CollisionRule, DespawnAfter,
    Projectile, ShootTimer, VisualEffect,
};
pub use components::*;
pub use config::{AiTuning, ConfigError, GameConfig};
pub use direction::Direction;
pub use game_state::{
    check_win_condition, publish_counter_changes, Counter, CounterChanged, GameOutcome, GameOver, GameStats,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::{detect_contacts, ActiveContacts, ContactStarted};
pub use player::{apply_player_actions, reset_player_move_flag, PlayerAction, PlayerTank};
pub use spawn::{
    spawn_entity, spawn_level, spawn_requested_entities, Level, LevelError, LevelSpawn, SpawnData, SpawnError,
    SpawnRecipe, SpawnRequest,
};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Порядок выполнения за тик:
/// 1. reset_player_move_flag — новый тик, игрок снова может двинуться
/// 2. apply_player_actions — команды хоста (движение, выстрел)
/// 3. enemy_ai_tick — враги
/// 4. move_projectiles / despawn_out_of_bounds — пули
/// 5. detect_contacts / apply_collision_rules — столкновения
/// 6. check_win_condition — победа
/// 7. spawn_requested_entities — пули и эффекты, запрошенные выше
/// 8. despawn_after_timeout — истёкшие эффекты
/// 9. publish_counter_changes — уведомления для UI
pub struct TankGamePlugin;

impl Plugin for TankGamePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::default());
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<GameStats>().init_resource::<ActiveContacts>();

        // Регистрация событий
        app.add_event::<PlayerAction>()
            .add_event::<SpawnRequest>()
            .add_event::<ContactStarted>()
            .add_event::<GameOver>()
            .add_event::<CounterChanged>();

        app.add_systems(Startup, spawn_level);

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: поведение танков
                reset_player_move_flag,
                apply_player_actions,
                enemy_ai_tick,
                // Фаза 2: пули
                move_projectiles,
                despawn_out_of_bounds,
                // Фаза 3: столкновения и состояние игры
                detect_contacts,
                apply_collision_rules,
                check_win_condition,
                // Фаза 4: spawn/despawn
                spawn_requested_entities,
                despawn_after_timeout,
                // Фаза 5: наблюдатели
                publish_counter_changes,
            )
                .chain(), // Последовательное выполнение
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции с балансом по умолчанию
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, GameConfig::default())
}

/// Headless App с заданной конфигурацией
///
/// Время ручное: первый `update()` прогревочный (delta = 0),
/// каждый следующий продвигает симуляцию ровно на один fixed тик.
pub fn create_headless_app_with_config(seed: u64, config: GameConfig) -> App {
    let mut app = App::new();
    init_logger();

    let tick = config.tick_duration();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_duration(tick))
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config)
        .add_plugins(TankGamePlugin);

    app
}

/// Прогнать `ticks` вызовов `App::update()`
pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Запись snapshot'а мира
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub index: u32,
    pub kind: EntityKind,
    pub position: Vec2,
    pub health: Option<u32>,
}

/// Snapshot мира для сравнения детерминизма
///
/// Все entities с EntityKind, отсортированы по Entity index.
pub fn world_snapshot(world: &mut World) -> Vec<SnapshotEntry> {
    let mut query = world.query::<(Entity, &EntityKind, &Transform, Option<&Health>)>();
    let mut entries: Vec<SnapshotEntry> = query
        .iter(world)
        .map(|(entity, kind, transform, health)| SnapshotEntry {
            index: entity.index(),
            kind: *kind,
            position: transform.translation.truncate(),
            health: health.map(|health| health.current),
        })
        .collect();

    entries.sort_by_key(|entry| entry.index);
    entries
}
